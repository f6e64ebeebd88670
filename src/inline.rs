//! Template substitution and output.
//!
//! The build runs four steps in order, with no branching back:
//!
//! ```text
//! 1. Locate      image_dir  →  PlaceholderMapping  (token → optional path)
//! 2. Encode      each path  →  data:<mime>;base64,…
//! 3. Substitute  template   →  inlined document
//! 4. Emit        document   →  output file
//! ```
//!
//! The template is read before anything else so a missing template aborts
//! the run before any asset is touched.
//!
//! ## Failure policy
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | No file matches a prefix | placeholder left as-is, recorded in [`InlineReport::missing`] |
//! | Matched file gone when read | same, with reason `vanished` |
//! | Matched file unreadable | fatal, [`InlineError::AssetRead`] |
//! | Template missing or not UTF-8 | fatal, nothing written |
//! | Output not writable | fatal, partial file removed |
//! | `fail_on_missing` and anything missing | fatal, nothing written |
//!
//! ## Substitution
//!
//! [`substitute`] makes a single left-to-right pass over the template.
//! Injected data URIs are never rescanned, so a token can not be replaced
//! inside a payload that was already injected. Text that is not a token is
//! copied through unchanged.

use crate::config::InlineConfig;
use crate::encode;
use crate::locate::{self, LocateError};
use crate::types::{
    CheckEntry, CheckReport, InlineReport, InlinedAsset, MissingAsset, MissingReason,
    PlaceholderMapping,
};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InlineError {
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("Cannot read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error("Cannot read asset {path}: {source}")]
    AssetRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Missing assets for: {}", .0.join(", "))]
    MissingAssets(Vec<String>),
}

/// Result of a single substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub text: String,
    /// Replacement count per entry of the input slice, same order.
    pub occurrences: Vec<usize>,
}

/// Replace every occurrence of each token with its replacement text.
///
/// At each position the earliest match wins; if two tokens start at the same
/// position the longer one wins. Empty tokens never match.
pub fn substitute(document: &str, replacements: &[(&str, &str)]) -> Substituted {
    let find_from = |token: &str, from: usize| -> Option<usize> {
        if token.is_empty() {
            return None;
        }
        document[from..].find(token).map(|p| p + from)
    };

    let mut next: Vec<Option<usize>> = replacements
        .iter()
        .map(|(t, _)| find_from(*t, 0))
        .collect();
    let mut occurrences = vec![0; replacements.len()];
    let mut text = String::with_capacity(document.len());
    let mut cursor = 0;

    loop {
        let best = next
            .iter()
            .enumerate()
            .filter_map(|(i, pos)| pos.map(|p| (p, i)))
            .min_by(|(pa, ia), (pb, ib)| {
                pa.cmp(pb)
                    .then_with(|| replacements[*ib].0.len().cmp(&replacements[*ia].0.len()))
            });
        let Some((pos, idx)) = best else {
            break;
        };

        let (token, replacement) = replacements[idx];
        text.push_str(&document[cursor..pos]);
        text.push_str(replacement);
        occurrences[idx] += 1;
        cursor = pos + token.len();

        for (i, slot) in next.iter_mut().enumerate() {
            if let Some(p) = *slot
                && p < cursor
            {
                *slot = find_from(replacements[i].0, cursor);
            }
        }
    }

    text.push_str(&document[cursor..]);
    Substituted { text, occurrences }
}

/// Write `document` to `path`, replacing any existing file.
///
/// Parent directories are created. If the file was opened but the write
/// fails part way, the partial file is removed. A file that could not be
/// opened is left as it was.
pub fn emit(document: &str, path: &Path) -> Result<(), InlineError> {
    let write_err = |source| InlineError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut file = File::create(path).map_err(write_err)?;
    if let Err(source) = file.write_all(document.as_bytes()).and_then(|()| file.flush()) {
        drop(file);
        if fs::metadata(path).is_ok_and(|m| m.is_file()) {
            let _ = fs::remove_file(path);
        }
        return Err(write_err(source));
    }
    Ok(())
}

/// Read the template as UTF-8 text.
pub fn read_template(path: &Path) -> Result<String, InlineError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            InlineError::TemplateNotFound(path.to_path_buf())
        } else {
            InlineError::TemplateRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// A document with every located asset substituted, not yet written.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub text: String,
    pub inlined: Vec<InlinedAsset>,
    pub missing: Vec<MissingAsset>,
}

/// Encode every located asset and substitute it into `template`.
pub fn render(
    template: &str,
    mapping: &PlaceholderMapping,
    mime_type: &str,
) -> Result<Rendered, InlineError> {
    let mut encoded: Vec<(&str, String)> = Vec::new();
    let mut inlined = Vec::new();
    let mut missing = Vec::new();

    for entry in mapping.iter() {
        let Some(path) = &entry.path else {
            missing.push(MissingAsset {
                token: entry.token.clone(),
                prefix: entry.prefix.clone(),
                reason: MissingReason::NoMatch,
            });
            continue;
        };
        match encode::encode(path, mime_type) {
            Ok((uri, bytes)) => {
                encoded.push((entry.token.as_str(), uri));
                inlined.push(InlinedAsset {
                    token: entry.token.clone(),
                    source: path.clone(),
                    bytes,
                    occurrences: 0,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                missing.push(MissingAsset {
                    token: entry.token.clone(),
                    prefix: entry.prefix.clone(),
                    reason: MissingReason::Vanished,
                });
            }
            Err(source) => {
                return Err(InlineError::AssetRead {
                    path: path.clone(),
                    source,
                });
            }
        }
    }

    let pairs: Vec<(&str, &str)> = encoded.iter().map(|(t, u)| (*t, u.as_str())).collect();
    let result = substitute(template, &pairs);
    for (asset, count) in inlined.iter_mut().zip(result.occurrences) {
        asset.occurrences = count;
    }

    Ok(Rendered {
        text: result.text,
        inlined,
        missing,
    })
}

/// Run the full build: locate, encode, substitute, emit.
///
/// `root` is the directory relative config paths are resolved against.
pub fn inline(config: &InlineConfig, root: &Path) -> Result<InlineReport, InlineError> {
    let paths = config.resolve_paths(root);
    let template = read_template(&paths.template)?;
    let mapping = locate::locate_all(&config.placeholders, &paths.image_dir, &config.extension)?;
    let rendered = render(&template, &mapping, &config.mime_type)?;

    if config.fail_on_missing && !rendered.missing.is_empty() {
        return Err(InlineError::MissingAssets(
            rendered.missing.into_iter().map(|m| m.token).collect(),
        ));
    }

    emit(&rendered.text, &paths.output)?;

    Ok(InlineReport {
        output: paths.output,
        inlined: rendered.inlined,
        missing: rendered.missing,
    })
}

/// Locate assets and count token occurrences without encoding or writing.
pub fn check(config: &InlineConfig, root: &Path) -> Result<CheckReport, InlineError> {
    let paths = config.resolve_paths(root);
    let template = read_template(&paths.template)?;
    let mapping = locate::locate_all(&config.placeholders, &paths.image_dir, &config.extension)?;

    let entries = mapping
        .entries
        .into_iter()
        .map(|asset| {
            let occurrences = template.matches(asset.token.as_str()).count();
            CheckEntry { asset, occurrences }
        })
        .collect();

    Ok(CheckReport {
        template: paths.template,
        image_dir: paths.image_dir,
        entries,
    })
}
