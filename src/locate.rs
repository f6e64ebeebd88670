//! Prefix-based asset lookup.
//!
//! Assets are found by the start of their file name, since the exact name
//! (version suffix and so on) is not known in advance. An asset for prefix
//! `tss_title_card_gold` and extension `png` is any regular file directly in
//! the image directory named `tss_title_card_gold*.png`:
//!
//! ```text
//! assets/images/
//! ├── tss_title_card_gold_v2.png     # match
//! ├── tss_title_card_gold_v3.png     # match (loses the tie-break)
//! ├── tss_title_card_gold_v2.jpg     # wrong extension
//! ├── .tss_title_card_gold_tmp.png   # hidden, skipped
//! └── old/tss_title_card_gold.png    # not searched (no recursion)
//! ```
//!
//! ## Tie-break
//!
//! Directory enumeration order differs between platforms and filesystems,
//! so candidates are sorted by file name and the first one wins. The number
//! of candidates is kept on the [`MappedAsset`] so callers can surface the
//! ambiguity.
//!
//! A missing image directory is not an error: every prefix simply has no
//! match.

use crate::config::Placeholder;
use crate::types::{MappedAsset, PlaceholderMapping};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Cannot read image directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Find the asset for `prefix`: the first match in file-name order.
pub fn locate(prefix: &str, dir: &Path, extension: &str) -> Result<Option<PathBuf>, LocateError> {
    Ok(find_candidates(prefix, dir, extension)?.into_iter().next())
}

/// All files in `dir` named `<prefix>*.<extension>`, sorted by file name.
pub fn find_candidates(
    prefix: &str,
    dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, LocateError> {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LocateError::ReadDir {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut matches: Vec<PathBuf> = read_dir
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && matches_prefix(p, prefix, extension))
        .collect();

    matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(matches)
}

/// Run [`find_candidates`] for every placeholder, in config order.
pub fn locate_all(
    placeholders: &[Placeholder],
    dir: &Path,
    extension: &str,
) -> Result<PlaceholderMapping, LocateError> {
    let mut entries = Vec::with_capacity(placeholders.len());
    for placeholder in placeholders {
        let candidates = find_candidates(&placeholder.prefix, dir, extension)?;
        entries.push(MappedAsset {
            token: placeholder.token.clone(),
            prefix: placeholder.prefix.clone(),
            path: candidates.first().cloned(),
            candidates: candidates.len(),
        });
    }
    Ok(PlaceholderMapping { entries })
}

/// `name` starts with `prefix` and has extension `extension`.
///
/// The prefix compare is case-sensitive, the extension compare is not.
/// Hidden files never match.
fn matches_prefix(path: &Path, prefix: &str, extension: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') || !name.starts_with(prefix) {
        return false;
    }
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    stem.len() >= prefix.len() && ext.eq_ignore_ascii_case(extension)
}
