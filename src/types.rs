//! Shared types passed between the locate, inline, and output modules.
//!
//! Report types serialize to JSON for `check --json`.

use serde::Serialize;
use std::path::PathBuf;

/// A placeholder after the locate phase: its token, prefix, and the asset
/// chosen for it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedAsset {
    pub token: String,
    pub prefix: String,
    /// First candidate in file-name order. `None` when nothing matched.
    pub path: Option<PathBuf>,
    /// Number of files that matched the prefix. Above 1 means the choice
    /// was a tie-break.
    pub candidates: usize,
}

/// Token → optional asset path, in config order.
///
/// Built once by [`crate::locate::locate_all`] and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlaceholderMapping {
    pub entries: Vec<MappedAsset>,
}

impl PlaceholderMapping {
    pub fn iter(&self) -> impl Iterator<Item = &MappedAsset> {
        self.entries.iter()
    }
}

/// Why a placeholder was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReason {
    /// No file in the image directory matched the prefix.
    NoMatch,
    /// A file matched, but it was gone by the time it was read.
    Vanished,
}

/// A placeholder whose asset could not be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingAsset {
    pub token: String,
    pub prefix: String,
    pub reason: MissingReason,
}

/// A placeholder that was replaced by a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlinedAsset {
    pub token: String,
    pub source: PathBuf,
    /// Size of the source file in bytes.
    pub bytes: usize,
    /// How many times the token was replaced in the template.
    pub occurrences: usize,
}

/// Result of a `build` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineReport {
    pub output: PathBuf,
    /// Placeholders with an asset, in mapping order.
    pub inlined: Vec<InlinedAsset>,
    /// Placeholders left unreplaced, in mapping order.
    pub missing: Vec<MissingAsset>,
}

impl InlineReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Tokens whose asset was encoded but which never occur in the template.
    pub fn unused_tokens(&self) -> Vec<&str> {
        self.inlined
            .iter()
            .filter(|a| a.occurrences == 0)
            .map(|a| a.token.as_str())
            .collect()
    }
}

/// Per-placeholder result of a `check` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckEntry {
    #[serde(flatten)]
    pub asset: MappedAsset,
    /// Number of times the token occurs in the template.
    pub occurrences: usize,
}

/// Result of a `check` run: locate plus a template scan, nothing written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub template: PathBuf,
    pub image_dir: PathBuf,
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    pub fn missing(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries.iter().filter(|e| e.asset.path.is_none())
    }

    pub fn ambiguous(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries.iter().filter(|e| e.asset.candidates > 1)
    }

    pub fn unused(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries.iter().filter(|e| e.occurrences == 0)
    }
}
