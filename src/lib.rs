//! # Simple Inline
//!
//! Builds a standalone HTML file by finding image assets on disk, encoding
//! them as base64 data URIs, and substituting them for placeholder tokens in
//! a template.
//!
//! # Pipeline
//!
//! ```text
//! 1. Locate      assets/images/  →  token → optional path   (prefix lookup)
//! 2. Encode      each path       →  data:image/png;base64,…
//! 3. Substitute  template        →  document with tokens replaced
//! 4. Emit        document        →  output file
//! ```
//!
//! The steps run once, in order, on a single thread. A placeholder whose
//! asset can't be found is left in place and reported; everything else that
//! goes wrong (missing template, unreadable asset, unwritable output) stops
//! the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `inline.toml` loading, stock defaults, validation |
//! | [`types`] | Placeholder mapping and report types shared between modules |
//! | [`locate`] | Prefix + extension lookup in the image directory |
//! | [`encode`] | Bytes → data URI and back |
//! | [`inline`] | Substitution, output writing, and the `build`/`check` runs |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## First Match by Name
//!
//! A prefix can match several files (`hero_v1.png`, `hero_v2.png`). Directory
//! listing order differs across filesystems, so candidates are sorted by file
//! name and the first wins. `check` lists prefixes with more than one
//! candidate.
//!
//! ## Reports Instead of Printing
//!
//! [`inline::inline`] returns an [`types::InlineReport`] listing inlined and
//! missing assets rather than printing as it goes. The CLI formats it with
//! [`output`]; `--strict` (or `fail_on_missing`) turns a missing asset into
//! an error before anything is written.
//!
//! ## Single-Pass Substitution
//!
//! Tokens are replaced in one scan of the template, so text injected for one
//! token is never searched for another. Config validation also rejects
//! tokens that contain each other.

pub mod config;
pub mod encode;
pub mod inline;
pub mod locate;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
