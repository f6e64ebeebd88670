//! Shared test utilities for the simple-inline test suite.
//!
//! Provides fixture setup and report lookups that panic with the available
//! names on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let report = inline(&InlineConfig::default(), tmp.path()).unwrap();
//!
//! let title = find_inlined(&report, "__TITLE_IMG__");
//! assert_eq!(missing_tokens(&report), vec!["__BRIDGE_IMG__"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{InlineReport, InlinedAsset};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// The fixture has a template using all five stock tokens and images for
/// every prefix except `tss_bridge_professional`.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Report lookups
// =========================================================================

/// Find an inlined asset by token. Panics if not found.
pub fn find_inlined<'a>(report: &'a InlineReport, token: &str) -> &'a InlinedAsset {
    report
        .inlined
        .iter()
        .find(|a| a.token == token)
        .unwrap_or_else(|| {
            let tokens = inlined_tokens(report);
            panic!("inlined asset '{token}' not found. Available: {tokens:?}")
        })
}

/// Tokens that were replaced, in mapping order.
pub fn inlined_tokens(report: &InlineReport) -> Vec<&str> {
    report.inlined.iter().map(|a| a.token.as_str()).collect()
}

/// Tokens left in place, in mapping order.
pub fn missing_tokens(report: &InlineReport) -> Vec<&str> {
    report.missing.iter().map(|m| m.token.as_str()).collect()
}
