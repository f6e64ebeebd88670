//! CLI output formatting for the `build` and `check` commands.
//!
//! # Entity Display Contract
//!
//! Every placeholder is shown the same way in both commands:
//!
//! 1. **Header line**: positional index + token
//! 2. **Context lines**: indented `Source:`, `Warning:`, or `Note:` lines
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Injecting assets into template_v3.html
//! 001 __TITLE_IMG__
//!     Source: tss_title_card_gold_v2.png (34 B, 2 occurrences)
//! 002 __BRIDGE_IMG__
//!     Warning: no tss_bridge_professional*.png found, placeholder left in place
//!
//! ==> Wrote TSS_PV_Final.html (4 inlined, 1 missing)
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 __TITLE_IMG__
//!     Source: tss_title_card_gold_v2.png
//!     Note: 2 candidates, first by name wins
//! 002 __BRIDGE_IMG__
//!     Warning: no tss_bridge_professional*.png found
//!     Warning: token does not occur in the template
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::types::{CheckReport, InlineReport, MissingReason};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte size: `512 B`, `3.4 KiB`, `1.2 MiB`.
fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// File name for display, falling back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Build output
// ============================================================================

/// Format build output: one entry per placeholder, then a summary line.
///
/// Entries are listed in `order` (the config's token order), so inlined and
/// missing placeholders appear where they are configured.
pub fn format_inline_output(
    report: &InlineReport,
    template: &Path,
    order: &[&str],
    extension: &str,
) -> Vec<String> {
    let mut lines = vec![format!("Injecting assets into {}", display_name(template))];
    let unused = report.unused_tokens();

    for (i, token) in order.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), token));
        if let Some(asset) = report.inlined.iter().find(|a| a.token == *token) {
            lines.push(format!(
                "{}Source: {} ({}, {})",
                indent(1),
                display_name(&asset.source),
                format_size(asset.bytes),
                plural(asset.occurrences, "occurrence")
            ));
            if unused.contains(token) {
                lines.push(format!(
                    "{}Warning: token does not occur in the template",
                    indent(1)
                ));
            }
        } else if let Some(missing) = report.missing.iter().find(|m| m.token == *token) {
            let what = match missing.reason {
                MissingReason::NoMatch => format!("no {}*.{} found", missing.prefix, extension),
                MissingReason::Vanished => {
                    format!("{}*.{} disappeared before it was read", missing.prefix, extension)
                }
            };
            lines.push(format!(
                "{}Warning: {}, placeholder left in place",
                indent(1),
                what
            ));
        }
    }

    lines.push(String::new());
    if report.is_complete() {
        lines.push(format!(
            "==> Wrote {} ({} inlined)",
            report.output.display(),
            report.inlined.len()
        ));
    } else {
        lines.push(format!(
            "==> Wrote {} ({} inlined, {} missing)",
            report.output.display(),
            report.inlined.len(),
            report.missing.len()
        ));
    }
    lines
}

/// Print build output to stdout.
pub fn print_inline_output(
    report: &InlineReport,
    template: &Path,
    order: &[&str],
    extension: &str,
) {
    for line in format_inline_output(report, template, order, extension) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format check output: located file, ambiguity, and template usage per token.
pub fn format_check_output(report: &CheckReport, extension: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Template: {}", report.template.display()),
        format!("Images:   {}", report.image_dir.display()),
        String::new(),
    ];

    for (i, entry) in report.entries.iter().enumerate() {
        let asset = &entry.asset;
        lines.push(format!("{} {}", format_index(i + 1), asset.token));
        match &asset.path {
            Some(path) => {
                lines.push(format!("{}Source: {}", indent(1), display_name(path)));
                if asset.candidates > 1 {
                    lines.push(format!(
                        "{}Note: {} candidates, first by name wins",
                        indent(1),
                        asset.candidates
                    ));
                }
            }
            None => lines.push(format!(
                "{}Warning: no {}*.{} found",
                indent(1),
                asset.prefix,
                extension
            )),
        }
        if entry.occurrences == 0 {
            lines.push(format!(
                "{}Warning: token does not occur in the template",
                indent(1)
            ));
        }
    }

    let missing = report.missing().count();
    lines.push(String::new());
    if missing == 0 {
        lines.push("==> All assets found".to_string());
    } else {
        lines.push(format!(
            "==> {} of {} missing",
            missing,
            plural(report.entries.len(), "asset")
        ));
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport, extension: &str) {
    for line in format_check_output(report, extension) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckEntry, InlinedAsset, MappedAsset, MissingAsset};
    use std::path::PathBuf;

    fn sample_report() -> InlineReport {
        InlineReport {
            output: PathBuf::from("site/out.html"),
            inlined: vec![InlinedAsset {
                token: "__TITLE_IMG__".into(),
                source: PathBuf::from("assets/images/tss_title_card_gold_v2.png"),
                bytes: 2048,
                occurrences: 2,
            }],
            missing: vec![MissingAsset {
                token: "__BRIDGE_IMG__".into(),
                prefix: "tss_bridge_professional".into(),
                reason: MissingReason::NoMatch,
            }],
        }
    }

    fn entry(token: &str, path: Option<&str>, candidates: usize, occurrences: usize) -> CheckEntry {
        CheckEntry {
            asset: MappedAsset {
                token: token.into(),
                prefix: "p".into(),
                path: path.map(PathBuf::from),
                candidates,
            },
            occurrences,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.5 MiB");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "occurrence"), "1 occurrence");
        assert_eq!(plural(0, "occurrence"), "0 occurrences");
    }

    #[test]
    fn inline_output_follows_given_order() {
        let report = sample_report();
        let lines = format_inline_output(
            &report,
            Path::new("site/template_v3.html"),
            &["__TITLE_IMG__", "__BRIDGE_IMG__"],
            "png",
        );
        assert_eq!(
            lines,
            vec![
                "Injecting assets into template_v3.html",
                "001 __TITLE_IMG__",
                "    Source: tss_title_card_gold_v2.png (2.0 KiB, 2 occurrences)",
                "002 __BRIDGE_IMG__",
                "    Warning: no tss_bridge_professional*.png found, placeholder left in place",
                "",
                "==> Wrote site/out.html (1 inlined, 1 missing)",
            ]
        );
    }

    #[test]
    fn inline_output_complete_run_summary() {
        let mut report = sample_report();
        report.missing.clear();
        let lines = format_inline_output(&report, Path::new("t.html"), &["__TITLE_IMG__"], "png");
        assert_eq!(lines.last().unwrap(), "==> Wrote site/out.html (1 inlined)");
    }

    #[test]
    fn inline_output_vanished_asset() {
        let mut report = sample_report();
        report.missing[0].reason = MissingReason::Vanished;
        let lines = format_inline_output(&report, Path::new("t.html"), &["__BRIDGE_IMG__"], "png");
        assert!(lines[2].contains("disappeared before it was read"));
    }

    #[test]
    fn inline_output_flags_unused_token() {
        let mut report = sample_report();
        report.inlined[0].occurrences = 0;
        let lines = format_inline_output(&report, Path::new("t.html"), &["__TITLE_IMG__"], "png");
        assert!(lines.iter().any(|l| l.contains("does not occur")));
    }

    #[test]
    fn check_output_all_found() {
        let report = CheckReport {
            template: PathBuf::from("t.html"),
            image_dir: PathBuf::from("img"),
            entries: vec![entry("__A__", Some("img/a.png"), 1, 1)],
        };
        let lines = format_check_output(&report, "png");
        assert_eq!(lines[3], "001 __A__");
        assert_eq!(lines[4], "    Source: a.png");
        assert_eq!(lines.last().unwrap(), "==> All assets found");
    }

    #[test]
    fn check_output_missing_ambiguous_and_unused() {
        let report = CheckReport {
            template: PathBuf::from("t.html"),
            image_dir: PathBuf::from("img"),
            entries: vec![
                entry("__A__", Some("img/a_1.png"), 3, 1),
                entry("__B__", None, 0, 0),
            ],
        };
        let lines = format_check_output(&report, "png");
        assert!(lines.contains(&"    Note: 3 candidates, first by name wins".to_string()));
        assert!(lines.contains(&"    Warning: no p*.png found".to_string()));
        assert!(lines.contains(&"    Warning: token does not occur in the template".to_string()));
        assert_eq!(lines.last().unwrap(), "==> 1 of 2 assets missing");
    }
}
