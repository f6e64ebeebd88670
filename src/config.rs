//! Inliner configuration module.
//!
//! Handles loading, validating, and merging `inline.toml`. Stock defaults are
//! overridden by an optional `inline.toml` in the project root, and CLI flags
//! override both for the three paths.
//!
//! ## Config File Location
//!
//! ```text
//! project/
//! ├── inline.toml              # Optional (overrides stock defaults)
//! ├── template_v3.html         # Template with placeholder tokens
//! ├── assets/
//! │   └── images/
//! │       ├── tss_title_card_gold_v2.png
//! │       └── ...
//! └── TSS_PV_Final.html        # Output (written by `build`)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! template = "template_v3.html"   # Template document (relative to the root)
//! image_dir = "assets/images"     # Directory searched for assets
//! output = "TSS_PV_Final.html"    # Where the inlined document is written
//! extension = "png"               # Asset file extension
//! mime_type = "image/png"         # MIME type written into data URIs
//! fail_on_missing = false         # Abort before writing if any asset is missing
//!
//! [[placeholders]]
//! token = "__TITLE_IMG__"
//! prefix = "tss_title_card_gold"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Tables merge
//! key by key, but arrays replace wholesale: a file that sets `placeholders`
//! replaces the entire stock list.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the project root.
pub const CONFIG_FILENAME: &str = "inline.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Inliner configuration loaded from `inline.toml`.
///
/// All fields have defaults matching the stock asset layout. Unknown keys
/// are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InlineConfig {
    /// Template document path.
    pub template: String,
    /// Directory searched (non-recursively) for assets.
    pub image_dir: String,
    /// Output document path. Overwritten on every build.
    pub output: String,
    /// Asset file extension: a single component, no dots.
    pub extension: String,
    /// MIME type embedded in every generated data URI.
    pub mime_type: String,
    /// Treat any missing asset as fatal.
    pub fail_on_missing: bool,
    /// Token/prefix pairs, substituted in this order.
    pub placeholders: Vec<Placeholder>,
}

/// One placeholder token and the filename prefix of the asset that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placeholder {
    pub token: String,
    pub prefix: String,
}

impl Placeholder {
    pub fn new(token: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            prefix: prefix.into(),
        }
    }
}

fn default_placeholders() -> Vec<Placeholder> {
    vec![
        Placeholder::new("__TITLE_IMG__", "tss_title_card_gold"),
        Placeholder::new("__VERSE1_IMG__", "tss_verse1_solitude"),
        Placeholder::new("__CHORUS1_IMG__", "tss_chorus1_connection"),
        Placeholder::new("__BRIDGE_IMG__", "tss_bridge_professional"),
        Placeholder::new("__OUTRO_IMG__", "tss_outro_dream"),
    ]
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            template: "template_v3.html".to_string(),
            image_dir: "assets/images".to_string(),
            output: "TSS_PV_Final.html".to_string(),
            extension: "png".to_string(),
            mime_type: "image/png".to_string(),
            fail_on_missing: false,
            placeholders: default_placeholders(),
        }
    }
}

impl InlineConfig {
    /// Validate values and the non-overlapping-token invariant.
    ///
    /// No token may be a substring of another: with overlapping tokens the
    /// result would depend on which one is matched first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Validation("extension must not be empty".into()));
        }
        if self.extension.contains('.') {
            return Err(ConfigError::Validation(format!(
                "extension '{}' must not contain '.'",
                self.extension
            )));
        }
        if !self.mime_type.contains('/') {
            return Err(ConfigError::Validation(format!(
                "mime_type '{}' must look like type/subtype",
                self.mime_type
            )));
        }
        for (i, p) in self.placeholders.iter().enumerate() {
            if p.token.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "placeholders[{i}].token must not be empty"
                )));
            }
            if p.prefix.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "placeholders[{i}].prefix must not be empty"
                )));
            }
            for other in &self.placeholders[i + 1..] {
                if p.token == other.token {
                    return Err(ConfigError::Validation(format!(
                        "duplicate placeholder token '{}'",
                        p.token
                    )));
                }
                if p.token.contains(&other.token) || other.token.contains(&p.token) {
                    return Err(ConfigError::Validation(format!(
                        "placeholder tokens '{}' and '{}' overlap",
                        p.token, other.token
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve the template, image directory and output paths against `root`.
    ///
    /// Absolute paths in the config are kept as they are.
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        ResolvedPaths {
            template: root.join(&self.template),
            image_dir: root.join(&self.image_dir),
            output: root.join(&self.output),
        }
    }
}

/// Filesystem locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub template: PathBuf,
    pub image_dir: PathBuf,
    pub output: PathBuf,
}

/// CLI-level path overrides, applied after the config file is merged.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub template: Option<PathBuf>,
    pub image_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl PathOverrides {
    pub fn apply(&self, config: &mut InlineConfig) {
        if let Some(t) = &self.template {
            config.template = t.to_string_lossy().into_owned();
        }
        if let Some(d) = &self.image_dir {
            config.image_dir = d.to_string_lossy().into_owned();
        }
        if let Some(o) = &self.output {
            config.output = o.to_string_lossy().into_owned();
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(InlineConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `inline.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `inline.toml` exists in the directory.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<InlineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: InlineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `inline.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<InlineConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `inline.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Inline Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the project root (--root).
# Unknown keys will cause an error.

# Template document containing the placeholder tokens.
template = "template_v3.html"

# Directory searched (not recursively) for assets.
image_dir = "assets/images"

# Output document. Overwritten on every build.
output = "TSS_PV_Final.html"

# Assets match <prefix>*.<extension>. When several files match, the first
# one in file-name order wins.
extension = "png"

# MIME type written into each data:<mime>;base64,<payload> URI.
mime_type = "image/png"

# Abort before writing the output if any placeholder has no asset.
fail_on_missing = false

# ---------------------------------------------------------------------------
# Placeholders
# ---------------------------------------------------------------------------
# Each token is replaced everywhere it appears in the template. Tokens must
# be unique and must not contain one another. Setting this list replaces
# the whole stock list.
[[placeholders]]
token = "__TITLE_IMG__"
prefix = "tss_title_card_gold"

[[placeholders]]
token = "__VERSE1_IMG__"
prefix = "tss_verse1_solitude"

[[placeholders]]
token = "__CHORUS1_IMG__"
prefix = "tss_chorus1_connection"

[[placeholders]]
token = "__BRIDGE_IMG__"
prefix = "tss_bridge_professional"

[[placeholders]]
token = "__OUTRO_IMG__"
prefix = "tss_outro_dream"
"##
}
