//! Configuration module.
//!
//! Handles loading, validating, and merging `photofx.toml`. Stock defaults are
//! overridden by whatever the user file specifies; everything is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! format = "png"           # png | jpeg | webp | tiff | avif
//! compression = "default"  # fast | default | best
//! quality = 85             # 1-100, used by jpeg and avif
//!
//! [tools]
//! convert = "convert"      # generic image-convert tool
//! composite = "composite"  # compositing tool
//! scripts_dir = "scripts"  # effect-specific executables
//! assets_dir = "assets"    # overlay/texture images
//! ```
//!
//! Relative `scripts_dir` / `assets_dir` (and tool paths containing a
//! directory) are resolved against the directory holding the config file.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Compression, EncodeSettings, OutputFormat, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "photofx.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhotofxConfig {
    /// Encoding defaults for resizes.
    pub output: OutputConfig,
    /// Where external tools and their assets live.
    pub tools: ToolsConfig,
}

impl PhotofxConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality == 0 || self.output.quality > 100 {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        for (key, value) in [
            ("tools.convert", &self.tools.convert),
            ("tools.composite", &self.tools.composite),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Process-wide encoding defaults, overridable per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub compression: Compression,
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            compression: Compression::Default,
            quality: Quality::default().value(),
        }
    }
}

impl OutputConfig {
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            format: self.format,
            compression: self.compression,
            quality: Quality::new(self.quality),
        }
    }
}

/// External tool locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub convert: String,
    pub composite: String,
    pub scripts_dir: String,
    pub assets_dir: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            convert: "convert".to_string(),
            composite: "composite".to_string(),
            scripts_dir: "scripts".to_string(),
            assets_dir: "assets".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PhotofxConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<PhotofxConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PhotofxConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a specific config file. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<PhotofxConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Load `photofx.toml` from `dir`, falling back to stock defaults when the
/// file does not exist.
pub fn load_config(dir: &Path) -> Result<PhotofxConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return resolve_config(None);
    }
    load_config_file(&config_path)
}

/// Returns a fully-commented stock `photofx.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photofx configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Resize output
# ---------------------------------------------------------------------------
[output]
# Encoded format: png, jpeg, webp (lossless), tiff or avif.
format = "png"

# Compression effort: fast, default or best.
# PNG: deflate level. AVIF: encoder speed. Ignored by the other formats.
compression = "default"

# Lossy quality (1 = worst, 100 = best). Used by jpeg and avif.
quality = 85

# ---------------------------------------------------------------------------
# External tools
# ---------------------------------------------------------------------------
[tools]
# Generic image-convert executable (looked up on PATH when it has no directory).
convert = "convert"

# Compositing executable used by the "composite" effect.
composite = "composite"

# Directory holding effect scripts (sketch, vintage1, splittone1, ...).
# Relative paths are resolved against the directory of this file.
scripts_dir = "scripts"

# Directory holding overlay textures (pencil_tile.gif, texture_fabric.gif).
assets_dir = "assets"
"##
}
