//! Build configuration module.
//!
//! Handles loading, validating, and merging the optional `config.toml` that
//! sits next to `listing.json` in a property folder. Stock defaults are the
//! base layer; the file overrides only the keys it names, and command-line
//! flags override the result.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [listing]
//! validation = "lenient"    # "strict" rejects listings missing required fields
//!
//! [images]
//! max_width = 1920          # Gallery images wider than this are scaled down
//! quality = 85              # JPEG quality (1-100)
//!
//! [thumbnails]
//! enabled = false           # Also write thumbs/<photo> for every gallery photo
//! max_width = 400
//! max_height = 300
//! quality = 80
//!
//! [assets]
//! static_dir = "static"     # Copy support assets from here (omit for built-in assets)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// How `listing.json` is validated.
    pub listing: ListingConfig,
    /// Full-size gallery image settings.
    pub images: ImagesConfig,
    /// Optional thumbnail generation.
    pub thumbnails: ThumbnailsConfig,
    /// Where support assets (stylesheet, lightbox script) come from.
    pub assets: AssetsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.images.quality) {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if self.images.max_width == 0 {
            return Err(ConfigError::Validation(
                "images.max_width must be non-zero".into(),
            ));
        }
        if self.thumbnails.max_width == 0 || self.thumbnails.max_height == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.max_width and thumbnails.max_height must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The configured static asset directory, resolved against `base`.
    ///
    /// Absolute paths are returned unchanged.
    pub fn static_dir_in(&self, base: &Path) -> Option<PathBuf> {
        self.assets.static_dir.as_ref().map(|dir| base.join(dir))
    }
}

/// Listing validation strictness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject listings missing `title`, `address`, `details`, or the core detail fields.
    Strict,
    /// Substitute documented defaults for missing fields.
    #[default]
    Lenient,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    pub validation: ValidationMode,
}

/// Full-size image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Images wider than this are scaled down, preserving aspect ratio.
    pub max_width: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            quality: 85,
        }
    }
}

/// Thumbnail settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Write `thumbs/<relpath>` for each gallery photo.
    pub enabled: bool,
    /// Bounding box width.
    pub max_width: u32,
    /// Bounding box height.
    pub max_height: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_width: 400,
            max_height: 300,
            quality: 80,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory whose files are copied into `static/`. Relative paths are
    /// resolved against the property folder. When absent, built-in assets
    /// are written instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Listing Site Configuration
# ==========================
# Place this file next to listing.json. All settings are optional;
# values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Listing validation
# ---------------------------------------------------------------------------
[listing]
# "strict" rejects a listing.json missing title, address, details, or
# details.price/beds/baths/sqft. "lenient" fills in defaults instead.
validation = "lenient"

# ---------------------------------------------------------------------------
# Gallery images
# ---------------------------------------------------------------------------
[images]
# Photos wider than this are scaled down, keeping their aspect ratio.
max_width = 1920

# JPEG quality (1 = worst, 100 = best).
quality = 85

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Also write a small copy of every photo to thumbs/.
enabled = false

# Thumbnails fit inside this box. Small photos are never enlarged.
max_width = 400
max_height = 300

quality = 80

# ---------------------------------------------------------------------------
# Support assets
# ---------------------------------------------------------------------------
[assets]
# Copy stylesheet and scripts from this directory into static/.
# Omit to use the built-in assets.
# static_dir = "static"
"##
}
