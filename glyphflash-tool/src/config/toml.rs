//! TOML configuration file format
//!
//! Mirrors the file layout one struct per section. Every field has a
//! default, so an empty file is a valid configuration.

use std::path::PathBuf;

use glyphflash_core::config::{AssetSpec, DEFAULT_HEIGHT_SYMBOL};
use glyphflash_core::raster::{DEFAULT_BASELINE, DEFAULT_HEIGHT};
use glyphflash_hal::UartConfig;
use serde::Deserialize;

/// Font file used when none is configured
pub const DEFAULT_FONT_PATH: &str = "Roboto-Black.ttf";

/// Font size in pixels per em
pub const DEFAULT_FONT_SIZE: f32 = 40.0;

/// Whole configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub font: RawFont,
    pub raster: RawRaster,
    pub output: RawOutput,
    /// `[[asset]]` entries; `None` selects the stock asset set
    #[serde(rename = "asset")]
    pub assets: Option<Vec<AssetSpec>>,
    pub upload: RawUpload,
}

/// `[font]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawFont {
    pub path: PathBuf,
    pub size: f32,
}

impl Default for RawFont {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FONT_PATH),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

/// `[raster]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawRaster {
    pub height: u32,
    pub baseline: i32,
    pub height_symbol: String,
    pub digit_table: bool,
}

impl Default for RawRaster {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            baseline: DEFAULT_BASELINE,
            height_symbol: DEFAULT_HEIGHT_SYMBOL.to_string(),
            digit_table: true,
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOutput {
    pub path: Option<PathBuf>,
    pub preview_dir: Option<PathBuf>,
}

/// `[upload]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawUpload {
    pub enabled: bool,
    pub port: Option<String>,
    pub baud: u32,
    pub assets: Option<Vec<String>>,
    pub read_timeout_ms: Option<u64>,
}

impl Default for RawUpload {
    fn default() -> Self {
        Self {
            enabled: false,
            port: None,
            baud: UartConfig::default().baudrate,
            assets: None,
            read_timeout_ms: None,
        }
    }
}

/// Parse a configuration file
pub fn parse_config(content: &str) -> Result<RawConfig, toml::de::Error> {
    toml::from_str(content)
}
