//! Configuration loading
//!
//! Reads `glyphflash.toml` (or the file given on the command line), applies
//! command-line overrides and validates the result. Falls back to built-in
//! defaults when no file exists.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glyphflash_core::config::{is_symbol_name, GenerationConfig};
use glyphflash_hal_serialport::default_port_name;
use thiserror::Error;
use tracing::{debug, info};

use super::toml::{parse_config, RawConfig};

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_PATH: &str = "glyphflash.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML syntax or type error
    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ::toml::de::Error,
    },

    /// One or more values failed validation
    #[error("invalid configuration:\n{}", format_problems(.0))]
    Invalid(Vec<String>),
}

fn format_problems(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[font]` after defaults
#[derive(Debug, Clone, PartialEq)]
pub struct FontSettings {
    pub path: PathBuf,
    /// Pixels per em
    pub size: f32,
}

/// `[output]` after defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSettings {
    /// Source file; stdout when `None`
    pub path: Option<PathBuf>,
    pub preview_dir: Option<PathBuf>,
}

/// `[upload]` after defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub enabled: bool,
    pub port: String,
    pub baud: u32,
    /// Assets whose data forms the payload, in send order
    pub assets: Vec<String>,
    /// `None` blocks indefinitely
    pub read_timeout: Option<Duration>,
}

/// Complete tool configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub font: FontSettings,
    pub generation: GenerationConfig,
    pub output: OutputSettings,
    pub upload: UploadSettings,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}

impl ToolConfig {
    /// Fill in defaults for everything the file left out
    pub fn from_raw(raw: RawConfig) -> Self {
        let mut generation = GenerationConfig {
            height: raw.raster.height,
            baseline: raw.raster.baseline,
            height_symbol: raw.raster.height_symbol,
            digit_table: raw.raster.digit_table,
            ..GenerationConfig::default()
        };
        if let Some(assets) = raw.assets {
            generation.assets = assets;
        }

        Self {
            font: FontSettings {
                path: raw.font.path,
                size: raw.font.size,
            },
            generation,
            output: OutputSettings {
                path: raw.output.path,
                preview_dir: raw.output.preview_dir,
            },
            upload: UploadSettings {
                enabled: raw.upload.enabled,
                port: raw
                    .upload
                    .port
                    .unwrap_or_else(|| default_port_name().to_string()),
                baud: raw.upload.baud,
                assets: raw
                    .upload
                    .assets
                    .unwrap_or_else(GenerationConfig::digit_names),
                read_timeout: raw.upload.read_timeout_ms.map(Duration::from_millis),
            },
        }
    }

    /// Parse file contents; `origin` is only used in error messages
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(Self::from_raw(raw))
    }

    /// Check every value, reporting all problems at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(self.font.size.is_finite() && self.font.size > 0.0) {
            errors.push(format!(
                "[font] size must be a positive number, got {}",
                self.font.size
            ));
        }

        if self.generation.height == 0 {
            errors.push("[raster] height must be greater than 0".to_string());
        }
        if !is_symbol_name(&self.generation.height_symbol) {
            errors.push(format!(
                "[raster] height_symbol '{}' is not an upper-case C identifier",
                self.generation.height_symbol
            ));
        }

        let mut seen = HashSet::new();
        for asset in &self.generation.assets {
            if !is_symbol_name(&asset.name) {
                errors.push(format!(
                    "[[asset]] name '{}' must match [A-Z_][A-Z0-9_]*",
                    asset.name
                ));
            }
            if !seen.insert(asset.name.as_str()) {
                errors.push(format!("[[asset]] name '{}' is used more than once", asset.name));
            }
        }

        if self.upload.baud == 0 {
            errors.push("[upload] baud must be greater than 0".to_string());
        }
        if self.upload.port.is_empty() {
            errors.push("[upload] port must not be empty".to_string());
        }
        // Payload assets only matter when the upload stage runs
        if self.upload.enabled {
            for name in &self.upload.assets {
                if self.generation.asset(name).is_none() {
                    errors.push(format!("[upload] assets names unknown asset '{}'", name));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub font_path: Option<PathBuf>,
    pub font_size: Option<f32>,
    pub output_path: Option<PathBuf>,
    pub preview_dir: Option<PathBuf>,
    /// Only ever switches upload on
    pub upload: bool,
    pub port: Option<String>,
    pub baud: Option<u32>,
}

impl ConfigOverrides {
    /// Apply to `config`
    pub fn apply(self, config: &mut ToolConfig) {
        if let Some(path) = self.font_path {
            config.font.path = path;
        }
        if let Some(size) = self.font_size {
            config.font.size = size;
        }
        if let Some(path) = self.output_path {
            config.output.path = Some(path);
        }
        if let Some(dir) = self.preview_dir {
            config.output.preview_dir = Some(dir);
        }
        if self.upload {
            config.upload.enabled = true;
        }
        if let Some(port) = self.port {
            config.upload.port = port;
        }
        if let Some(baud) = self.baud {
            config.upload.baud = baud;
        }
    }
}

/// Load, override and validate the configuration
///
/// An explicit `path` must exist. Without one, `glyphflash.toml` in the
/// working directory is used if present, else the built-in defaults.
pub fn load_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ToolConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                read_config(fallback)?
            } else {
                debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                ToolConfig::default()
            }
        }
    };

    overrides.apply(&mut config);
    config.validate()?;

    log_config_summary(&config);
    Ok(config)
}

fn read_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes of TOML from {}", content.len(), path.display());
    ToolConfig::from_toml_str(&content, path)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ToolConfig) {
    info!("Configuration loaded successfully");
    debug!("  font {} at {}px", config.font.path.display(), config.font.size);
    debug!(
        "  height {} (baseline {})",
        config.generation.height, config.generation.baseline
    );
    debug!("  {} assets", config.generation.assets.len());
    match &config.output.path {
        Some(path) => debug!("  output {}", path.display()),
        None => debug!("  output to stdout"),
    }
    if let Some(dir) = &config.output.preview_dir {
        debug!("  previews in {}", dir.display());
    }
    if config.upload.enabled {
        debug!(
            "  upload {} assets to {} at {} baud",
            config.upload.assets.len(),
            config.upload.port,
            config.upload.baud
        );
    }
}
