//! Configuration loading and parsing
//!
//! Loads `glyphflash.toml` or built-in defaults, then layers command-line
//! overrides on top.

pub mod loader;
pub mod toml;

pub use loader::{load_config, ConfigOverrides, OutputSettings, ToolConfig, UploadSettings};
