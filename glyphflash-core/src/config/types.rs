//! Configuration type definitions

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::raster::{DEFAULT_BASELINE, DEFAULT_HEIGHT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symbol of the shared height constant
pub const DEFAULT_HEIGHT_SYMBOL: &str = "DIGIT_HEIGHT";

/// Name of the emitted digit lookup table
pub const DIGIT_TABLE: &str = "DIGITS";

/// One string to render, and the symbol prefix it is emitted under
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetSpec {
    /// Upper-case C identifier, e.g. `DIGIT_0`
    pub name: String,
    /// Text handed to the font face
    pub text: String,
}

impl AssetSpec {
    /// Create an asset
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Asset for a single decimal digit
    pub fn digit(digit: u8) -> Self {
        Self::new(digit_name(digit), digit.to_string())
    }
}

/// Symbol prefix of a digit asset
pub fn digit_name(digit: u8) -> String {
    format!("DIGIT_{}", digit)
}

/// Check that `name` is a C identifier in upper case
pub fn is_symbol_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Everything needed to render and emit one asset set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Pixel height of every bitmap
    pub height: u32,
    /// Pen y position, in pixels from the top row
    pub baseline: i32,
    /// Symbol of the shared height constant
    pub height_symbol: String,
    /// Emit the `DIGITS` lookup table when all ten digits are present
    pub digit_table: bool,
    /// Assets in emission order
    pub assets: Vec<AssetSpec>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            baseline: DEFAULT_BASELINE,
            height_symbol: DEFAULT_HEIGHT_SYMBOL.to_string(),
            digit_table: true,
            assets: default_assets(),
        }
    }
}

impl GenerationConfig {
    /// Look up an asset by symbol name
    pub fn asset(&self, name: &str) -> Option<&AssetSpec> {
        self.assets.iter().find(|a| a.name == name)
    }

    /// Names of the digit assets, `DIGIT_0` through `DIGIT_9`
    pub fn digit_names() -> Vec<String> {
        (0..10).map(digit_name).collect()
    }
}

/// The stock clock/battery face asset set
pub fn default_assets() -> Vec<AssetSpec> {
    let mut assets: Vec<AssetSpec> = (0..10).map(AssetSpec::digit).collect();
    assets.extend([
        AssetSpec::new("MINS", "mins"),
        AssetSpec::new("SEP", " - "),
        AssetSpec::new("COLON", ":"),
        AssetSpec::new("STATUS", "Status:"),
        AssetSpec::new("BATT", "Batt "),
        AssetSpec::new("PERCENT", "%"),
    ]);
    assets
}
