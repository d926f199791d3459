//! Configuration types
//!
//! Board-agnostic description of one generation run. The binary fills these
//! from a TOML file; tests build them directly.

pub mod types;

pub use types::*;
