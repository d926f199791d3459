//! Firmware source emission
//!
//! Produces C declarations for the target's program memory. Output depends
//! only on the inputs, so regenerated assets diff cleanly.
//!
//! ```text
//! const int DIGIT_0_BYTE_WIDTH = 3;
//! const int DIGIT_0_ADVANCE = 23;
//! const unsigned char DIGIT_0_DATA[93] PROGMEM = {
//! 0x00,0x00,...16 per line...,
//! 0x00,0x00};
//! Element DIGIT_0{DIGIT_0_BYTE_WIDTH, DIGIT_0_ADVANCE, DIGIT_0_DATA};
//! ```

use alloc::string::String;
use core::fmt::Write;

use crate::config::{GenerationConfig, DIGIT_TABLE};
use crate::generate::RenderedAsset;
use crate::raster::Bitmap;

/// Values per line in emitted byte arrays
pub const VALUES_PER_LINE: usize = 16;

/// Aggregate type every asset is bound to
pub const ELEMENT_TYPE: &str = "Element";

/// Shared height constant and the aggregate type declaration
pub fn emit_prelude(height_symbol: &str, height: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "const int {} = {};", height_symbol, height);
    let _ = writeln!(
        out,
        "struct {} {{int byte_width; int advance; const unsigned char* data;}};",
        ELEMENT_TYPE
    );
    out.push('\n');
    out
}

/// Program-memory byte array named `name`
pub fn emit_byte_array(name: &str, bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 5 + 64);
    let _ = writeln!(
        out,
        "const unsigned char {}[{}] PROGMEM = {{",
        name,
        bytes.len()
    );
    for (i, byte) in bytes.iter().enumerate() {
        let _ = write!(out, "0x{:02x}", byte);
        if i != bytes.len() - 1 {
            out.push(',');
        }
        if i % VALUES_PER_LINE == VALUES_PER_LINE - 1 {
            out.push('\n');
        }
    }
    out.push_str("};\n");
    out
}

/// Constants, data array and aggregate instance for one asset
pub fn emit(name: &str, bitmap: &Bitmap) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "const int {}_BYTE_WIDTH = {};", name, bitmap.byte_width());
    let _ = writeln!(out, "const int {}_ADVANCE = {};", name, bitmap.advance());
    out.push_str(&emit_byte_array(&data_symbol(name), bitmap.data()));
    let _ = writeln!(
        out,
        "{ty} {n}{{{n}_BYTE_WIDTH, {n}_ADVANCE, {n}_DATA}};",
        ty = ELEMENT_TYPE,
        n = name
    );
    out.push('\n');
    out
}

/// Lookup table of aggregate instances, in the given order
pub fn emit_table<S: AsRef<str>>(table: &str, members: &[S]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "const {} {}[] = {{", ELEMENT_TYPE, table);
    out.push_str("  ");
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(member.as_ref());
    }
    out.push_str("\n};\n");
    out
}

/// Complete source file for a rendered asset set
///
/// Assets appear in the order given. The digit table is appended when the
/// config asks for it and every digit from 0 to 9 was rendered.
pub fn emit_document(config: &GenerationConfig, assets: &[RenderedAsset]) -> String {
    let mut out = emit_prelude(&config.height_symbol, config.height);
    for asset in assets {
        out.push_str(&emit(&asset.name, &asset.bitmap));
    }

    if config.digit_table {
        let digits = GenerationConfig::digit_names();
        let complete = digits
            .iter()
            .all(|d| assets.iter().any(|a| &a.name == d));
        if complete {
            out.push_str(&emit_table(DIGIT_TABLE, digits.as_slice()));
        }
    }
    out
}

fn data_symbol(name: &str) -> String {
    let mut symbol = String::with_capacity(name.len() + 5);
    symbol.push_str(name);
    symbol.push_str("_DATA");
    symbol
}
