//! Board-agnostic core logic for glyphflash
//!
//! This crate contains everything that does not touch a real font file,
//! file system or serial port:
//!
//! - Glyph rasterization seam and 1-bit packing
//! - Firmware source emission
//! - Generation configuration types
//! - Upload driver over the `glyphflash-hal` link traits

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod emit;
pub mod generate;
pub mod raster;
pub mod upload;

pub use config::{AssetSpec, GenerationConfig};
pub use generate::{render_assets, upload_payload, AssetError, RenderedAsset};
pub use raster::{encode, Bitmap, FontFace, RasterConfig, RasterEncoder, RasterError};
pub use upload::{upload, MonitorEnd, UploadError, UploadObserver, UploadReport};
