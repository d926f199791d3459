//! Glyph rasterization and packing
//!
//! Encoding is split into two stages that can be tested on their own:
//!
//! 1. A [`FontFace`] measures a string and renders it into an
//!    [`AlphaGrid`] of coverage values.
//! 2. [`pack`] binarizes that grid against [`ALPHA_THRESHOLD`] and packs
//!    it into 1-bit rows, producing a [`Bitmap`].
//!
//! The grid is never modified after rendering.

pub mod bitmap;
pub mod encoder;
pub mod face;
pub mod pack;
pub mod pixels;

#[cfg(test)]
pub(crate) mod stencil;

pub use bitmap::{byte_width, Bitmap};
pub use encoder::{encode, RasterConfig, RasterEncoder, DEFAULT_BASELINE, DEFAULT_HEIGHT};
pub use face::{FontFace, RasterError, TextMetrics};
pub use pack::{binarize, pack, ALPHA_THRESHOLD};
pub use pixels::{AlphaGrid, PixelSource};
