//! Font face seam
//!
//! Parsing and rasterizing outlines is left to a font library; the encoder
//! only needs metrics and a coverage grid.

use core::fmt;

use super::pixels::AlphaGrid;

/// Horizontal metrics of a laid-out string, in fractional pixels
///
/// Both values are measured from the pen origin at x = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Right edge of the inked area
    pub ink_right: f32,
    /// Distance to the next pen position
    pub advance: f32,
}

/// A font at a fixed size
pub trait FontFace {
    /// Measure `text` laid out from the origin
    fn measure(&self, text: &str) -> Result<TextMetrics, RasterError>;

    /// Render `text` into a `width` × `height` coverage grid
    ///
    /// The pen starts at (0, `baseline`); anything outside the grid is
    /// clipped.
    fn render(
        &self,
        text: &str,
        width: u32,
        height: u32,
        baseline: i32,
    ) -> Result<AlphaGrid, RasterError>;
}

impl<F: FontFace + ?Sized> FontFace for &F {
    fn measure(&self, text: &str) -> Result<TextMetrics, RasterError> {
        (**self).measure(text)
    }

    fn render(
        &self,
        text: &str,
        width: u32,
        height: u32,
        baseline: i32,
    ) -> Result<AlphaGrid, RasterError> {
        (**self).render(text, width, height, baseline)
    }
}

/// Errors that can occur while encoding a string
#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    /// Requested height was zero
    ZeroHeight,
    /// The face has no glyph for this character
    MissingGlyph(char),
    /// Measured width does not fit a packed row
    TooWide { width: f32 },
    /// Face returned a grid of the wrong size
    GridMismatch { expected: (u32, u32), actual: (u32, u32) },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHeight => f.write_str("bitmap height must be greater than zero"),
            Self::MissingGlyph(c) => write!(f, "font has no glyph for {:?}", c),
            Self::TooWide { width } => write!(f, "rendered width {} px is too wide", width),
            Self::GridMismatch { expected, actual } => write!(
                f,
                "face rendered a {}x{} grid, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl core::error::Error for RasterError {}
