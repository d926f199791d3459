//! String encoder
//!
//! Ties a face and a fixed height together and turns strings into packed
//! bitmaps.

use core::num::NonZeroU32;

use super::bitmap::Bitmap;
use super::face::{FontFace, RasterError};
use super::pixels::PixelSource;

/// Bitmap height used when none is configured
pub const DEFAULT_HEIGHT: u32 = 31;

/// Pen y position used when none is configured
pub const DEFAULT_BASELINE: i32 = 30;

/// Widest row the encoder will pack
const MAX_WIDTH: f32 = u16::MAX as f32;

/// Immutable encoder settings shared by every string of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RasterConfig {
    height: NonZeroU32,
    baseline: i32,
}

impl RasterConfig {
    /// Create a config; `height` must be non-zero
    pub fn new(height: u32, baseline: i32) -> Result<Self, RasterError> {
        let height = NonZeroU32::new(height).ok_or(RasterError::ZeroHeight)?;
        Ok(Self { height, baseline })
    }

    /// Bitmap height in pixels
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Pen y position, in pixels from the top row
    pub fn baseline(&self) -> i32 {
        self.baseline
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            height: NonZeroU32::MIN.saturating_add(DEFAULT_HEIGHT - 1),
            baseline: DEFAULT_BASELINE,
        }
    }
}

/// Encodes strings with one face at one height
#[derive(Debug, Clone)]
pub struct RasterEncoder<F> {
    face: F,
    config: RasterConfig,
}

impl<F: FontFace> RasterEncoder<F> {
    /// Create an encoder
    pub fn new(face: F, config: RasterConfig) -> Self {
        Self { face, config }
    }

    /// Render, binarize and pack `text`
    ///
    /// The width is the ink extent measured from the pen origin, rounded up
    /// to whole pixels; the advance is rounded up the same way.
    pub fn encode(&self, text: &str) -> Result<Bitmap, RasterError> {
        let metrics = self.face.measure(text)?;
        let width = whole_pixels(metrics.ink_right)?;
        let advance = whole_pixels(metrics.advance)?;
        let height = self.config.height();

        let grid = self.face.render(text, width, height, self.config.baseline)?;
        if grid.width() != width || grid.height() != height {
            return Err(RasterError::GridMismatch {
                expected: (width, height),
                actual: (grid.width(), grid.height()),
            });
        }

        Ok(Bitmap::from_pixels(&grid, advance))
    }
}

/// Encode `text` with `face` at `height`, using the default baseline
pub fn encode<F: FontFace + ?Sized>(text: &str, face: &F, height: u32) -> Result<Bitmap, RasterError> {
    let config = RasterConfig::new(height, DEFAULT_BASELINE)?;
    RasterEncoder::new(face, config).encode(text)
}

/// Round a fractional pixel extent up to whole pixels
fn whole_pixels(extent: f32) -> Result<u32, RasterError> {
    if !extent.is_finite() || extent > MAX_WIDTH {
        return Err(RasterError::TooWide { width: extent });
    }
    if extent <= 0.0 {
        return Ok(0);
    }
    let truncated = extent as u32;
    Ok(if (truncated as f32) < extent {
        truncated + 1
    } else {
        truncated
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::pixels::AlphaGrid;
    use crate::raster::stencil::StencilFace;
    use crate::raster::TextMetrics;
    use proptest::prelude::*;
    use std::string::String;

    fn encoder() -> RasterEncoder<StencilFace> {
        RasterEncoder::new(StencilFace::reference(), RasterConfig::new(8, 6).unwrap())
    }

    #[test]
    fn test_golden_zero() {
        let bitmap = encoder().encode("0").unwrap();

        assert_eq!(bitmap.byte_width(), 1);
        assert_eq!(bitmap.advance(), 6);
        assert_eq!(
            bitmap.data(),
            &[0x70, 0x88, 0x98, 0x88, 0xC8, 0x88, 0x70, 0x00]
        );
    }

    #[test]
    fn test_two_glyphs_span_two_bytes() {
        let bitmap = encoder().encode("10").unwrap();

        assert_eq!(bitmap.width(), 9);
        assert_eq!(bitmap.byte_width(), 2);
        assert_eq!(bitmap.advance(), 10);
        assert_eq!(bitmap.data().len(), 16);
        assert_eq!(&bitmap.data()[0..2], &[0x47, 0x00]);
        assert_eq!(&bitmap.data()[12..14], &[0xE7, 0x00]);
        assert_eq!(&bitmap.data()[14..16], &[0x00, 0x00]);
    }

    #[test]
    fn test_blank_string_has_no_columns() {
        let bitmap = encoder().encode(" ").unwrap();
        assert_eq!(bitmap.width(), 0);
        assert_eq!(bitmap.byte_width(), 0);
        assert!(bitmap.data().is_empty());
        assert_eq!(bitmap.advance(), 3);
    }

    #[test]
    fn test_empty_string() {
        let bitmap = encoder().encode("").unwrap();
        assert!(bitmap.data().is_empty());
        assert_eq!(bitmap.advance(), 0);
    }

    #[test]
    fn test_missing_glyph_fails() {
        assert_eq!(
            encoder().encode("01x"),
            Err(RasterError::MissingGlyph('x'))
        );
    }

    #[test]
    fn test_zero_height_rejected() {
        assert_eq!(RasterConfig::new(0, 0), Err(RasterError::ZeroHeight));
        assert_eq!(
            encode("0", &StencilFace::reference(), 0),
            Err(RasterError::ZeroHeight)
        );
    }

    #[test]
    fn test_default_config() {
        let config = RasterConfig::default();
        assert_eq!(config.height(), DEFAULT_HEIGHT);
        assert_eq!(config.baseline(), DEFAULT_BASELINE);
    }

    #[test]
    fn test_free_function_uses_default_baseline() {
        let bitmap = encode("1", &StencilFace::reference(), 31).unwrap();
        assert_eq!(bitmap.height(), 31);
        // Bottom row of the stencil lands on row 30
        assert!(bitmap.pixel(0, 30));
        assert!(!bitmap.pixel(0, 23));
        assert!(bitmap.pixel(1, 24));
    }

    #[test]
    fn test_glyphs_below_grid_are_clipped() {
        let encoder = RasterEncoder::new(StencilFace::reference(), RasterConfig::new(3, 12).unwrap());
        let bitmap = encoder.encode("1").unwrap();
        assert_eq!(bitmap.data(), &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_whole_pixels_rounds_up() {
        assert_eq!(whole_pixels(0.0), Ok(0));
        assert_eq!(whole_pixels(-2.5), Ok(0));
        assert_eq!(whole_pixels(4.0), Ok(4));
        assert_eq!(whole_pixels(4.01), Ok(5));
        assert!(whole_pixels(f32::NAN).is_err());
        assert!(whole_pixels(1.0e9).is_err());
    }

    struct WrongSizeFace;

    impl FontFace for WrongSizeFace {
        fn measure(&self, _text: &str) -> Result<TextMetrics, RasterError> {
            Ok(TextMetrics {
                ink_right: 4.0,
                advance: 4.0,
            })
        }

        fn render(&self, _: &str, _: u32, height: u32, _: i32) -> Result<AlphaGrid, RasterError> {
            Ok(AlphaGrid::new(3, height))
        }
    }

    #[test]
    fn test_grid_size_is_checked() {
        let encoder = RasterEncoder::new(WrongSizeFace, RasterConfig::new(2, 1).unwrap());
        assert_eq!(
            encoder.encode("a"),
            Err(RasterError::GridMismatch {
                expected: (4, 2),
                actual: (3, 2)
            })
        );
    }

    proptest! {
        #[test]
        fn prop_layout_invariants(
            text in "[01 ]{0,12}",
            height in 1u32..40,
            baseline in -4i32..44,
        ) {
            let encoder = RasterEncoder::new(
                StencilFace::reference(),
                RasterConfig::new(height, baseline).unwrap(),
            );
            let first = encoder.encode(&text).unwrap();
            let second = encoder.encode(&text).unwrap();

            prop_assert_eq!(first.byte_width(), (first.width() + 7) / 8);
            prop_assert_eq!(first.data().len(), (first.byte_width() * height) as usize);
            prop_assert_eq!(&first, &second);

            let inked: String = text.chars().filter(|c| *c != ' ').collect();
            if inked.is_empty() {
                prop_assert_eq!(first.width(), 0);
            }
        }
    }
}
