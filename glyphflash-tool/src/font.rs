//! TrueType font face backed by rusttype

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glyphflash_core::raster::{AlphaGrid, FontFace, RasterError, TextMetrics};
use rusttype::{point, Font, PositionedGlyph, Scale};
use thiserror::Error;

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("font data is not a TrueType or OpenType font")]
    Parse,

    #[error("font size must be a positive number, got {0}")]
    Size(f32),
}

/// A font file at a fixed pixel size
pub struct RusttypeFace {
    font: Font<'static>,
    scale: Scale,
    size: f32,
}

impl RusttypeFace {
    /// Load a font file
    ///
    /// `size` is in pixels per em, the same as a point size at 72 DPI.
    pub fn open(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, size)
    }

    /// Load a font from memory
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self, FontError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FontError::Size(size));
        }
        let font = Font::try_from_vec(data).ok_or(FontError::Parse)?;

        let v = font.v_metrics_unscaled();
        let scale = Scale::uniform(em_scale(size, v.ascent, v.descent, font.units_per_em()));

        Ok(Self { font, scale, size })
    }

    /// Pixels per em
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Number of glyphs in the font
    pub fn glyph_count(&self) -> usize {
        self.font.glyph_count()
    }

    fn layout(&self, text: &str, baseline: f32) -> Result<Vec<PositionedGlyph<'static>>, RasterError> {
        for c in text.chars() {
            if self.font.glyph(c).id().0 == 0 && !c.is_whitespace() {
                return Err(RasterError::MissingGlyph(c));
            }
        }
        Ok(self
            .font
            .layout(text, self.scale, point(0.0, baseline))
            .collect())
    }
}

impl FontFace for RusttypeFace {
    fn measure(&self, text: &str) -> Result<TextMetrics, RasterError> {
        let glyphs = self.layout(text, 0.0)?;

        let ink_right = glyphs
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .map(|bb| bb.max.x)
            .max()
            .unwrap_or(0);
        let advance = glyphs
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);

        Ok(TextMetrics {
            ink_right: ink_right as f32,
            advance,
        })
    }

    fn render(
        &self,
        text: &str,
        width: u32,
        height: u32,
        baseline: i32,
    ) -> Result<AlphaGrid, RasterError> {
        let glyphs = self.layout(text, baseline as f32)?;
        let mut grid = AlphaGrid::new(width, height);

        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    grid.blend(bb.min.x + gx as i32, bb.min.y + gy as i32, (v * 255.0) as u8);
                });
            }
        }

        Ok(grid)
    }
}

/// rusttype scale for a given em size
///
/// rusttype scales so that ascent minus descent spans the requested height,
/// while font sizes are quoted per em.
fn em_scale(size: f32, ascent: f32, descent: f32, units_per_em: u16) -> f32 {
    if units_per_em == 0 || ascent <= descent {
        return size;
    }
    size * (ascent - descent) / f32::from(units_per_em)
}
