//! Deterministic test face
//!
//! Stamps fixed alpha tables instead of rasterizing outlines, so encoder
//! results can be pinned exactly. The bottom row of each stencil sits on the
//! baseline; glyphs are placed at the integer part of the pen position.

use super::face::{FontFace, RasterError, TextMetrics};
use super::pixels::AlphaGrid;

pub(crate) struct Stencil {
    pub rows: &'static [&'static [u8]],
    pub advance: f32,
}

impl Stencil {
    fn width(&self) -> u32 {
        self.rows.first().map_or(0, |row| row.len() as u32)
    }
}

pub(crate) struct StencilFace {
    glyphs: &'static [(char, Stencil)],
}

// Partial coverage around the threshold: 201 is set, 200 is not
const ZERO: Stencil = Stencil {
    rows: &[
        &[0, 255, 255, 255, 0],
        &[255, 0, 0, 0, 255],
        &[255, 0, 0, 201, 255],
        &[255, 0, 200, 0, 255],
        &[255, 201, 0, 0, 255],
        &[255, 0, 0, 0, 255],
        &[0, 255, 255, 255, 0],
    ],
    advance: 5.5,
};

const ONE: Stencil = Stencil {
    rows: &[
        &[0, 255, 0],
        &[255, 255, 0],
        &[0, 255, 0],
        &[0, 255, 0],
        &[0, 255, 0],
        &[0, 255, 0],
        &[255, 255, 255],
    ],
    advance: 4.0,
};

const SPACE: Stencil = Stencil {
    rows: &[],
    advance: 3.0,
};

static REFERENCE: [(char, Stencil); 3] = [('0', ZERO), ('1', ONE), (' ', SPACE)];

impl StencilFace {
    /// Face with `0`, `1` and space
    pub fn reference() -> Self {
        Self {
            glyphs: &REFERENCE,
        }
    }

    fn glyph(&self, c: char) -> Result<&Stencil, RasterError> {
        self.glyphs
            .iter()
            .find(|(g, _)| *g == c)
            .map(|(_, stencil)| stencil)
            .ok_or(RasterError::MissingGlyph(c))
    }
}

impl FontFace for StencilFace {
    fn measure(&self, text: &str) -> Result<TextMetrics, RasterError> {
        let mut pen = 0.0f32;
        let mut ink_right = 0.0f32;
        for c in text.chars() {
            let glyph = self.glyph(c)?;
            if glyph.width() > 0 {
                ink_right = ink_right.max(pen as u32 as f32 + glyph.width() as f32);
            }
            pen += glyph.advance;
        }
        Ok(TextMetrics {
            ink_right,
            advance: pen,
        })
    }

    fn render(
        &self,
        text: &str,
        width: u32,
        height: u32,
        baseline: i32,
    ) -> Result<AlphaGrid, RasterError> {
        let mut grid = AlphaGrid::new(width, height);
        let mut pen = 0.0f32;
        for c in text.chars() {
            let glyph = self.glyph(c)?;
            let left = pen as i32;
            let top = baseline - glyph.rows.len() as i32 + 1;
            for (dy, row) in glyph.rows.iter().enumerate() {
                for (dx, &alpha) in row.iter().enumerate() {
                    grid.blend(left + dx as i32, top + dy as i32, alpha);
                }
            }
            pen += glyph.advance;
        }
        Ok(grid)
    }
}
