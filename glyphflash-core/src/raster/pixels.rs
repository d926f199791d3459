//! Pixel sources
//!
//! A pixel source exposes one alpha value per pixel. Faces render into an
//! [`AlphaGrid`]; a packed [`Bitmap`](super::Bitmap) is itself a source of
//! fully opaque or fully clear pixels.

use alloc::vec;
use alloc::vec::Vec;

/// Read-only access to per-pixel alpha coverage
pub trait PixelSource {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Alpha of the pixel at (`x`, `y`), 0 = clear, 255 = opaque
    ///
    /// Only called with coordinates inside the source.
    fn alpha(&self, x: u32, y: u32) -> u8;
}

/// Owned grid of alpha values, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaGrid {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaGrid {
    /// Create a fully clear grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    /// Build a grid from a function of the pixel position
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let i = grid.index(x, y);
                grid.alpha[i] = f(x, y);
            }
        }
        grid
    }

    /// Composite `coverage` over the pixel at (`x`, `y`)
    ///
    /// Uses the "over" operator, so overlapping glyph edges accumulate the
    /// way they do when drawn onto a canvas. Positions outside the grid are
    /// clipped.
    pub fn blend(&mut self, x: i32, y: i32, coverage: u8) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = self.index(x as u32, y as u32);
        let dst = self.alpha[i] as u16;
        let src = coverage as u16;
        let out = src + (dst * (255 - src) + 127) / 255;
        self.alpha[i] = out.min(255) as u8;
    }

    /// Raw alpha values, row-major
    pub fn as_slice(&self) -> &[u8] {
        &self.alpha
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSource for AlphaGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn alpha(&self, x: u32, y: u32) -> u8 {
        self.alpha[self.index(x, y)]
    }
}
