//! Packed monochrome bitmap

use alloc::vec::Vec;

use super::pack::pack;
use super::pixels::PixelSource;

/// Bytes needed for one packed row of `width` pixels
pub const fn byte_width(width: u32) -> u32 {
    width.div_ceil(8)
}

/// One rendered string, packed 1 bit per pixel
///
/// `data` is row-major, top row first, `byte_width` bytes per row with the
/// MSB as the leftmost pixel. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    advance: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Binarize and pack `pixels`
    pub fn from_pixels<P: PixelSource + ?Sized>(pixels: &P, advance: u32) -> Self {
        Self {
            width: pixels.width(),
            height: pixels.height(),
            advance,
            data: pack(pixels),
        }
    }

    /// Pixel width of the rendered string's bounding box
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bytes per packed row
    pub fn byte_width(&self) -> u32 {
        byte_width(self.width)
    }

    /// Pixel height, shared by every bitmap of one run
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal advance in whole pixels
    pub fn advance(&self) -> u32 {
        self.advance
    }

    /// Packed rows
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the pixel at (`x`, `y`) is set; false outside the bitmap
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let row = y as usize * self.byte_width() as usize;
        self.data[row + (x / 8) as usize] & (0x80 >> (x % 8)) != 0
    }
}

impl PixelSource for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn alpha(&self, x: u32, y: u32) -> u8 {
        if self.pixel(x, y) {
            u8::MAX
        } else {
            0
        }
    }
}
