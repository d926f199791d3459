//! Binarization and 1-bit packing

use alloc::vec::Vec;

use super::bitmap::byte_width;
use super::pixels::PixelSource;

/// Alpha above which a pixel is set
pub const ALPHA_THRESHOLD: u8 = 200;

/// Decide whether a pixel with this alpha is set
#[inline]
pub const fn binarize(alpha: u8) -> bool {
    alpha > ALPHA_THRESHOLD
}

/// Pack a pixel source into 1-bit rows
///
/// Rows are emitted top to bottom, bytes left to right, and bit 7 of each
/// byte is the leftmost pixel of its group. Columns past the source width
/// are zero.
pub fn pack<P: PixelSource + ?Sized>(pixels: &P) -> Vec<u8> {
    let width = pixels.width();
    let height = pixels.height();
    let row_bytes = byte_width(width);

    let mut data = Vec::with_capacity(row_bytes as usize * height as usize);
    for y in 0..height {
        for group in 0..row_bytes {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = group * 8 + bit;
                if x < width && binarize(pixels.alpha(x, y)) {
                    byte |= 0x80 >> bit;
                }
            }
            data.push(byte);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::pixels::AlphaGrid;
    use proptest::prelude::*;
    use std::vec::Vec as StdVec;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!binarize(0));
        assert!(!binarize(200));
        assert!(binarize(201));
        assert!(binarize(255));
    }

    #[test]
    fn test_msb_is_leftmost() {
        let grid = AlphaGrid::from_fn(8, 1, |x, _| if x == 0 { 255 } else { 0 });
        assert_eq!(pack(&grid), [0x80]);

        let grid = AlphaGrid::from_fn(8, 1, |x, _| if x == 7 { 255 } else { 0 });
        assert_eq!(pack(&grid), [0x01]);
    }

    #[test]
    fn test_padding_bits_are_zero() {
        // 9 columns, all opaque: second byte carries one pixel and 7 pad bits
        let grid = AlphaGrid::from_fn(9, 2, |_, _| 255);
        assert_eq!(pack(&grid), [0xFF, 0x80, 0xFF, 0x80]);
    }

    #[test]
    fn test_zero_width_packs_nothing() {
        let grid = AlphaGrid::new(0, 31);
        assert!(pack(&grid).is_empty());
    }

    #[test]
    fn test_pack_does_not_touch_source() {
        let grid = AlphaGrid::from_fn(4, 4, |x, y| (x * 60 + y) as u8);
        let before = grid.clone();
        let _ = pack(&grid);
        assert_eq!(grid, before);
    }

    proptest! {
        #[test]
        fn prop_bits_match_threshold(
            width in 0u32..40,
            height in 1u32..12,
            seed in proptest::collection::vec(any::<u8>(), 480),
        ) {
            let grid = AlphaGrid::from_fn(width, height, |x, y| seed[(y * 40 + x) as usize]);
            let data = pack(&grid);
            let row_bytes = byte_width(width) as usize;

            prop_assert_eq!(row_bytes, (width as usize + 7) / 8);
            prop_assert_eq!(data.len(), row_bytes * height as usize);

            for y in 0..height {
                for x in 0..row_bytes as u32 * 8 {
                    let byte = data[y as usize * row_bytes + (x / 8) as usize];
                    let bit = byte & (0x80 >> (x % 8)) != 0;
                    if x < width {
                        prop_assert_eq!(bit, grid.alpha(x, y) > 200);
                    } else {
                        prop_assert!(!bit);
                    }
                }
            }
        }

        #[test]
        fn prop_pack_is_deterministic(
            width in 0u32..24,
            height in 1u32..8,
            seed in proptest::collection::vec(any::<u8>(), 192),
        ) {
            let grid = AlphaGrid::from_fn(width, height, |x, y| seed[(y * 24 + x) as usize]);
            let first: StdVec<u8> = pack(&grid);
            let second: StdVec<u8> = pack(&grid);
            prop_assert_eq!(first, second);
        }
    }
}
