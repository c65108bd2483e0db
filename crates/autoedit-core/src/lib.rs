//! autoedit-core - Basic data structures for the enhancement pipeline
//!
//! This crate provides the fundamental data structures used throughout
//! the autoedit workspace:
//!
//! - [`Raster`] / [`RasterMut`] - The main image container (immutable / mutable)
//! - [`PixelLayout`] - Explicit pixel layout tag (`Gray8`, `Rgb32`, `Bgr32`)
//! - [`FPlane`] - Single-channel floating-point plane for intermediate results
//! - [`GrayStats`] - Mean and standard deviation of a grayscale raster

pub mod error;
pub mod fplane;
pub mod raster;

pub use error::{Error, Result};
pub use fplane::FPlane;
pub use raster::statistics::GrayStats;
pub use raster::{PixelLayout, Raster, RasterMut};

/// Channel slot helpers for 32-bit color pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xAABBCCDD` where `AA` is slot 0 (MSB),
/// `BB` slot 1, `CC` slot 2 and `DD` the alpha byte (LSB). Which color a
/// slot holds depends on the raster's [`PixelLayout`]: slot 0 is red for
/// `Rgb32` and blue for `Bgr32`. Slot 1 is always green.
pub mod color {
    /// Shift amounts for extracting channel slots
    pub const SLOT0_SHIFT: u32 = 24;
    pub const SLOT1_SHIFT: u32 = 16;
    pub const SLOT2_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// ITU-R BT.601 luma weights in 16-bit fixed point.
    pub const LUMA_RED: u32 = 19595;
    pub const LUMA_GREEN: u32 = 38470;
    pub const LUMA_BLUE: u32 = 7471;

    /// Extract slot 0 from a 32-bit pixel.
    #[inline]
    pub fn slot0(pixel: u32) -> u8 {
        ((pixel >> SLOT0_SHIFT) & 0xff) as u8
    }

    /// Extract slot 1 (green in both color layouts).
    #[inline]
    pub fn slot1(pixel: u32) -> u8 {
        ((pixel >> SLOT1_SHIFT) & 0xff) as u8
    }

    /// Extract slot 2 from a 32-bit pixel.
    #[inline]
    pub fn slot2(pixel: u32) -> u8 {
        ((pixel >> SLOT2_SHIFT) & 0xff) as u8
    }

    /// Extract the alpha byte.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque 32-bit pixel from three channel slots.
    #[inline]
    pub fn compose(c0: u8, c1: u8, c2: u8) -> u32 {
        compose_with_alpha(c0, c1, c2, 255)
    }

    /// Compose a 32-bit pixel from three channel slots and alpha.
    #[inline]
    pub fn compose_with_alpha(c0: u8, c1: u8, c2: u8, a: u8) -> u32 {
        ((c0 as u32) << SLOT0_SHIFT)
            | ((c1 as u32) << SLOT1_SHIFT)
            | ((c2 as u32) << SLOT2_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract the three channel slots in storage order.
    #[inline]
    pub fn extract(pixel: u32) -> (u8, u8, u8) {
        (slot0(pixel), slot1(pixel), slot2(pixel))
    }

    /// Extract the three channel slots and alpha in storage order.
    #[inline]
    pub fn extract_with_alpha(pixel: u32) -> (u8, u8, u8, u8) {
        (slot0(pixel), slot1(pixel), slot2(pixel), alpha(pixel))
    }

    /// Exchange slot 0 and slot 2, leaving green and alpha in place.
    ///
    /// This is the whole difference between `Rgb32` and `Bgr32` storage.
    #[inline]
    pub fn swap_outer(pixel: u32) -> u32 {
        let (c0, c1, c2, a) = extract_with_alpha(pixel);
        compose_with_alpha(c2, c1, c0, a)
    }

    /// BT.601 luma of an RGB triple, rounded to nearest.
    #[inline]
    pub fn luma(r: u8, g: u8, b: u8) -> u8 {
        let sum = r as u32 * LUMA_RED + g as u32 * LUMA_GREEN + b as u32 * LUMA_BLUE + 0x8000;
        (sum >> 16) as u8
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let p = compose_with_alpha(10, 20, 30, 40);
            assert_eq!(extract_with_alpha(p), (10, 20, 30, 40));
            assert_eq!(alpha(compose(1, 2, 3)), 255);
        }

        #[test]
        fn test_swap_outer() {
            let p = compose_with_alpha(1, 2, 3, 4);
            assert_eq!(extract_with_alpha(swap_outer(p)), (3, 2, 1, 4));
            assert_eq!(swap_outer(swap_outer(p)), p);
        }

        #[test]
        fn test_luma_extremes() {
            assert_eq!(luma(0, 0, 0), 0);
            assert_eq!(luma(255, 255, 255), 255);
            assert_eq!(luma(100, 100, 100), 100);
        }

        #[test]
        fn test_luma_weights() {
            // 0.299 * 255 = 76.2
            assert_eq!(luma(255, 0, 0), 76);
            // 0.587 * 255 = 149.7
            assert_eq!(luma(0, 255, 0), 150);
            // 0.114 * 255 = 29.1
            assert_eq!(luma(0, 0, 255), 29);
        }
    }
}
