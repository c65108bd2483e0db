//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! 8-bit pixels are packed MSB-to-LSB within each 32-bit word: pixel 0
//! of a row occupies bits 24..31 of the first word. 32-bit pixels occupy
//! a whole word.

use super::{PixelLayout, Raster, RasterMut, row_range};
use crate::color;
use crate::error::{Error, Result};

impl Raster {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds. The value is the
    /// gray level for `Gray8` and the packed word for color layouts.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; out-of-range `x` reads padding or panics.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let line = self.row_data(y);
        match self.layout() {
            PixelLayout::Gray8 => get_data_byte(line, x),
            PixelLayout::Rgb32 | PixelLayout::Bgr32 => line[x as usize],
        }
    }

    /// Get true red, green, blue values at (x, y).
    ///
    /// Honors the raster's layout, so the result is the same for an
    /// `Rgb32` raster and its `Bgr32` conversion. Gray pixels are
    /// returned as `(v, v, v)`.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y)
            .map(|pixel| pixel_to_rgb(self.layout(), pixel))
    }

    /// Copy the pixels out as interleaved 8-bit samples in storage order.
    ///
    /// Produces 1, 3 or 4 bytes per pixel according to [`Raster::spp`].
    /// This is the inverse of [`Raster::from_interleaved`].
    pub fn to_interleaved(&self) -> Vec<u8> {
        let (w, h) = self.dimensions();
        let spp = self.spp() as usize;
        let mut out = Vec::with_capacity(w as usize * h as usize * spp);
        for y in 0..h {
            for x in 0..w {
                let pixel = self.get_pixel_unchecked(x, y);
                match spp {
                    1 => out.push(pixel as u8),
                    3 => {
                        let (c0, c1, c2) = color::extract(pixel);
                        out.extend_from_slice(&[c0, c1, c2]);
                    }
                    _ => {
                        let (c0, c1, c2, a) = color::extract_with_alpha(pixel);
                        out.extend_from_slice(&[c0, c1, c2, a]);
                    }
                }
            }
        }
        out
    }
}

impl RasterMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let line = &self.data()[row_range(y, self.wpl())];
        match self.layout() {
            PixelLayout::Gray8 => get_data_byte(line, x),
            PixelLayout::Rgb32 | PixelLayout::Bgr32 => line[x as usize],
        }
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// For `Gray8` only the low byte of `val` is stored.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let layout = self.layout();
        let line = self.row_data_mut(y);
        match layout {
            PixelLayout::Gray8 => set_data_byte(line, x, val),
            PixelLayout::Rgb32 | PixelLayout::Bgr32 => line[x as usize] = val,
        }
    }
}

/// Interpret a stored pixel as true `(r, g, b)` for the given layout.
#[inline]
pub fn pixel_to_rgb(layout: PixelLayout, pixel: u32) -> (u8, u8, u8) {
    match layout {
        PixelLayout::Gray8 => {
            let v = pixel as u8;
            (v, v, v)
        }
        PixelLayout::Rgb32 => color::extract(pixel),
        PixelLayout::Bgr32 => {
            let (b, g, r) = color::extract(pixel);
            (r, g, b)
        }
    }
}

/// Get an 8-bit pixel value from a packed row.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    let shift = 24 - 8 * (x & 3);
    (line[(x >> 2) as usize] >> shift) & 0xff
}

/// Set an 8-bit pixel value in a packed row.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let shift = 24 - 8 * (x & 3);
    let word = &mut line[(x >> 2) as usize];
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}
