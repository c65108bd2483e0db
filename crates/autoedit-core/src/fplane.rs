//! FPlane - Floating-point image plane
//!
//! `FPlane` is a 2D array of `f32` values used for intermediate results
//! that do not fit in 8 bits: Laplacian responses, Lab channels, filter
//! accumulators.
//!
//! # Examples
//!
//! ```
//! use autoedit_core::FPlane;
//!
//! let mut plane = FPlane::new(4, 3).unwrap();
//! plane.set_pixel(1, 2, 0.5).unwrap();
//! assert_eq!(plane.get_pixel(1, 2).unwrap(), 0.5);
//! assert_eq!(plane.transpose().dimensions(), (3, 4));
//! ```

use crate::error::{Error, Result};
use crate::raster::{PixelLayout, Raster};

/// Floating-point image plane
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPlane {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f32>,
}

impl FPlane {
    /// Create a new plane with all values set to zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new plane with all values set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(FPlane {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        })
    }

    /// Create a plane from row-major data.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferSize` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(FPlane {
            width,
            height,
            data,
        })
    }

    /// Create a plane holding the intensities of a `Gray8` raster.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedLayout` for color rasters.
    pub fn from_gray(raster: &Raster) -> Result<Self> {
        if raster.layout() != PixelLayout::Gray8 {
            return Err(Error::UnsupportedLayout(raster.layout()));
        }
        let (w, h) = raster.dimensions();
        let mut data = Vec::with_capacity(w as usize * h as usize);
        for y in 0..h {
            for x in 0..w {
                data.push(raster.get_pixel_unchecked(x, y) as f32);
            }
        }
        Self::from_data(w, h, data)
    }

    /// Get the width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get a value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        self.check_bounds(x, y)?;
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set a value at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        self.check_bounds(x, y)?;
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Get a value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Set a value without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx] = value;
    }

    /// Get the raw data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get the raw data mutably.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Get one row mutably.
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        let start = (y as usize) * (self.width as usize);
        let w = self.width as usize;
        &mut self.data[start..start + w]
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> FPlane {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut data = vec![0.0f32; w * h];
        for y in 0..h {
            for x in 0..w {
                data[x * h + y] = self.data[y * w + x];
            }
        }
        FPlane {
            width: self.height,
            height: self.width,
            data,
        }
    }

    /// Arithmetic mean, accumulated in `f64`.
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        sum / self.data.len() as f64
    }

    /// Population variance, accumulated in `f64`.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        let ss: f64 = self
            .data
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum();
        ss / self.data.len() as f64
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        Ok(())
    }
}
