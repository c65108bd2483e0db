//! Image statistics operations
//!
//! - Intensity histogram of a gray raster
//! - Mean and population standard deviation of gray intensity
//! - Mean luma of any raster

use super::{PixelLayout, Raster, access::pixel_to_rgb};
use crate::color;
use crate::error::{Error, Result};

/// First and second moments of a gray raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayStats {
    /// Arithmetic mean intensity, 0..=255
    pub mean: f64,
    /// Population standard deviation of intensity
    pub stdev: f64,
}

impl Raster {
    /// Compute the 256-bin intensity histogram of a `Gray8` raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLayout`] for color rasters.
    pub fn gray_histogram(&self) -> Result<[u64; 256]> {
        if self.layout() != PixelLayout::Gray8 {
            return Err(Error::UnsupportedLayout(self.layout()));
        }
        let mut hist = [0u64; 256];
        for y in 0..self.height() {
            for x in 0..self.width() {
                hist[self.get_pixel_unchecked(x, y) as usize] += 1;
            }
        }
        Ok(hist)
    }

    /// Compute mean and population standard deviation of a `Gray8` raster.
    ///
    /// Both moments are accumulated from the histogram, so the sum is
    /// exact and the result does not depend on pixel visiting order.
    pub fn gray_stats(&self) -> Result<GrayStats> {
        let hist = self.gray_histogram()?;
        let n = self.width() as f64 * self.height() as f64;

        let sum: u64 = hist.iter().enumerate().map(|(v, &c)| v as u64 * c).sum();
        let mean = sum as f64 / n;
        let var = hist
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(v, &c)| {
                let d = v as f64 - mean;
                d * d * c as f64
            })
            .sum::<f64>()
            / n;

        Ok(GrayStats {
            mean,
            stdev: var.sqrt(),
        })
    }

    /// Mean BT.601 luma over all pixels, for any layout.
    pub fn luma_mean(&self) -> f64 {
        let layout = self.layout();
        let mut sum = 0u64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let pixel = self.get_pixel_unchecked(x, y);
                let v = match layout {
                    PixelLayout::Gray8 => pixel as u8,
                    _ => {
                        let (r, g, b) = pixel_to_rgb(layout, pixel);
                        color::luma(r, g, b)
                    }
                };
                sum += v as u64;
            }
        }
        sum as f64 / (self.width() as f64 * self.height() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stats() {
        let data = vec![42u8; 12];
        let r = Raster::from_interleaved(4, 3, 1, &data, PixelLayout::Rgb32).unwrap();
        let stats = r.gray_stats().unwrap();
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.stdev, 0.0);
    }

    #[test]
    fn test_two_level_stats() {
        // Half 0, half 100: mean 50, stdev 50
        let data = [0u8, 100, 0, 100];
        let r = Raster::from_interleaved(2, 2, 1, &data, PixelLayout::Rgb32).unwrap();
        let stats = r.gray_stats().unwrap();
        assert!((stats.mean - 50.0).abs() < 1e-12);
        assert!((stats.stdev - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_requires_gray() {
        let r = Raster::new(2, 2, PixelLayout::Rgb32).unwrap();
        assert!(matches!(
            r.gray_histogram(),
            Err(Error::UnsupportedLayout(PixelLayout::Rgb32))
        ));
    }

    #[test]
    fn test_luma_mean_color() {
        let data = [100u8, 100, 100, 200, 200, 200];
        let r = Raster::from_interleaved(2, 1, 3, &data, PixelLayout::Bgr32).unwrap();
        assert_eq!(r.luma_mean(), 150.0);
    }
}
