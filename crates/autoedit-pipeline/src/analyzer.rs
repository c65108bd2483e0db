//! Photometric measurement
//!
//! All statistics are taken on the BT.601 luma image. Brightness and
//! contrast are its mean and population standard deviation; sharpness is
//! the population variance of its 4-neighbour Laplacian response.

use crate::error::{PipelineError, PipelineResult, Stage};
use autoedit_core::Raster;
use autoedit_filter::laplacian_response;
use serde::{Deserialize, Serialize};

/// Coarse photometric statistics of one image
///
/// `blurness` and `sharpness` hold the same value: the Laplacian variance.
/// Both names are kept because callers key on either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Laplacian variance
    pub blurness: f64,
    /// Mean luma, 0..=255
    pub brightness: f64,
    /// Population standard deviation of luma
    pub contrast: f64,
    /// Laplacian variance
    pub sharpness: f64,
}

/// Measure brightness, contrast and sharpness.
///
/// Gray rasters are used as-is; colour rasters are reduced to luma with
/// their channel order respected.
pub fn measure(image: &Raster) -> PipelineResult<Measurement> {
    let gray = image.to_gray();
    let stats = gray.gray_stats()?;
    let response = laplacian_response(&gray).map_err(|source| PipelineError::StageFailure {
        stage: Stage::Measure,
        source,
    })?;
    let laplacian_var = response.variance();

    Ok(Measurement {
        blurness: laplacian_var,
        brightness: stats.mean,
        contrast: stats.stdev,
        sharpness: laplacian_var,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoedit_core::PixelLayout;

    #[test]
    fn test_uniform() {
        let r = Raster::from_interleaved(3, 3, 1, &[64; 9], PixelLayout::Rgb32).unwrap();
        let m = measure(&r).unwrap();
        assert_eq!(m.brightness, 64.0);
        assert_eq!(m.contrast, 0.0);
        assert_eq!(m.sharpness, 0.0);
        assert_eq!(m.blurness, m.sharpness);
    }

    #[test]
    fn test_one_by_one() {
        let r = Raster::from_interleaved(1, 1, 3, &[255, 0, 0], PixelLayout::Rgb32).unwrap();
        let m = measure(&r).unwrap();
        assert_eq!(m.brightness, 76.0);
        assert_eq!(m.sharpness, 0.0);
    }

    #[test]
    fn test_layout_respected() {
        let rgb = Raster::from_interleaved(1, 1, 3, &[255, 0, 0], PixelLayout::Rgb32).unwrap();
        let bgr = rgb.to_layout(PixelLayout::Bgr32);
        assert_eq!(measure(&rgb).unwrap(), measure(&bgr).unwrap());
    }
}
