//! Multiplicative tone enhancers
//!
//! Each enhancer interpolates (factor in 0..1) or extrapolates (factor > 1)
//! between a *degenerate* image and the input:
//!
//! `out = clip(trunc(deg + factor * (in - deg)), 0, 255)`
//!
//! computed in `f32` per colour channel. Factor 1 returns the input
//! unchanged. Alpha is always carried over from the input.
//!
//! | Operator | Degenerate image |
//! |---|---|
//! | brightness | black |
//! | contrast | uniform gray at the rounded luma mean |
//! | sharpness | the input smoothed with [`Kernel::smooth`], border copied |

use crate::convolve::convolve_color_interior;
use crate::error::require_color;
use crate::{FilterError, FilterResult, Kernel};
use autoedit_core::{Raster, color};

/// A 256-entry lookup table mapping input channel values to output values.
pub type ToneLut = [u8; 256];

/// Blend one channel value toward `input` from `degenerate`.
#[inline]
pub fn blend_value(degenerate: u8, input: u8, factor: f32) -> u8 {
    let d = degenerate as f32;
    let v = d + factor * (input as f32 - d);
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

/// Build the lookup table for a blend against a constant degenerate value.
pub fn blend_lut(degenerate: u8, factor: f32) -> ToneLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = blend_value(degenerate, i as u8, factor);
    }
    lut
}

/// Blend `image` against a same-sized `degenerate` image.
///
/// # Errors
///
/// - `LayoutMismatch` if either raster is `Gray8`
/// - `InvalidParameters` if the rasters differ in size or layout, or the
///   factor is not finite
pub fn blend(degenerate: &Raster, image: &Raster, factor: f32) -> FilterResult<Raster> {
    require_color(image.layout())?;
    check_factor(factor)?;
    if !degenerate.sizes_equal(image) {
        return Err(FilterError::InvalidParameters(format!(
            "degenerate image {}x{} {:?} does not match input {}x{} {:?}",
            degenerate.width(),
            degenerate.height(),
            degenerate.layout(),
            image.width(),
            image.height(),
            image.layout()
        )));
    }

    let (w, h) = image.dimensions();
    let mut out = image.to_mut();
    for y in 0..h {
        for x in 0..w {
            let (d0, d1, d2) = color::extract(degenerate.get_pixel_unchecked(x, y));
            let (i0, i1, i2, a) = color::extract_with_alpha(image.get_pixel_unchecked(x, y));
            let val = color::compose_with_alpha(
                blend_value(d0, i0, factor),
                blend_value(d1, i1, factor),
                blend_value(d2, i2, factor),
                a,
            );
            out.set_pixel_unchecked(x, y, val);
        }
    }
    Ok(out.into())
}

/// Scale brightness: blend against black, i.e. `trunc(in * factor)`.
pub fn scale_brightness(raster: &Raster, factor: f32) -> FilterResult<Raster> {
    require_color(raster.layout())?;
    check_factor(factor)?;
    log::trace!("scale_brightness: factor={}", factor);
    Ok(apply_lut(raster, &blend_lut(0, factor)))
}

/// Scale contrast: blend against a uniform gray at the image's mean luma,
/// rounded to the nearest integer.
pub fn scale_contrast(raster: &Raster, factor: f32) -> FilterResult<Raster> {
    require_color(raster.layout())?;
    check_factor(factor)?;
    let mean = (raster.luma_mean() + 0.5) as u8;
    log::trace!("scale_contrast: factor={} mean={}", factor, mean);
    Ok(apply_lut(raster, &blend_lut(mean, factor)))
}

/// Scale sharpness: blend against the smoothed image.
///
/// Factor 0 gives the smoothed image, values above 1 sharpen.
pub fn scale_sharpness(raster: &Raster, factor: f32) -> FilterResult<Raster> {
    require_color(raster.layout())?;
    check_factor(factor)?;
    log::trace!("scale_sharpness: factor={}", factor);
    let smoothed = convolve_color_interior(raster, &Kernel::smooth())?;
    blend(&smoothed, raster, factor)
}

/// Apply a lookup table to the three colour channels, keeping alpha.
pub fn apply_lut(raster: &Raster, lut: &ToneLut) -> Raster {
    let (w, h) = raster.dimensions();
    let mut out = raster.to_mut();
    for y in 0..h {
        for x in 0..w {
            let (c0, c1, c2, a) = color::extract_with_alpha(raster.get_pixel_unchecked(x, y));
            let val = color::compose_with_alpha(
                lut[c0 as usize],
                lut[c1 as usize],
                lut[c2 as usize],
                a,
            );
            out.set_pixel_unchecked(x, y, val);
        }
    }
    out.into()
}

fn check_factor(factor: f32) -> FilterResult<()> {
    if !factor.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "enhancement factor must be finite, got {}",
            factor
        )));
    }
    Ok(())
}
