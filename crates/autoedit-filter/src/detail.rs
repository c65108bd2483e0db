//! Edge-preserving detail enhancement
//!
//! The lightness channel is split into a base layer, smoothed with the
//! recursive domain-transform filter, and a detail layer (lightness minus
//! base). The detail layer is amplified and added back.
//!
//! # Algorithm
//!
//! 1. sRGB to CIE Lab; the working plane is `L / 255`
//! 2. Domain derivatives `1 + (sigma_s / sigma_r) * |dL|` along x and y
//! 3. Three iterations of a horizontal then vertical two-pass recursive
//!    filter with feedback `a^d`, `a = exp(-sqrt(2) / sigma_h)`, where
//!    `sigma_h` shrinks each iteration
//! 4. `L' = base + gain * (L - base)`, back to sRGB

use crate::colorspace::{Lab, Transfer, lab_to_rgb, rgb_to_lab, saturate_u8};
use crate::error::require_layout;
use crate::{FilterError, FilterResult};
use autoedit_core::{FPlane, PixelLayout, Raster, color};

/// Number of horizontal+vertical filtering iterations
const DT_ITERATIONS: i32 = 3;

/// Parameters for [`detail_enhance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailParams {
    /// Spatial extent of the smoothing, in pixels (0, 200]
    pub sigma_s: f32,
    /// Range extent, in units of normalized lightness (0, 1]
    pub sigma_r: f32,
    /// Multiplier applied to the detail layer
    pub gain: f32,
}

impl Default for DetailParams {
    fn default() -> Self {
        Self {
            sigma_s: 10.0,
            sigma_r: 0.15,
            gain: 3.0,
        }
    }
}

impl DetailParams {
    fn validate(&self) -> FilterResult<()> {
        if !(self.sigma_s > 0.0 && self.sigma_s <= 200.0) {
            return Err(FilterError::InvalidParameters(format!(
                "sigma_s must be in (0, 200], got {}",
                self.sigma_s
            )));
        }
        if !(self.sigma_r > 0.0 && self.sigma_r <= 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "sigma_r must be in (0, 1], got {}",
                self.sigma_r
            )));
        }
        if !self.gain.is_finite() {
            return Err(FilterError::InvalidParameters(format!(
                "gain must be finite, got {}",
                self.gain
            )));
        }
        Ok(())
    }
}

/// Enhance local detail of a `Bgr32` raster.
///
/// The output is `Bgr32` with the input's alpha.
///
/// # Errors
///
/// - `LayoutMismatch` unless the input is `Bgr32`
/// - `InvalidParameters` for out-of-range parameters
pub fn detail_enhance(raster: &Raster, params: &DetailParams) -> FilterResult<Raster> {
    require_layout(raster.layout(), PixelLayout::Bgr32, "Bgr32")?;
    params.validate()?;
    log::trace!(
        "detail_enhance: sigma_s={} sigma_r={} gain={}",
        params.sigma_s,
        params.sigma_r,
        params.gain
    );

    let (w, h) = raster.dimensions();
    let n = w as usize * h as usize;
    let mut lab = Vec::with_capacity(n);
    let mut lightness = Vec::with_capacity(n);
    for y in 0..h {
        for x in 0..w {
            let (b, g, r) = color::extract(raster.get_pixel_unchecked(x, y));
            let px = rgb_to_lab(
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                Transfer::Srgb,
            );
            lightness.push(px.l / 255.0);
            lab.push(px);
        }
    }

    let plane = FPlane::from_data(w, h, lightness)?;
    let base = domain_transform_filter(&plane, params.sigma_s, params.sigma_r);

    let mut out = raster.to_mut();
    for y in 0..h {
        let lrow = plane.row(y);
        let brow = base.row(y);
        for x in 0..w {
            let i = y as usize * w as usize + x as usize;
            let detail = lrow[x as usize] - brow[x as usize];
            let l = (brow[x as usize] + params.gain * detail) * 255.0;
            let (r, g, b) = lab_to_rgb(Lab { l, ..lab[i] }, Transfer::Srgb);
            let a = color::alpha(raster.get_pixel_unchecked(x, y));
            let val = color::compose_with_alpha(
                saturate_u8(b * 255.0),
                saturate_u8(g * 255.0),
                saturate_u8(r * 255.0),
                a,
            );
            out.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(out.into())
}

/// Smooth a plane with the recursive domain-transform filter.
///
/// Edges where the plane changes by much more than `sigma_r` stop the
/// smoothing; elsewhere it spreads over roughly `sigma_s` pixels.
pub fn domain_transform_filter(plane: &FPlane, sigma_s: f32, sigma_r: f32) -> FPlane {
    let (w, h) = plane.dimensions();
    let ratio = sigma_s / sigma_r;

    // Domain derivatives: entry j holds the step from j-1 to j
    let mut horiz = plane.clone();
    horiz.data_mut().fill(1.0);
    let mut vert = horiz.clone();
    for y in 0..h {
        let row = plane.row(y);
        let hrow = horiz.row_mut(y);
        for x in 1..w as usize {
            hrow[x] = 1.0 + ratio * (row[x] - row[x - 1]).abs();
        }
    }
    for y in 1..h {
        for x in 0..w {
            let d = plane.get_pixel_unchecked(x, y) - plane.get_pixel_unchecked(x, y - 1);
            vert.set_pixel_unchecked(x, y, 1.0 + ratio * d.abs());
        }
    }
    let vert_t = vert.transpose();

    let n = DT_ITERATIONS;
    let denom = (4.0f32.powi(n) - 1.0).sqrt();
    let mut out = plane.clone();
    for i in 0..n {
        let sigma_h = sigma_s * 3.0f32.sqrt() * 2.0f32.powi(n - i - 1) / denom;
        recursive_filter_rows(&mut out, &horiz, sigma_h);
        let mut t = out.transpose();
        recursive_filter_rows(&mut t, &vert_t, sigma_h);
        out = t.transpose();
    }
    out
}

/// Two-pass (causal then anti-causal) recursive filter along each row.
fn recursive_filter_rows(plane: &mut FPlane, dist: &FPlane, sigma_h: f32) {
    let a = (-(2.0f32.sqrt()) / sigma_h).exp();
    let w = plane.width() as usize;

    for y in 0..plane.height() {
        let v: Vec<f32> = dist.row(y).iter().map(|&d| a.powf(d)).collect();
        let row = plane.row_mut(y);
        for j in 1..w {
            row[j] += (row[j - 1] - row[j]) * v[j];
        }
        for j in (0..w.saturating_sub(1)).rev() {
            row[j] += (row[j + 1] - row[j]) * v[j + 1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bgr(w: u32, h: u32, f: impl Fn(u32, u32) -> (u8, u8, u8)) -> Raster {
        let mut rm = Raster::new(w, h, PixelLayout::Bgr32).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                let (r, g, b) = f(x, y);
                rm.set_pixel_unchecked(x, y, color::compose(b, g, r));
            }
        }
        rm.into()
    }

    #[test]
    fn test_filter_preserves_constant() {
        let p = FPlane::new_with_value(7, 5, 0.3).unwrap();
        let out = domain_transform_filter(&p, 10.0, 0.15);
        assert!(out.data().iter().all(|&v| (v - 0.3).abs() < 1e-6));
    }

    #[test]
    fn test_filter_smooths_ramp_within_bounds() {
        let data: Vec<f32> = (0..20).map(|i| (i % 2) as f32 * 0.01).collect();
        let p = FPlane::from_data(20, 1, data).unwrap();
        let out = domain_transform_filter(&p, 10.0, 0.15);
        assert!(out.data().iter().all(|&v| (-1e-6..=0.01 + 1e-6).contains(&v)));
        // Small oscillations are flattened
        assert!(out.variance() < p.variance() / 4.0);
    }

    #[test]
    fn test_filter_keeps_strong_edge() {
        let data: Vec<f32> = (0..20).map(|i| if i < 10 { 0.0 } else { 0.4 }).collect();
        let p = FPlane::from_data(20, 1, data).unwrap();
        let out = domain_transform_filter(&p, 10.0, 0.15);
        assert!(out.get_pixel(0, 0).unwrap() < 0.02);
        assert!(out.get_pixel(19, 0).unwrap() > 0.38);
    }

    #[test]
    fn test_flat_image_unchanged() {
        let r = bgr(8, 6, |_, _| (90, 140, 200));
        let out = detail_enhance(&r, &DetailParams::default()).unwrap();
        assert_eq!(out.layout(), PixelLayout::Bgr32);
        for y in 0..6 {
            for x in 0..8 {
                let (r0, g0, b0) = out.get_rgb(x, y).unwrap();
                assert!(r0.abs_diff(90) <= 1 && g0.abs_diff(140) <= 1 && b0.abs_diff(200) <= 1);
            }
        }
    }

    #[test]
    fn test_detail_amplified() {
        // Faint texture on a mid gray
        let r = bgr(16, 16, |x, y| {
            let v = if (x + y) % 2 == 0 { 120 } else { 130 };
            (v, v, v)
        });
        let out = detail_enhance(&r, &DetailParams::default()).unwrap();
        let before = r.to_gray().gray_stats().unwrap().stdev;
        let after = out.to_gray().gray_stats().unwrap().stdev;
        assert!(after > before * 1.5, "stdev {} -> {}", before, after);
    }

    #[test]
    fn test_rejects_rgb_and_bad_params() {
        let r = Raster::new(4, 4, PixelLayout::Rgb32).unwrap();
        assert!(matches!(
            detail_enhance(&r, &DetailParams::default()),
            Err(FilterError::LayoutMismatch { .. })
        ));
        let b = r.to_layout(PixelLayout::Bgr32);
        let bad = DetailParams {
            sigma_r: 0.0,
            ..Default::default()
        };
        assert!(detail_enhance(&b, &bad).is_err());
    }

    #[test]
    fn test_single_pixel() {
        let r = bgr(1, 1, |_, _| (10, 200, 30));
        let out = detail_enhance(&r, &DetailParams::default()).unwrap();
        let (r0, g0, b0) = out.get_rgb(0, 0).unwrap();
        assert!(r0.abs_diff(10) <= 1 && g0.abs_diff(200) <= 1 && b0.abs_diff(30) <= 1);
    }
}
