//! Non-local-means denoising
//!
//! Each output pixel is a weighted average of the pixels in a search
//! window around it. A candidate's weight depends on how similar the patch
//! (template window) around it is to the patch around the output pixel:
//!
//! `w = exp(-d / (h^2 * channels))`
//!
//! where `d` is the mean over the template of the channel-summed squared
//! differences. Weights below [`WEIGHT_THRESHOLD`] are dropped. Borders are
//! reflect-101 padded.
//!
//! Patch distances for one search offset are read from a summed-area table
//! of squared differences, so the cost does not grow with the template size.

use crate::colorspace::{Transfer, lab8_to_rgb8, rgb8_to_lab8};
use crate::convolve::border_index;
use crate::error::require_layout;
use crate::{FilterError, FilterResult};
use autoedit_core::{PixelLayout, Raster, color};

/// Weights smaller than this contribute nothing
pub const WEIGHT_THRESHOLD: f32 = 0.001;

/// Parameters for [`nl_means_colored`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NlMeansParams {
    /// Filter strength for the lightness channel
    pub h: f32,
    /// Filter strength for the two chroma channels
    pub h_color: f32,
    /// Patch side length, odd
    pub template_window: u32,
    /// Search window side length, odd
    pub search_window: u32,
}

impl Default for NlMeansParams {
    fn default() -> Self {
        Self {
            h: 10.0,
            h_color: 10.0,
            template_window: 7,
            search_window: 21,
        }
    }
}

impl NlMeansParams {
    fn validate(&self) -> FilterResult<()> {
        for (name, v) in [("h", self.h), ("h_color", self.h_color)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(FilterError::InvalidParameters(format!(
                    "{} must be positive, got {}",
                    name, v
                )));
            }
        }
        for (name, v) in [
            ("template_window", self.template_window),
            ("search_window", self.search_window),
        ] {
            if v % 2 == 0 {
                return Err(FilterError::InvalidParameters(format!(
                    "{} must be odd, got {}",
                    name, v
                )));
            }
        }
        Ok(())
    }
}

/// Denoise a `Bgr32` raster in Lab space.
///
/// The raster is converted to 8-bit Lab with the linear transform; the L
/// plane is filtered with `h` and the a/b pair jointly with `h_color`.
/// The output is `Bgr32` with the input's alpha.
///
/// # Errors
///
/// - `LayoutMismatch` unless the input is `Bgr32`
/// - `InvalidParameters` for non-positive strengths or even window sizes
pub fn nl_means_colored(raster: &Raster, params: &NlMeansParams) -> FilterResult<Raster> {
    require_layout(raster.layout(), PixelLayout::Bgr32, "Bgr32")?;
    params.validate()?;
    log::trace!(
        "nl_means_colored: h={} h_color={} template={} search={}",
        params.h,
        params.h_color,
        params.template_window,
        params.search_window
    );

    let (w, h) = raster.dimensions();
    let n = w as usize * h as usize;
    let mut l = Vec::with_capacity(n);
    let mut a = Vec::with_capacity(n);
    let mut b = Vec::with_capacity(n);
    for y in 0..h {
        for x in 0..w {
            let (cb, cg, cr) = color::extract(raster.get_pixel_unchecked(x, y));
            let (l8, a8, b8) = rgb8_to_lab8(cr, cg, cb, Transfer::Linear);
            l.push(l8);
            a.push(a8);
            b.push(b8);
        }
    }

    let tw = params.template_window;
    let sw = params.search_window;
    let l = nl_means(&[l], w, h, params.h, tw, sw)?;
    let ab = nl_means(&[a, b], w, h, params.h_color, tw, sw)?;

    let mut out = raster.to_mut();
    for y in 0..h {
        for x in 0..w {
            let i = y as usize * w as usize + x as usize;
            let (r, g, bl) = lab8_to_rgb8(l[0][i], ab[0][i], ab[1][i], Transfer::Linear);
            let alpha = color::alpha(raster.get_pixel_unchecked(x, y));
            out.set_pixel_unchecked(x, y, color::compose_with_alpha(bl, g, r, alpha));
        }
    }

    Ok(out.into())
}

/// Denoise a group of 8-bit planes that share patch distances.
///
/// All planes are `width * height` row-major samples. Returns the filtered
/// planes in the same order.
pub fn nl_means(
    planes: &[Vec<u8>],
    width: u32,
    height: u32,
    h: f32,
    template_window: u32,
    search_window: u32,
) -> FilterResult<Vec<Vec<u8>>> {
    let n = width as usize * height as usize;
    if planes.is_empty() || planes.iter().any(|p| p.len() != n) {
        return Err(FilterError::InvalidParameters(format!(
            "expected non-empty group of {}x{} planes",
            width, height
        )));
    }
    if template_window % 2 == 0 || search_window % 2 == 0 || !(h > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "invalid NL-means settings: h={} template={} search={}",
            h, template_window, search_window
        )));
    }

    let (w, ht) = (width as usize, height as usize);
    let tr = (template_window / 2) as usize;
    let sr = (search_window / 2) as usize;
    let pad = tr + sr;
    let pw = w + 2 * pad;
    let ph = ht + 2 * pad;

    let padded: Vec<Vec<i32>> = planes
        .iter()
        .map(|plane| {
            let mut p = Vec::with_capacity(pw * ph);
            for py in 0..ph {
                let sy = border_index(py as i64 - pad as i64, height);
                for px in 0..pw {
                    let sx = border_index(px as i64 - pad as i64, width);
                    p.push(plane[sy as usize * w + sx as usize] as i32);
                }
            }
            p
        })
        .collect();

    // Patch pixels of every output pixel lie in this region of the padding
    let rw = w + 2 * tr;
    let rh = ht + 2 * tr;
    let iw = rw + 1;
    let mut integral = vec![0u64; iw * (rh + 1)];

    let tsize = template_window as usize;
    let patch_area = (tsize * tsize) as f32;
    let inv_h2 = 1.0 / (h * h * planes.len() as f32);

    let mut wsum = vec![0.0f32; n];
    let mut acc = vec![vec![0.0f32; n]; planes.len()];

    let sr_i = sr as isize;
    for dy in -sr_i..=sr_i {
        for dx in -sr_i..=sr_i {
            for ry in 0..rh {
                let py = ry + sr;
                let qy = (py as isize + dy) as usize;
                let mut row_sum = 0u64;
                for rx in 0..rw {
                    let px = rx + sr;
                    let qx = (px as isize + dx) as usize;
                    let mut d = 0u64;
                    for p in &padded {
                        let diff = p[py * pw + px] - p[qy * pw + qx];
                        d += (diff * diff) as u64;
                    }
                    row_sum += d;
                    integral[(ry + 1) * iw + rx + 1] = integral[ry * iw + rx + 1] + row_sum;
                }
            }

            for y in 0..ht {
                for x in 0..w {
                    let s = integral[(y + tsize) * iw + x + tsize] + integral[y * iw + x]
                        - integral[y * iw + x + tsize]
                        - integral[(y + tsize) * iw + x];
                    let dist = s as f32 / patch_area;
                    let weight = (-dist * inv_h2).exp();
                    if weight < WEIGHT_THRESHOLD {
                        continue;
                    }
                    let i = y * w + x;
                    let qi = (y + pad).wrapping_add_signed(dy) * pw
                        + (x + pad).wrapping_add_signed(dx);
                    wsum[i] += weight;
                    for (c, p) in padded.iter().enumerate() {
                        acc[c][i] += weight * p[qi] as f32;
                    }
                }
            }
        }
    }

    Ok(acc
        .into_iter()
        .map(|plane| {
            plane
                .iter()
                .zip(&wsum)
                .map(|(&v, &ws)| (v / ws).round().clamp(0.0, 255.0) as u8)
                .collect()
        })
        .collect())
}
