//! Convolution operations
//!
//! Float-plane convolution with reflect-101 borders, and 8-bit colour
//! convolution that leaves the outermost ring of pixels untouched.

use crate::error::require_color;
use crate::{FilterResult, Kernel};
use autoedit_core::{FPlane, Raster, color};

/// Map a possibly out-of-range coordinate into `0..n` by reflect-101
/// mirroring: `dcb|abcd|cba`.
///
/// Folds repeatedly, so offsets larger than the image still land inside
/// it. A single-pixel dimension always maps to 0.
#[inline]
pub fn border_index(i: i64, n: u32) -> u32 {
    let n = n as i64;
    if (0..n).contains(&i) {
        return i as u32;
    }
    if n == 1 {
        return 0;
    }
    let mut p = i;
    while !(0..n).contains(&p) {
        p = if p < 0 { -p } else { 2 * n - 2 - p };
    }
    p as u32
}

/// Convolve a float plane with a kernel, reflect-101 at the borders.
///
/// The result has the same size as the input and is not rounded.
pub fn convolve_plane(plane: &FPlane, kernel: &Kernel) -> FPlane {
    let (w, h) = plane.dimensions();
    let kw = kernel.width();
    let kh = kernel.height();
    let kcx = kernel.center_x() as i64;
    let kcy = kernel.center_y() as i64;

    let mut out = plane.clone();

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f32;

            for ky in 0..kh {
                let sy = border_index(y as i64 + ky as i64 - kcy, h);
                for kx in 0..kw {
                    let k = kernel.get(kx, ky).unwrap_or(0.0);
                    if k == 0.0 {
                        continue;
                    }
                    let sx = border_index(x as i64 + kx as i64 - kcx, w);
                    sum += plane.get_pixel_unchecked(sx, sy) * k;
                }
            }

            out.set_pixel_unchecked(x, y, sum);
        }
    }

    out
}

/// Convolve the colour channels of a 32-bit raster, interior only.
///
/// Pixels where the kernel would reach outside the image are copied from
/// the input unchanged. Interior results are rounded half up and clipped
/// to 0..=255. Alpha is carried over from the input.
pub fn convolve_color_interior(raster: &Raster, kernel: &Kernel) -> FilterResult<Raster> {
    require_color(raster.layout())?;

    let (w, h) = raster.dimensions();
    let kw = kernel.width();
    let kh = kernel.height();
    let kcx = kernel.center_x();
    let kcy = kernel.center_y();

    let mut out = raster.to_mut();
    if w < kw || h < kh {
        return Ok(out.into());
    }

    for y in kcy..h - (kh - 1 - kcy) {
        for x in kcx..w - (kw - 1 - kcx) {
            let mut sums = [0.0f32; 3];

            for ky in 0..kh {
                for kx in 0..kw {
                    let k = kernel.get(kx, ky).unwrap_or(0.0);
                    let pixel = raster.get_pixel_unchecked(x + kx - kcx, y + ky - kcy);
                    let (c0, c1, c2) = color::extract(pixel);
                    sums[0] += c0 as f32 * k;
                    sums[1] += c1 as f32 * k;
                    sums[2] += c2 as f32 * k;
                }
            }

            let [c0, c1, c2] = sums.map(|s| (s + 0.5).clamp(0.0, 255.0) as u8);
            let a = color::alpha(raster.get_pixel_unchecked(x, y));
            out.set_pixel_unchecked(x, y, color::compose_with_alpha(c0, c1, c2, a));
        }
    }

    Ok(out.into())
}
