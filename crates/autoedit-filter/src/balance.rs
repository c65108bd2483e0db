//! Linear colour balance
//!
//! `out = clamp(round(alpha * in + beta), 0, 255)` on every colour channel,
//! rounding half to even. Alpha bytes are left alone.

use crate::colorspace::saturate_u8;
use crate::enhance::{ToneLut, apply_lut};
use crate::{FilterError, FilterResult};
use autoedit_core::{PixelLayout, Raster};

/// Parameters for [`color_balance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBalanceParams {
    /// Gain
    pub alpha: f32,
    /// Offset added after the gain
    pub beta: f32,
}

impl Default for ColorBalanceParams {
    fn default() -> Self {
        Self {
            alpha: 1.3,
            beta: 20.0,
        }
    }
}

/// Build the per-value table for a gain and offset.
pub fn balance_lut(params: &ColorBalanceParams) -> ToneLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = saturate_u8(params.alpha * i as f32 + params.beta);
    }
    lut
}

/// Apply a linear gain and offset to every channel.
///
/// Results below 0 clamp to 0 and results above 255 clamp to 255.
///
/// Works on any layout: the map is the same for every channel, so channel
/// order does not matter.
pub fn color_balance(raster: &Raster, params: &ColorBalanceParams) -> FilterResult<Raster> {
    if !(params.alpha.is_finite() && params.beta.is_finite()) {
        return Err(FilterError::InvalidParameters(format!(
            "color balance needs finite alpha and beta, got {} and {}",
            params.alpha, params.beta
        )));
    }
    log::trace!(
        "color_balance: alpha={} beta={}",
        params.alpha,
        params.beta
    );

    let lut = balance_lut(params);
    if raster.layout() == PixelLayout::Gray8 {
        let (w, h) = raster.dimensions();
        let mut out = raster.to_mut();
        for y in 0..h {
            for x in 0..w {
                let v = raster.get_pixel_unchecked(x, y) as usize;
                out.set_pixel_unchecked(x, y, lut[v] as u32);
            }
        }
        return Ok(out.into());
    }
    Ok(apply_lut(raster, &lut))
}
