//! The enhancement chain
//!
//! ```text
//! measure -> classify -> preset
//!   Rgb32:  brightness -> contrast -> sharpness
//!   Bgr32:  detail -> [denoise] -> [color balance]
//! -> caller's layout (Rgb32 for gray input)
//! ```
//!
//! Every stage returns a new raster. A failing stage fails the whole call;
//! no partial result is returned.

use crate::analyzer::{Measurement, measure};
use crate::category::{Category, EnhancementPreset, classify};
use crate::error::{PipelineError, PipelineResult, Stage};
use crate::options::EnhanceOptions;
use autoedit_core::{PixelLayout, Raster};
use autoedit_filter::{
    ColorBalanceParams, DetailParams, FilterResult, NlMeansParams, color_balance, detail_enhance,
    nl_means_colored, scale_brightness, scale_contrast, scale_sharpness,
};
use serde::Serialize;
use std::time::Instant;

/// What `enhance` measured and did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhanceReport {
    pub measurement: Measurement,
    pub category: Category,
    pub preset: EnhancementPreset,
    /// Stages that ran, in order
    pub stages: Vec<Stage>,
}

/// Enhance an image.
///
/// The output has the input's dimensions and layout, except that gray
/// input produces `Rgb32`. Alpha is carried through unchanged.
pub fn enhance(image: &Raster, options: &EnhanceOptions) -> PipelineResult<Raster> {
    enhance_with_report(image, options).map(|(out, _)| out)
}

/// Enhance an image and report the measurement, category and stages.
pub fn enhance_with_report(
    image: &Raster,
    options: &EnhanceOptions,
) -> PipelineResult<(Raster, EnhanceReport)> {
    let measurement = measure(image)?;
    let category = classify(measurement.brightness);
    let preset = category.preset();
    log::info!(
        "measured {}x{}: brightness={:.3} contrast={:.3} sharpness={:.3} -> {}",
        image.width(),
        image.height(),
        measurement.brightness,
        measurement.contrast,
        measurement.sharpness,
        category
    );

    let mut stages = Vec::new();

    let rgb = image.to_layout(PixelLayout::Rgb32);
    let out = run_stage(Stage::Brightness, &mut stages, || {
        scale_brightness(&rgb, preset.brightness_factor as f32)
    })?;
    let out = run_stage(Stage::Contrast, &mut stages, || {
        scale_contrast(&out, preset.contrast_factor as f32)
    })?;
    let out = run_stage(Stage::Sharpness, &mut stages, || {
        scale_sharpness(&out, preset.sharpness_factor as f32)
    })?;

    let bgr = out.to_layout(PixelLayout::Bgr32);
    let mut out = run_stage(Stage::Detail, &mut stages, || {
        detail_enhance(&bgr, &DetailParams::default())
    })?;

    if options.denoise {
        out = run_stage(Stage::Denoise, &mut stages, || {
            nl_means_colored(&out, &NlMeansParams::default())
        })?;
    } else {
        log::trace!("denoise disabled, skipping");
    }

    if options.color_balance {
        out = run_stage(Stage::ColorBalance, &mut stages, || {
            color_balance(&out, &ColorBalanceParams::default())
        })?;
    } else {
        log::trace!("color balance disabled, skipping");
    }

    let report = EnhanceReport {
        measurement,
        category,
        preset,
        stages,
    };
    Ok((out.to_layout(output_layout(image)), report))
}

/// Apply only detail enhancement.
///
/// Skips measurement, the tone chain and the optional stages. Layout
/// handling matches [`enhance`].
pub fn enhance_hdr(image: &Raster) -> PipelineResult<Raster> {
    let bgr = image.to_layout(PixelLayout::Bgr32);
    let mut stages = Vec::with_capacity(1);
    let out = run_stage(Stage::Detail, &mut stages, || {
        detail_enhance(&bgr, &DetailParams::default())
    })?;
    Ok(out.to_layout(output_layout(image)))
}

/// Decode PNG or JPEG bytes.
///
/// Empty, truncated and unrecognized buffers fail with `Decode`.
pub fn decode(bytes: &[u8]) -> PipelineResult<Raster> {
    autoedit_io::read_image_mem(bytes).map_err(PipelineError::Decode)
}

/// Build a raster from interleaved 8-bit samples.
///
/// `channels` is 1 (gray), 3 (RGB) or 4 (RGBA), in true RGB order. Wrong
/// buffer lengths, zero dimensions and other channel counts fail with
/// `InvalidImage`.
pub fn from_raw(width: u32, height: u32, channels: u32, data: &[u8]) -> PipelineResult<Raster> {
    Ok(Raster::from_interleaved(
        width,
        height,
        channels,
        data,
        PixelLayout::Rgb32,
    )?)
}

/// Decode and enhance an encoded image.
pub fn enhance_bytes(bytes: &[u8], options: &EnhanceOptions) -> PipelineResult<Raster> {
    enhance(&decode(bytes)?, options)
}

/// Decode and measure an encoded image.
pub fn measure_bytes(bytes: &[u8]) -> PipelineResult<Measurement> {
    measure(&decode(bytes)?)
}

fn output_layout(image: &Raster) -> PixelLayout {
    match image.layout() {
        PixelLayout::Gray8 => PixelLayout::Rgb32,
        layout => layout,
    }
}

fn run_stage<F>(stage: Stage, stages: &mut Vec<Stage>, f: F) -> PipelineResult<Raster>
where
    F: FnOnce() -> FilterResult<Raster>,
{
    log::debug!("{} stage started", stage);
    let start = Instant::now();
    let out = f().map_err(|source| PipelineError::StageFailure { stage, source })?;
    log::debug!("{} stage finished in {:?}", stage, start.elapsed());
    stages.push(stage);
    Ok(out)
}
