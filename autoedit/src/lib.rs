//! autoedit - Adaptive single-image enhancement
//!
//! Measures a photograph, classifies it as dark, normal or bright, and
//! applies a regime-specific chain of tone, sharpness, detail, denoise and
//! colour-balance adjustments.
//!
//! # Overview
//!
//! - [`io`] - PNG and JPEG decoding and encoding
//! - [`filter`] - the individual enhancement operators
//! - [`pipeline`] - measurement, classification and the full chain
//!
//! # Example
//!
//! ```
//! use autoedit::{EnhanceOptions, PixelLayout, Raster, enhance};
//!
//! let image = Raster::new(16, 16, PixelLayout::Rgb32).unwrap();
//! let out = enhance(&image, &EnhanceOptions::default()).unwrap();
//! assert_eq!(out.dimensions(), (16, 16));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use autoedit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use autoedit_filter as filter;
pub use autoedit_io as io;
pub use autoedit_pipeline as pipeline;

pub use autoedit_pipeline::{
    Category, EnhanceOptions, EnhanceReport, Measurement, PipelineError, classify, enhance,
    enhance_hdr, measure,
};
