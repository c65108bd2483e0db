//! autoedit-pipeline - Adaptive single-image enhancement
//!
//! Measures an image, classifies it as dark, normal or bright, and runs a
//! regime-specific chain of enhancement operators:
//!
//! - [`measure`] - brightness, contrast and Laplacian-variance sharpness
//! - [`classify`] / [`preset_for`] - brightness regime and its tone factors
//! - [`enhance`] - the full chain, configured by [`EnhanceOptions`]
//! - [`enhance_hdr`] - detail enhancement only
//!
//! # Examples
//!
//! ```no_run
//! use autoedit_pipeline::{EnhanceOptions, enhance_bytes};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let out = enhance_bytes(&bytes, &EnhanceOptions::default()).unwrap();
//! assert!(out.width() > 0);
//! ```

pub mod analyzer;
pub mod category;
pub mod enhancer;
mod error;
pub mod options;

pub use analyzer::{Measurement, measure};
pub use category::{Category, EnhancementPreset, classify, preset_for};
pub use enhancer::{
    EnhanceReport, decode, enhance, enhance_bytes, enhance_hdr, enhance_with_report, from_raw,
    measure_bytes,
};
pub use error::{PipelineError, PipelineResult, Stage};
pub use options::EnhanceOptions;
