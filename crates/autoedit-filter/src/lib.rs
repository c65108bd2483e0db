//! autoedit-filter - Image filtering operations
//!
//! This crate provides the operators of the enhancement pipeline:
//!
//! - Convolution with the smoothing and Laplacian kernels
//! - Laplacian response (focus measure)
//! - Multiplicative brightness, contrast and sharpness enhancers
//! - Edge-preserving detail enhancement (domain-transform filter)
//! - Colour non-local-means denoising
//! - Linear colour balance
//! - CIE Lab conversions
//!
//! Operators never modify their input; each returns a new raster.

pub mod balance;
pub mod colorspace;
pub mod convolve;
pub mod denoise;
pub mod detail;
pub mod edge;
pub mod enhance;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use balance::{ColorBalanceParams, color_balance};
pub use convolve::{border_index, convolve_color_interior, convolve_plane};
pub use denoise::{NlMeansParams, nl_means, nl_means_colored};
pub use detail::{DetailParams, detail_enhance, domain_transform_filter};
pub use edge::laplacian_response;
pub use enhance::{blend, scale_brightness, scale_contrast, scale_sharpness};
