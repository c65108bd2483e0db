//! Edge response
//!
//! The Laplacian response used as a focus measure.

use crate::convolve::convolve_plane;
use crate::error::require_layout;
use crate::{FilterResult, Kernel};
use autoedit_core::{FPlane, PixelLayout, Raster};

/// Apply the 4-neighbour Laplacian to a `Gray8` raster.
///
/// Borders are reflect-101, so a flat image gives an all-zero response
/// and a single row or column reflects onto itself. The response is
/// signed and unclipped.
pub fn laplacian_response(raster: &Raster) -> FilterResult<FPlane> {
    require_layout(raster.layout(), PixelLayout::Gray8, "Gray8")?;
    let plane = FPlane::from_gray(raster)?;
    Ok(convolve_plane(&plane, &Kernel::laplacian()))
}
