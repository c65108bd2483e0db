//! Error types for autoedit-filter

use autoedit_core::PixelLayout;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] autoedit_core::Error),

    /// The raster's pixel layout is not accepted by this operation
    #[error("unsupported layout: expected {expected}, got {actual:?}")]
    LayoutMismatch {
        /// Accepted layout description
        expected: &'static str,
        /// Actual layout of the input
        actual: PixelLayout,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Fail with `LayoutMismatch` unless `actual` is `wanted`.
pub(crate) fn require_layout(
    actual: PixelLayout,
    wanted: PixelLayout,
    expected: &'static str,
) -> FilterResult<()> {
    if actual != wanted {
        return Err(FilterError::LayoutMismatch { expected, actual });
    }
    Ok(())
}

/// Fail with `LayoutMismatch` for `Gray8` input.
pub(crate) fn require_color(actual: PixelLayout) -> FilterResult<()> {
    if !actual.is_color() {
        return Err(FilterError::LayoutMismatch {
            expected: "Rgb32 or Bgr32",
            actual,
        });
    }
    Ok(())
}
