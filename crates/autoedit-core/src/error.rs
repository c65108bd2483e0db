//! Error types for autoedit-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

use crate::raster::PixelLayout;

/// autoedit-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raw sample buffer does not match the declared geometry
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Interleaved sample count that no layout can represent
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u32),

    /// Operation requires a different pixel layout
    #[error("unsupported pixel layout: {0:?}")]
    UnsupportedLayout(PixelLayout),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
