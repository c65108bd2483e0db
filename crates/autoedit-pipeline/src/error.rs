//! Error types for autoedit-pipeline

use autoedit_filter::FilterError;
use autoedit_io::IoError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A step of the pipeline, used to attribute failures and in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Grayscale statistics and Laplacian variance
    Measure,
    Brightness,
    Contrast,
    Sharpness,
    /// Edge-preserving detail enhancement
    Detail,
    /// Colour non-local-means
    Denoise,
    ColorBalance,
}

impl Stage {
    /// Short lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Measure => "measure",
            Stage::Brightness => "brightness",
            Stage::Contrast => "contrast",
            Stage::Sharpness => "sharpness",
            Stage::Detail => "detail",
            Stage::Denoise => "denoise",
            Stage::ColorBalance => "color_balance",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the pipeline entry points
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input bytes are not a decodable PNG or JPEG
    #[error("cannot decode image: {0}")]
    Decode(#[source] IoError),

    /// Degenerate geometry or an unsupported channel layout
    #[error("invalid image: {0}")]
    InvalidImage(#[from] autoedit_core::Error),

    /// A stage could not process its buffer
    #[error("{stage} stage failed: {source}")]
    StageFailure {
        stage: Stage,
        #[source]
        source: FilterError,
    },
}

impl PipelineError {
    /// The failing stage, if the error came from one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::StageFailure { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
