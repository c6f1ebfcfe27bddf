//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Input grid is absent or unusable for this operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Building the output grid failed.
    #[error(transparent)]
    Core(#[from] alphakey_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
