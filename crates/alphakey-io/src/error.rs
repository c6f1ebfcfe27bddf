//! Error types for I/O operations.
//!
//! Every decode or encode failure ends up in one [`IoError`] variant, so the
//! caller can tell a missing file from a bad file from a failed write.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Path does not name an existing regular file.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Neither magic bytes nor extension identify a supported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Format was identified but the bytes could not be parsed.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Writing the output failed (I/O or encoder error).
    #[error("encode error: {0}")]
    EncodeError(String),

    /// File I/O error while reading.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoded data did not form a valid pixel grid.
    #[error(transparent)]
    Core(#[from] alphakey_core::Error),
}

impl IoError {
    /// Returns `true` for [`IoError::FileNotFound`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    /// Returns `true` if the file exists but could not be decoded.
    ///
    /// Covers both [`IoError::UnsupportedFormat`] and [`IoError::DecodeError`].
    #[inline]
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_) | Self::DecodeError(_))
    }

    /// Returns `true` for [`IoError::EncodeError`].
    #[inline]
    pub fn is_encode_failure(&self) -> bool {
        matches!(self, Self::EncodeError(_))
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
