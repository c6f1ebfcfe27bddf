//! Error types for alphakey-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of building and indexing a
//! [`crate::PixelGrid`]:
//! - Malformed input (pixel buffer length does not match the dimensions)
//! - Out-of-range coordinates
//! - Dimensions whose pixel count overflows `usize`
//!
//! # Usage
//!
//! ```rust
//! use alphakey_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! assert!(check(3, 0, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by pixel grid construction and access.
#[derive(Debug, Error)]
pub enum Error {
    /// Input data is malformed or absent.
    ///
    /// Returned when a pixel buffer does not hold exactly `width * height`
    /// pixels, or when a caller asks for a grid that does not exist.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Pixel coordinates are outside grid bounds.
    #[error("pixel ({x}, {y}) out of bounds for grid {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Grid width
        width: u32,
        /// Grid height
        height: u32,
    },

    /// Dimensions cannot be represented in memory.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidInput`] error.
    #[inline]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an [`Error::InvalidInput`] error.
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_invalid_input() {
        let err = Error::invalid_input("expected 16 pixels, got 3");
        assert!(err.to_string().starts_with("invalid input"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(u32::MAX, u32::MAX, "pixel count overflows");
        assert!(err.to_string().contains("overflows"));
    }
}
