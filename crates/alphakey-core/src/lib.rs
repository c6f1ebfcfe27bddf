//! # alphakey-core
//!
//! Core types shared by every alphakey crate.
//!
//! - [`Rgba8`] - 8-bit RGBA pixel
//! - [`PixelGrid`] - dense row-major grid of [`Rgba8`] pixels
//! - [`Error`] - construction and bounds errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. [`PixelGrid`] is the only type
//! that crosses the decode, transform, scale and encode stages:
//!
//! ```text
//! alphakey-core (this crate)
//!    ^
//!    |
//!    +-- alphakey-io  (decode / encode)
//!    +-- alphakey-ops (background removal, display scaling)
//!    +-- alphakey-cli (session + commands)
//! ```
//!
//! ## Usage
//!
//! ```
//! use alphakey_core::{PixelGrid, Rgba8};
//!
//! let mut grid = PixelGrid::new(4, 4);
//! grid.set_pixel(1, 2, Rgba8::new(255, 0, 0, 255)).unwrap();
//! assert_eq!(grid.pixel(1, 2), Some(Rgba8::new(255, 0, 0, 255)));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod grid;
pub mod pixel;

pub use error::{Error, Result};
pub use grid::PixelGrid;
pub use pixel::{Rgba8, CHANNELS};

/// Prelude module for convenient imports.
///
/// ```
/// use alphakey_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::PixelGrid;
    pub use crate::pixel::{Rgba8, CHANNELS};
}
