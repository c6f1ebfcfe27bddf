//! # alphakey-ops
//!
//! Pixel operations for alphakey.
//!
//! # Modules
//!
//! - [`background`] - White background removal
//! - [`resize`] - Premultiplied display scaling and resampling
//!
//! # Common Operations
//!
//! ## Background removal
//!
//! ```rust,ignore
//! use alphakey_ops::background::{remove_background, WhiteMatch};
//!
//! let keyed = remove_background(&grid, WhiteMatch::Threshold(200));
//! ```
//!
//! ## Preview scaling
//!
//! ```rust,ignore
//! use alphakey_ops::resize::{fit_dimensions, scale_to_fit_with, Filter};
//!
//! let (w, h) = fit_dimensions(grid.width(), grid.height(), 300, 310);
//! let preview = scale_to_fit_with(&keyed, w, h, Filter::Lanczos3)?;
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Row/pixel parallelism via rayon (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod background;
pub mod resize;

pub use background::{
    count_near_white, is_near_white, remove_background, remove_white_background, WhiteMatch,
    DEFAULT_WHITE_THRESHOLD,
};
pub use error::{OpsError, OpsResult};
pub use resize::{fit_dimensions, scale_to_fit, scale_to_fit_with, Filter};
