//! White background removal.
//!
//! Classifies every pixel as background or foreground and returns a new grid
//! where background pixels are fully transparent black and everything else
//! is copied unchanged, alpha included.
//!
//! # Classification
//!
//! - [`WhiteMatch::Threshold`] - red, green and blue each strictly greater
//!   than the threshold. The default rule, `Threshold(200)`.
//! - [`WhiteMatch::Distance`] - Euclidean RGB distance to pure white
//!   strictly less than the given radius.
//!
//! Alpha never takes part in classification.
//!
//! # Example
//!
//! ```rust
//! use alphakey_core::{PixelGrid, Rgba8};
//! use alphakey_ops::background::{is_near_white, remove_white_background};
//!
//! assert!(is_near_white(Rgba8::new(201, 201, 201, 100)));
//! assert!(!is_near_white(Rgba8::new(200, 200, 200, 255)));
//!
//! let grid = PixelGrid::filled(4, 4, Rgba8::WHITE);
//! let keyed = remove_white_background(&grid);
//! assert_eq!(keyed.pixel(0, 0), Some(Rgba8::TRANSPARENT));
//! assert_eq!(grid.pixel(0, 0), Some(Rgba8::WHITE));
//! ```

use alphakey_core::{PixelGrid, Rgba8};
use tracing::debug;

use crate::{OpsError, OpsResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default per-channel threshold for the near-white test.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 200;

/// Rule deciding which pixels count as white background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WhiteMatch {
    /// R, G and B each strictly greater than the value.
    Threshold(u8),
    /// Euclidean RGB distance to `(255, 255, 255)` strictly less than the value.
    Distance(f32),
}

impl Default for WhiteMatch {
    fn default() -> Self {
        WhiteMatch::Threshold(DEFAULT_WHITE_THRESHOLD)
    }
}

impl WhiteMatch {
    /// Returns `true` if `px` is background under this rule.
    #[inline]
    pub fn matches(self, px: Rgba8) -> bool {
        match self {
            WhiteMatch::Threshold(t) => px.r > t && px.g > t && px.b > t,
            WhiteMatch::Distance(radius) => {
                let dr = 255.0 - px.r as f32;
                let dg = 255.0 - px.g as f32;
                let db = 255.0 - px.b as f32;
                dr * dr + dg * dg + db * db < radius * radius && radius > 0.0
            }
        }
    }

    /// Checks that the rule parameters are usable.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] for a negative or non-finite distance.
    pub fn validate(self) -> OpsResult<Self> {
        match self {
            WhiteMatch::Distance(d) if !d.is_finite() || d < 0.0 => Err(
                OpsError::InvalidParameter(format!("distance must be a finite value >= 0, got {d}")),
            ),
            rule => Ok(rule),
        }
    }
}

impl std::fmt::Display for WhiteMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WhiteMatch::Threshold(t) => write!(f, "threshold > {t}"),
            WhiteMatch::Distance(d) => write!(f, "distance < {d}"),
        }
    }
}

/// Near-white test with the default threshold of 200.
///
/// `true` iff red, green and blue are all strictly greater than 200.
#[inline]
pub fn is_near_white(px: Rgba8) -> bool {
    WhiteMatch::default().matches(px)
}

#[inline]
fn key(px: Rgba8, rule: WhiteMatch) -> Rgba8 {
    if rule.matches(px) {
        Rgba8::TRANSPARENT
    } else {
        px
    }
}

/// Removes the white background using the default rule.
///
/// Equivalent to `remove_background(input, WhiteMatch::default())`.
pub fn remove_white_background(input: &PixelGrid) -> PixelGrid {
    remove_background(input, WhiteMatch::default())
}

/// Returns a new grid with every pixel matching `rule` set to
/// [`Rgba8::TRANSPARENT`] and every other pixel copied unchanged.
///
/// The output has the same dimensions as `input`; an empty grid yields an
/// empty grid. `input` is never modified.
pub fn remove_background(input: &PixelGrid, rule: WhiteMatch) -> PixelGrid {
    let (width, height) = input.dimensions();
    debug!(width, height, %rule, "removing background");

    #[cfg(feature = "parallel")]
    let output = {
        let mut out = input.clone();
        out.pixels_mut()
            .par_iter_mut()
            .for_each(|px| *px = key(*px, rule));
        out
    };

    #[cfg(not(feature = "parallel"))]
    let output = input.map_pixels(|px| key(px, rule));

    output
}

/// Counts the pixels of `input` that `rule` would make transparent.
pub fn count_near_white(input: &PixelGrid, rule: WhiteMatch) -> usize {
    #[cfg(feature = "parallel")]
    {
        input.pixels().par_iter().filter(|&&px| rule.matches(px)).count()
    }

    #[cfg(not(feature = "parallel"))]
    {
        input.pixels().iter().filter(|&&px| rule.matches(px)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert!(is_near_white(Rgba8::new(201, 201, 201, 255)));
        assert!(!is_near_white(Rgba8::new(200, 200, 200, 255)));
        assert!(!is_near_white(Rgba8::new(255, 255, 200, 255)));
        assert!(!is_near_white(Rgba8::new(200, 255, 255, 255)));
        assert!(!is_near_white(Rgba8::new(255, 200, 255, 255)));
    }

    #[test]
    fn test_threshold_ignores_alpha() {
        assert!(is_near_white(Rgba8::new(255, 255, 255, 0)));
        assert!(is_near_white(Rgba8::new(230, 240, 250, 17)));
        assert!(!is_near_white(Rgba8::new(0, 0, 0, 255)));
    }

    #[test]
    fn test_threshold_sweep() {
        // every value on one channel, the other two well above the threshold
        for v in 0..=255u8 {
            let expected = v > 200;
            assert_eq!(is_near_white(Rgba8::new(v, 255, 255, 255)), expected, "r = {v}");
            assert_eq!(is_near_white(Rgba8::new(255, v, 255, 255)), expected, "g = {v}");
            assert_eq!(is_near_white(Rgba8::new(255, 255, v, 255)), expected, "b = {v}");
        }
    }

    #[test]
    fn test_custom_threshold() {
        let rule = WhiteMatch::Threshold(180);
        assert!(rule.matches(Rgba8::gray(190)));
        assert!(!WhiteMatch::default().matches(Rgba8::gray(190)));
        // 255 can never be exceeded
        assert!(!WhiteMatch::Threshold(255).matches(Rgba8::WHITE));
    }

    #[test]
    fn test_distance_rule() {
        let rule = WhiteMatch::Distance(30.0);
        assert!(rule.matches(Rgba8::WHITE));
        assert!(rule.matches(Rgba8::gray(240)));
        // sqrt(3 * 20^2) ~ 34.6
        assert!(!rule.matches(Rgba8::gray(235)));
        assert!(!WhiteMatch::Distance(100.0).matches(Rgba8::BLACK));
        assert!(!WhiteMatch::Distance(0.0).matches(Rgba8::WHITE));
    }

    #[test]
    fn test_validate() {
        assert!(WhiteMatch::Distance(12.5).validate().is_ok());
        assert!(WhiteMatch::Distance(-1.0).validate().is_err());
        assert!(WhiteMatch::Distance(f32::NAN).validate().is_err());
        assert!(WhiteMatch::Threshold(0).validate().is_ok());
    }

    #[test]
    fn test_reference_pixels() {
        let cases = [
            (Rgba8::new(255, 255, 255, 255), Rgba8::new(0, 0, 0, 0)),
            (Rgba8::new(0, 0, 0, 255), Rgba8::new(0, 0, 0, 255)),
            (Rgba8::new(201, 201, 201, 100), Rgba8::new(0, 0, 0, 0)),
            (Rgba8::new(200, 200, 200, 255), Rgba8::new(200, 200, 200, 255)),
        ];
        let input = PixelGrid::from_pixels(4, 1, cases.iter().map(|c| c.0).collect()).unwrap();
        let output = remove_white_background(&input);
        for (x, (_, expected)) in cases.iter().enumerate() {
            assert_eq!(output.pixel(x as u32, 0), Some(*expected), "pixel {x}");
        }
    }

    #[test]
    fn test_keeps_dimensions_and_source() {
        let mut input = PixelGrid::filled(7, 3, Rgba8::WHITE);
        input.set_pixel(3, 1, Rgba8::new(10, 220, 230, 40)).unwrap();
        let snapshot = input.clone();

        let output = remove_white_background(&input);

        assert_eq!(output.dimensions(), (7, 3));
        assert_eq!(input, snapshot);
        assert_eq!(output.pixel(3, 1), Some(Rgba8::new(10, 220, 230, 40)));
        assert_eq!(output.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_empty_grid() {
        for (w, h) in [(0, 0), (0, 5), (5, 0)] {
            let output = remove_white_background(&PixelGrid::new(w, h));
            assert_eq!(output.dimensions(), (w, h));
            assert!(output.is_empty());
        }
    }

    #[test]
    fn test_idempotent() {
        let pixels: Vec<Rgba8> = (0..=255u8)
            .map(|v| Rgba8::new(v, v.wrapping_mul(7), 255 - v, v / 2))
            .collect();
        let input = PixelGrid::from_pixels(16, 16, pixels).unwrap();

        let once = remove_white_background(&input);
        let twice = remove_white_background(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_count_near_white() {
        let mut grid = PixelGrid::filled(5, 5, Rgba8::WHITE);
        grid.set_pixel(0, 0, Rgba8::BLACK).unwrap();
        grid.set_pixel(4, 4, Rgba8::gray(200)).unwrap();
        assert_eq!(count_near_white(&grid, WhiteMatch::default()), 23);
        assert_eq!(count_near_white(&grid, WhiteMatch::Threshold(199)), 24);
    }
}
