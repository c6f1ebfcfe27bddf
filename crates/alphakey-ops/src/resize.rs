//! Display scaling and resampling.
//!
//! Scales a [`PixelGrid`] to an exact target size for on-screen preview.
//! Resampling is separable (horizontal pass, then vertical) and runs in
//! premultiplied alpha, so fully transparent pixels contribute no color and
//! keyed edges do not pick up a dark fringe.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Triangle filter, widened to an area filter when
//!   downscaling (default)
//! - [`Filter::Bicubic`] - Mitchell-Netravali, sharper than bilinear
//! - [`Filter::Lanczos3`] - Sinc-based, sharpest, may ring
//!
//! # Example
//!
//! ```rust
//! use alphakey_core::{PixelGrid, Rgba8};
//! use alphakey_ops::resize::scale_to_fit;
//!
//! let grid = PixelGrid::filled(64, 48, Rgba8::opaque(30, 144, 255));
//! let preview = scale_to_fit(&grid, 300, 310).unwrap();
//! assert_eq!(preview.dimensions(), (300, 310));
//! ```

use std::fmt;
use std::str::FromStr;

use alphakey_core::{PixelGrid, Rgba8, CHANNELS};
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    #[default]
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    Bicubic,
    /// Lanczos-3 (high quality, may ring on hard edges).
    Lanczos3,
}

impl Filter {
    /// Names accepted by [`Filter::from_str`].
    pub const NAMES: [&'static str; 4] = ["nearest", "bilinear", "bicubic", "lanczos3"];

    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Lowercase name, as accepted by [`Filter::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "box" => Ok(Filter::Nearest),
            "bilinear" | "linear" | "triangle" => Ok(Filter::Bilinear),
            "bicubic" | "cubic" | "mitchell" => Ok(Filter::Bicubic),
            "lanczos3" | "lanczos" => Ok(Filter::Lanczos3),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown filter '{}', expected one of: {}",
                other,
                Filter::NAMES.join(", ")
            ))),
        }
    }
}

/// Half-open so a sample exactly between two sources picks one of them.
#[inline]
fn nearest_weight(x: f32) -> f32 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Mitchell-Netravali with B = C = 1/3.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Scales `grid` to exactly `width x height` with the bilinear filter.
///
/// The aspect ratio is not preserved; use [`fit_dimensions`] first for that.
///
/// # Errors
///
/// - [`OpsError::InvalidDimensions`] if either target dimension is zero
/// - [`OpsError::InvalidInput`] if `grid` has no pixels
pub fn scale_to_fit(grid: &PixelGrid, width: u32, height: u32) -> OpsResult<PixelGrid> {
    scale_to_fit_with(grid, width, height, Filter::Bilinear)
}

/// Scales `grid` to exactly `width x height` with the given filter.
///
/// Same contract as [`scale_to_fit`].
pub fn scale_to_fit_with(
    grid: &PixelGrid,
    width: u32,
    height: u32,
    filter: Filter,
) -> OpsResult<PixelGrid> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "target size must be > 0, got {}x{}",
            width, height
        )));
    }
    if grid.is_empty() {
        return Err(OpsError::InvalidInput(format!(
            "cannot scale an empty {}x{} grid",
            grid.width(),
            grid.height()
        )));
    }

    let (src_w, src_h) = grid.dimensions();
    debug!(src_w, src_h, width, height, %filter, "scaling");

    if (src_w, src_h) == (width, height) {
        trace!("target size equals source size, copying");
        return Ok(grid.clone());
    }

    let premult = premultiply(grid.pixels());
    let scaled = resize_f32(
        &premult,
        src_w as usize,
        src_h as usize,
        CHANNELS,
        width as usize,
        height as usize,
        filter,
    )?;
    let pixels = unpremultiply(&scaled);

    Ok(PixelGrid::from_pixels(width, height, pixels)?)
}

/// Converts pixels to premultiplied f32 RGBA in `[0, 1]`.
fn premultiply(pixels: &[Rgba8]) -> Vec<f32> {
    let mut data = Vec::with_capacity(pixels.len() * CHANNELS);
    for px in pixels {
        let [r, g, b, a] = px.to_f32();
        data.extend_from_slice(&[r * a, g * a, b * a, a]);
    }
    data
}

/// Converts premultiplied f32 RGBA back to straight-alpha pixels.
///
/// Anything whose alpha rounds to zero becomes [`Rgba8::TRANSPARENT`].
fn unpremultiply(data: &[f32]) -> Vec<Rgba8> {
    data.chunks_exact(CHANNELS)
        .map(|chunk| {
            let alpha = chunk[3].clamp(0.0, 1.0);
            if (alpha * 255.0).round() < 1.0 {
                return Rgba8::TRANSPARENT;
            }
            Rgba8::from_f32([chunk[0] / alpha, chunk[1] / alpha, chunk[2] / alpha, alpha])
        })
        .collect()
}

/// Resizes interleaved f32 image data.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `src_w` - Source width
/// * `src_h` - Source height
/// * `channels` - Number of channels (1 to 4)
/// * `dst_w` - Destination width
/// * `dst_h` - Destination height
/// * `filter` - Resampling filter
///
/// # Example
///
/// ```rust
/// use alphakey_ops::resize::{resize_f32, Filter};
///
/// let src = vec![0.5f32; 16 * 16 * 4];
/// let dst = resize_f32(&src, 16, 16, 4, 32, 32, Filter::Bilinear).unwrap();
/// assert_eq!(dst.len(), 32 * 32 * 4);
/// ```
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<f32>> {
    if !(1..=CHANNELS).contains(&channels) {
        return Err(OpsError::InvalidParameter(format!(
            "channels must be 1..={}, got {}",
            CHANNELS, channels
        )));
    }
    let expected = src_w
        .checked_mul(src_h)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} values, got {}",
            expected,
            src.len()
        )));
    }
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidDimensions("source size must be > 0".into()));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    // Two-pass separable resize: horizontal then vertical
    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, filter);
    let result = resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter);

    Ok(result)
}

/// Source taps and weights for one destination coordinate.
fn taps(dst: usize, scale: f32, src_len: usize, filter: Filter) -> (usize, Vec<f32>) {
    let widen = scale.max(1.0);
    let support = filter.support() * widen;
    let center = (dst as f32 + 0.5) * scale - 0.5;
    let first = ((center - support).floor().max(0.0)) as usize;
    let last = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

    let weights = (first..=last)
        .map(|s| filter.weight((s as f32 - center) / widen))
        .collect();
    (first, weights)
}

fn horizontal_row(
    src_row: &[f32],
    dst_row: &mut [f32],
    src_w: usize,
    channels: usize,
    filter: Filter,
) {
    let dst_w = dst_row.len() / channels;
    let scale = src_w as f32 / dst_w as f32;

    for x in 0..dst_w {
        let (first, weights) = taps(x, scale, src_w, filter);
        let mut sum = [0.0f32; CHANNELS];
        let mut weight_sum = 0.0f32;

        for (i, w) in weights.iter().enumerate() {
            let src_idx = (first + i) * channels;
            for c in 0..channels {
                sum[c] += src_row[src_idx + c] * w;
            }
            weight_sum += w;
        }

        if weight_sum != 0.0 {
            let dst_idx = x * channels;
            for c in 0..channels {
                dst_row[dst_idx + c] = sum[c] / weight_sum;
            }
        }
    }
}

/// Horizontal resize pass.
fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * src_h * channels];
    let src_stride = src_w * channels;

    #[cfg(feature = "parallel")]
    let rows = dst.par_chunks_mut(dst_w * channels);
    #[cfg(not(feature = "parallel"))]
    let rows = dst.chunks_mut(dst_w * channels);

    rows.enumerate().for_each(|(y, row)| {
        let src_row = &src[y * src_stride..(y + 1) * src_stride];
        horizontal_row(src_row, row, src_w, channels, filter);
    });

    dst
}

/// Vertical resize pass.
fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let stride = src_w * channels;
    let mut dst = vec![0.0f32; stride * dst_h];
    let scale = src_h as f32 / dst_h as f32;

    #[cfg(feature = "parallel")]
    let rows = dst.par_chunks_mut(stride);
    #[cfg(not(feature = "parallel"))]
    let rows = dst.chunks_mut(stride);

    rows.enumerate().for_each(|(y, row)| {
        let (first, weights) = taps(y, scale, src_h, filter);
        let weight_sum: f32 = weights.iter().sum();
        if weight_sum == 0.0 {
            return;
        }

        for (i, w) in weights.iter().enumerate() {
            let src_row = &src[(first + i) * stride..(first + i + 1) * stride];
            for (d, s) in row.iter_mut().zip(src_row) {
                *d += s * w;
            }
        }
        for d in row.iter_mut() {
            *d /= weight_sum;
        }
    });

    dst
}

/// Calculates the aspect-preserving dimensions for a target box.
///
/// The result is never zero in either dimension as long as the source and
/// the box are both non-empty. An empty source or a box with a zero side is
/// returned unchanged, so [`scale_to_fit`] rejects it.
///
/// # Example
///
/// ```rust
/// use alphakey_ops::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480 box
/// let (w, h) = fit_dimensions(1920, 1080, 640, 480);
/// assert_eq!((w, h), (640, 360)); // Letterboxed
/// ```
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (max_w, max_h);
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;
    let scale = scale_w.min(scale_h);

    let new_w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let new_h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);

    (new_w, new_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_filter_weights() {
        assert_abs_diff_eq!(Filter::Nearest.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::Nearest.weight(0.6), 0.0);

        assert_abs_diff_eq!(Filter::Bilinear.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::Bilinear.weight(0.5), 0.5);

        assert_abs_diff_eq!(Filter::Lanczos3.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::Lanczos3.weight(3.5), 0.0);
    }

    #[test]
    fn test_filter_names() {
        for name in Filter::NAMES {
            let filter: Filter = name.parse().unwrap();
            assert_eq!(filter.name(), name);
        }
        assert_eq!("Lanczos".parse::<Filter>().unwrap(), Filter::Lanczos3);
        assert!(matches!(
            "sharpest".parse::<Filter>(),
            Err(OpsError::InvalidParameter(_))
        ));
        assert_eq!(Filter::default(), Filter::Bilinear);
    }

    #[test]
    fn test_resize_f32_constant() {
        let src = vec![0.5f32; 4 * 4 * 4];
        for filter in [Filter::Nearest, Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3] {
            let dst = resize_f32(&src, 4, 4, 4, 9, 7, filter).unwrap();
            assert_eq!(dst.len(), 9 * 7 * 4);
            for v in dst {
                assert_abs_diff_eq!(v, 0.5, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_resize_f32_downscale() {
        let src = vec![0.25f32; 64 * 64 * 3];
        let dst = resize_f32(&src, 64, 64, 3, 16, 16, Filter::Lanczos3).unwrap();
        assert_eq!(dst.len(), 16 * 16 * 3);
    }

    #[test]
    fn test_resize_f32_rejects_bad_input() {
        assert!(resize_f32(&[0.0; 12], 2, 2, 4, 4, 4, Filter::Bilinear).is_err());
        assert!(resize_f32(&[0.0; 16], 2, 2, 4, 0, 4, Filter::Bilinear).is_err());
        assert!(resize_f32(&[0.0; 32], 2, 2, 8, 4, 4, Filter::Bilinear).is_err());
        assert!(resize_f32(&[], 0, 0, 4, 4, 4, Filter::Bilinear).is_err());
    }

    #[test]
    fn test_scale_exact_size() {
        let grid = PixelGrid::filled(13, 7, Rgba8::BLACK);
        for (w, h) in [(300, 310), (1, 1), (13, 7), (5, 40)] {
            let scaled = scale_to_fit(&grid, w, h).unwrap();
            assert_eq!(scaled.dimensions(), (w, h));
        }
    }

    #[test]
    fn test_scale_uniform_stays_uniform() {
        let color = Rgba8::opaque(30, 144, 255);
        let grid = PixelGrid::filled(10, 6, color);
        for filter in [Filter::Nearest, Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3] {
            let scaled = scale_to_fit_with(&grid, 23, 4, filter).unwrap();
            assert!(
                scaled.pixels().iter().all(|&px| px == color),
                "{filter} changed a uniform grid"
            );
        }
    }

    #[test]
    fn test_scale_no_dark_fringe() {
        let red = Rgba8::opaque(255, 0, 0);
        let grid = PixelGrid::from_pixels(2, 1, vec![red, Rgba8::TRANSPARENT]).unwrap();

        let scaled = scale_to_fit(&grid, 8, 1).unwrap();
        let mut saw_partial = false;
        for px in scaled.pixels() {
            if px.a == 0 {
                assert_eq!(*px, Rgba8::TRANSPARENT);
            } else {
                assert_eq!(px.rgb(), [255, 0, 0], "fringe at {px}");
                saw_partial |= px.a < 255;
            }
        }
        assert!(saw_partial);
    }

    #[test]
    fn test_scale_transparent_stays_transparent() {
        let grid = PixelGrid::new(8, 8);
        let scaled = scale_to_fit(&grid, 3, 3).unwrap();
        assert!(scaled.pixels().iter().all(|px| *px == Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_scale_errors() {
        let grid = PixelGrid::filled(4, 4, Rgba8::WHITE);
        assert!(matches!(
            scale_to_fit(&grid, 0, 10),
            Err(OpsError::InvalidDimensions(_))
        ));
        assert!(matches!(
            scale_to_fit(&grid, 10, 0),
            Err(OpsError::InvalidDimensions(_))
        ));
        assert!(matches!(
            scale_to_fit(&PixelGrid::new(0, 3), 10, 10),
            Err(OpsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_scale_leaves_source_alone() {
        let grid = PixelGrid::filled(4, 4, Rgba8::gray(90));
        let before = grid.clone();
        let _ = scale_to_fit(&grid, 2, 2).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_fit_dimensions() {
        // Wide image into square box
        assert_eq!(fit_dimensions(1920, 1080, 640, 640), (640, 360));

        // Tall image into square box
        assert_eq!(fit_dimensions(1080, 1920, 640, 640), (360, 640));

        // Smaller images are scaled up
        assert_eq!(fit_dimensions(320, 240, 640, 480), (640, 480));

        // Extreme aspect never collapses to zero
        assert_eq!(fit_dimensions(10_000, 1, 300, 310), (300, 1));

        assert_eq!(fit_dimensions(0, 0, 300, 310), (300, 310));
    }

    #[test]
    fn test_fit_dimensions_zero_box() {
        assert_eq!(fit_dimensions(100, 50, 0, 10), (0, 10));
        assert_eq!(fit_dimensions(100, 50, 10, 0), (10, 0));

        let grid = PixelGrid::filled(100, 50, Rgba8::BLACK);
        let (w, h) = fit_dimensions(grid.width(), grid.height(), 0, 10);
        assert!(matches!(
            scale_to_fit(&grid, w, h),
            Err(OpsError::InvalidDimensions(_))
        ));
    }
}
