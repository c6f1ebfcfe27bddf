//! Pixel grid container.
//!
//! [`PixelGrid`] is the in-memory form of a decoded raster image and the only
//! type passed between the decode, transform, scale and encode stages.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom. The pixel at
//! `(x, y)` lives at index `y * width + x`:
//!
//! ```text
//! index: [ 0      1      2    ... w-1   ]  <- row 0
//!        [ w      w+1    w+2  ... 2w-1  ]  <- row 1
//!        ...
//! ```
//!
//! # Invariants
//!
//! - `pixels.len() == width * height` always holds. Constructors that take
//!   external buffers check it and fail with [`Error::InvalidInput`].
//! - A grid with a zero width or height is valid and holds no pixels.
//!
//! # Usage
//!
//! ```rust
//! use alphakey_core::{PixelGrid, Rgba8};
//!
//! let grid = PixelGrid::filled(3, 2, Rgba8::WHITE);
//! assert_eq!(grid.dimensions(), (3, 2));
//! assert_eq!(grid.len(), 6);
//! for (_, _, px) in grid.enumerate_pixels() {
//!     assert_eq!(px, Rgba8::WHITE);
//! }
//! ```

use crate::{Error, Result, Rgba8, CHANNELS};

/// Owned RGBA8 pixel grid.
///
/// Cloning copies the pixel buffer, so two grids never alias each other.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Grid width in pixels
    width: u32,
    /// Grid height in pixels
    height: u32,
    /// Row-major pixel buffer, `width * height` long
    pixels: Vec<Rgba8>,
}

impl PixelGrid {
    /// Creates a grid filled with [`Rgba8::TRANSPARENT`].
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use alphakey_core::{PixelGrid, Rgba8};
    ///
    /// let grid = PixelGrid::new(16, 9);
    /// assert_eq!(grid.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    /// Creates a grid with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![pixel; count],
        }
    }

    /// Creates a grid from an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `pixels.len() != width * height`,
    /// and [`Error::InvalidDimensions`] if that product overflows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use alphakey_core::{PixelGrid, Rgba8};
    ///
    /// let grid = PixelGrid::from_pixels(2, 1, vec![Rgba8::BLACK, Rgba8::WHITE]).unwrap();
    /// assert_eq!(grid.pixel(1, 0), Some(Rgba8::WHITE));
    ///
    /// assert!(PixelGrid::from_pixels(2, 2, vec![Rgba8::BLACK]).is_err());
    /// ```
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(Error::invalid_input(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a grid from interleaved `[R G B A ...]` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `data.len() != width * height * 4`.
    pub fn from_raw_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = pixel_count(width, height)?
            .checked_mul(CHANNELS)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_input(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        let pixels = data
            .chunks_exact(CHANNELS)
            .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns the pixels as interleaved `[R G B A ...]` bytes.
    pub fn to_raw_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_array()).collect()
    }

    /// Grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns `true` if the grid holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns the buffer index of `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Returns the pixel at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(x, y)` lies outside the grid.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba8) -> Result<()> {
        let i = self
            .index_of(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))?;
        self.pixels[i] = pixel;
        Ok(())
    }

    /// Row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Mutable row-major pixel slice.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Consumes the grid and returns its pixel buffer.
    pub fn into_pixels(self) -> Vec<Rgba8> {
        self.pixels
    }

    /// Returns row `y`, or `None` if out of bounds.
    pub fn row(&self, y: u32) -> Option<&[Rgba8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.pixels[start..start + self.width as usize])
    }

    /// Iterates over rows top-to-bottom.
    ///
    /// Yields nothing for an empty grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba8]> + '_ {
        // chunks_exact(0) panics, and a zero-width grid has no rows anyway
        let w = (self.width as usize).max(1);
        self.pixels.chunks_exact(w)
    }

    /// Iterates over all pixels with their coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use alphakey_core::{PixelGrid, Rgba8};
    ///
    /// let grid = PixelGrid::filled(2, 2, Rgba8::BLACK);
    /// let coords: Vec<_> = grid.enumerate_pixels().map(|(x, y, _)| (x, y)).collect();
    /// assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// ```
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba8)> + '_ {
        let w = (self.width as usize).max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &px)| ((i % w) as u32, (i / w) as u32, px))
    }

    /// Builds a new grid of the same size by mapping every pixel.
    ///
    /// The source grid is left untouched.
    pub fn map_pixels<F>(&self, f: F) -> Self
    where
        F: Fn(Rgba8) -> Rgba8,
    {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&px| f(px)).collect(),
        }
    }
}

impl std::fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = PixelGrid::new(100, 50);
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 50);
        assert_eq!(grid.len(), 5000);
        assert!(grid.pixels().iter().all(|px| px.is_transparent()));
    }

    #[test]
    fn test_grid_empty() {
        let grid = PixelGrid::new(0, 7);
        assert!(grid.is_empty());
        assert_eq!(grid.dimensions(), (0, 7));
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.enumerate_pixels().count(), 0);
        assert_eq!(grid.pixel(0, 0), None);
    }

    #[test]
    fn test_grid_set_get_pixel() {
        let mut grid = PixelGrid::new(10, 10);
        grid.set_pixel(5, 3, Rgba8::opaque(1, 2, 3)).unwrap();
        assert_eq!(grid.pixel(5, 3), Some(Rgba8::opaque(1, 2, 3)));
        assert_eq!(grid.pixels()[3 * 10 + 5], Rgba8::opaque(1, 2, 3));
        assert_eq!(grid.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_grid_set_out_of_bounds() {
        let mut grid = PixelGrid::new(4, 4);
        let err = grid.set_pixel(4, 0, Rgba8::WHITE).unwrap_err();
        assert!(err.is_bounds_error());
        assert_eq!(grid.pixel(10, 10), None);
    }

    #[test]
    fn test_grid_from_pixels_wrong_size() {
        let err = PixelGrid::from_pixels(3, 3, vec![Rgba8::WHITE; 8]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_grid_raw_rgba() {
        let data = vec![10, 20, 30, 40, 50, 60, 70, 80];
        let grid = PixelGrid::from_raw_rgba(2, 1, data.clone()).unwrap();
        assert_eq!(grid.pixel(1, 0), Some(Rgba8::new(50, 60, 70, 80)));
        assert_eq!(grid.to_raw_rgba(), data);

        assert!(PixelGrid::from_raw_rgba(2, 1, vec![0; 7]).is_err());
    }

    #[test]
    fn test_grid_rows() {
        let mut grid = PixelGrid::new(3, 2);
        grid.set_pixel(2, 1, Rgba8::WHITE).unwrap();
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], Rgba8::WHITE);
        assert_eq!(grid.row(1), Some(rows[1]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn test_grid_map_pixels_leaves_source() {
        let src = PixelGrid::filled(4, 4, Rgba8::WHITE);
        let dst = src.map_pixels(|_| Rgba8::TRANSPARENT);
        assert!(src.pixels().iter().all(|&px| px == Rgba8::WHITE));
        assert!(dst.pixels().iter().all(|&px| px == Rgba8::TRANSPARENT));
        assert_eq!(src.dimensions(), dst.dimensions());
    }

    #[test]
    fn test_grid_clone_is_independent() {
        let a = PixelGrid::filled(2, 2, Rgba8::BLACK);
        let mut b = a.clone();
        b.set_pixel(0, 0, Rgba8::WHITE).unwrap();
        assert_eq!(a.pixel(0, 0), Some(Rgba8::BLACK));
        assert_eq!(b.pixel(0, 0), Some(Rgba8::WHITE));
    }
}
