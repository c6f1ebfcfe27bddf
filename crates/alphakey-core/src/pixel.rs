//! 8-bit RGBA pixel type.
//!
//! [`Rgba8`] is the single pixel type used by alphakey. Every decoder
//! normalizes its output to it, and the PNG encoder writes it back out
//! unchanged.
//!
//! # Memory Layout
//!
//! `Rgba8` is `#[repr(C)]` with four `u8` fields in `r, g, b, a` order, so a
//! `[Rgba8]` slice has the same layout as interleaved `[R G B A R G B A ...]`
//! bytes.
//!
//! # Example
//!
//! ```
//! use alphakey_core::Rgba8;
//!
//! let px = Rgba8::opaque(255, 128, 64);
//! assert_eq!(px.a, 255);
//! assert_eq!(px.to_array(), [255, 128, 64, 255]);
//! assert!(Rgba8::TRANSPARENT.is_transparent());
//! ```

use std::fmt;

/// Number of channels in an [`Rgba8`] pixel.
pub const CHANNELS: usize = 4;

/// 8-bit per channel RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel value.
    pub r: u8,
    /// Green channel value.
    pub g: u8,
    /// Blue channel value.
    pub b: u8,
    /// Alpha channel value (0 = fully transparent, 255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black `(0, 0, 0, 0)`.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque white `(255, 255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Opaque black `(0, 0, 0, 255)`.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Creates a pixel from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel (alpha = 255).
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Creates an opaque gray pixel.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v, 255)
    }

    /// Returns `true` if alpha is zero.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Returns `true` if alpha is 255.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Returns the color channels as `[r, g, b]`.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    /// Creates a pixel from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(v: [u8; CHANNELS]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    /// Returns the channels normalized to `0.0..=1.0`.
    #[inline]
    pub fn to_f32(self) -> [f32; CHANNELS] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Creates a pixel from normalized channels, clamping and rounding.
    #[inline]
    pub fn from_f32(v: [f32; CHANNELS]) -> Self {
        Self::new(
            unit_to_u8(v[0]),
            unit_to_u8(v[1]),
            unit_to_u8(v[2]),
            unit_to_u8(v[3]),
        )
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<[u8; CHANNELS]> for Rgba8 {
    #[inline]
    fn from(v: [u8; CHANNELS]) -> Self {
        Self::from_array(v)
    }
}

impl From<Rgba8> for [u8; CHANNELS] {
    #[inline]
    fn from(px: Rgba8) -> Self {
        px.to_array()
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
