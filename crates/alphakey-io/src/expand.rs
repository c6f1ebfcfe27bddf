//! Sample layout expansion to interleaved RGBA8.
//!
//! Decoders hand back whatever layout the file used; these helpers turn it
//! into the `[R G B A ...]` bytes [`alphakey_core::PixelGrid`] is built from.

use crate::{IoError, IoResult};

/// Source sample layout (8 bits per sample).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl Layout {
    pub(crate) fn channels(self) -> usize {
        match self {
            Layout::Gray => 1,
            Layout::GrayAlpha => 2,
            Layout::Rgb => 3,
            Layout::Rgba => 4,
        }
    }
}

/// Expands 8-bit samples in `layout` to RGBA8. Missing alpha becomes 255.
pub(crate) fn to_rgba8(layout: Layout, data: &[u8]) -> IoResult<Vec<u8>> {
    let channels = layout.channels();
    if data.len() % channels != 0 {
        return Err(IoError::DecodeError(format!(
            "{} bytes is not a multiple of {} channels",
            data.len(),
            channels
        )));
    }

    let rgba = match layout {
        Layout::Rgba => data.to_vec(),
        Layout::Rgb => data
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        Layout::Gray => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        Layout::GrayAlpha => data
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
    };
    Ok(rgba)
}

/// Keeps the high byte of each big-endian 16-bit sample.
pub(crate) fn strip_16(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(2).map(|s| s[0]).collect()
}
