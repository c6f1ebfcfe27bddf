//! JPEG format support (read only).
//!
//! JPEG carries no alpha, so every decoded pixel is opaque. Grayscale is
//! expanded to RGB and CMYK is converted with the usual approximate
//! `(1 - c) * (1 - k)` formula.

use crate::expand::{self, Layout};
use crate::{ImageReader, IoError, IoResult};
use alphakey_core::PixelGrid;
use std::io::Cursor;
use std::path::Path;
use tracing::trace;

/// JPEG file reader.
#[derive(Debug, Clone, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for JpegReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelGrid> {
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;
        trace!(width, height, format = ?info.pixel_format, "jpeg decoded");

        let (layout, samples) = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => (Layout::Rgb, pixels),
            jpeg_decoder::PixelFormat::L8 => (Layout::Gray, pixels),
            jpeg_decoder::PixelFormat::L16 => (Layout::Gray, expand::strip_16(&pixels)),
            jpeg_decoder::PixelFormat::CMYK32 => (Layout::Rgb, cmyk_to_rgb(&pixels)),
        };

        let rgba = expand::to_rgba8(layout, &samples)?;
        Ok(PixelGrid::from_raw_rgba(width, height, rgba)?)
    }

    fn read_dimensions(&self, data: &[u8]) -> IoResult<(u32, u32)> {
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        decoder
            .read_info()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;
        Ok((info.width as u32, info.height as u32))
    }
}

/// CMYK to RGB (approximate, no color management).
fn cmyk_to_rgb(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(4)
        .flat_map(|cmyk| {
            let c = cmyk[0] as f32 / 255.0;
            let m = cmyk[1] as f32 / 255.0;
            let y = cmyk[2] as f32 / 255.0;
            let k = cmyk[3] as f32 / 255.0;

            let r = ((1.0 - c) * (1.0 - k) * 255.0).round() as u8;
            let g = ((1.0 - m) * (1.0 - k) * 255.0).round() as u8;
            let b = ((1.0 - y) * (1.0 - k) * 255.0).round() as u8;

            [r, g, b]
        })
        .collect()
}

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    JpegReader::new().read(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmyk_to_rgb() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0]), vec![255, 255, 255]);
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 255]), vec![0, 0, 0]);
        assert_eq!(cmyk_to_rgb(&[255, 0, 0, 0]), vec![0, 255, 255]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = JpegReader::new()
            .read_from_memory(&[0xFF, 0xD8, 0xFF, 0x00, 0x01])
            .unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
