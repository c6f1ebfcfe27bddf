//! BMP format support (read only).
//!
//! Decoding goes through the `image` crate's BMP codec, which handles the
//! header variants (core, info, V4/V5), palettes and RLE compression.
//! 32-bit bitmaps keep their alpha channel.

use crate::{ImageReader, IoError, IoResult};
use alphakey_core::PixelGrid;
use image::{ImageFormat, ImageReader as CodecReader};
use std::io::Cursor;
use std::path::Path;
use tracing::trace;

/// BMP reader.
#[derive(Debug, Clone, Default)]
pub struct BmpReader;

impl BmpReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for BmpReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelGrid> {
        let img = CodecReader::with_format(Cursor::new(data), ImageFormat::Bmp)
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        trace!(width, height, color = ?img.color(), "bmp decoded");

        Ok(PixelGrid::from_raw_rgba(width, height, rgba.into_raw())?)
    }

    fn read_dimensions(&self, data: &[u8]) -> IoResult<(u32, u32)> {
        CodecReader::with_format(Cursor::new(data), ImageFormat::Bmp)
            .into_dimensions()
            .map_err(|e| IoError::DecodeError(e.to_string()))
    }
}

/// Reads a BMP file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    BmpReader::new().read(path)
}
