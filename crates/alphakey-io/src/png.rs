//! PNG format support.
//!
//! Reading accepts every PNG color type: palette, low bit depth and `tRNS`
//! images are expanded by the decoder, 16-bit samples keep their high byte.
//! Writing always produces 8-bit RGBA, so alpha survives a round trip
//! exactly.
//!
//! # Example
//!
//! ```rust,ignore
//! use alphakey_io::png::{self, PngWriter};
//! use alphakey_io::ImageWriter;
//!
//! let grid = png::read("input.png")?;
//! let bytes = PngWriter::new().write_to_memory(&grid)?;
//! ```

use crate::expand::{self, Layout};
use crate::{ImageReader, ImageWriter, IoError, IoResult};
use alphakey_core::PixelGrid;
use std::io::Cursor;
use std::path::Path;
use tracing::{trace, warn};

/// PNG reader.
#[derive(Debug, Clone, Default)]
pub struct PngReader;

impl PngReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for PngReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelGrid> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        buf.truncate(info.buffer_size());

        trace!(
            width = info.width,
            height = info.height,
            color = ?info.color_type,
            depth = ?info.bit_depth,
            "png frame decoded"
        );

        let samples = match info.bit_depth {
            png::BitDepth::Eight => buf,
            png::BitDepth::Sixteen => {
                warn!("16-bit PNG reduced to 8 bits per channel");
                expand::strip_16(&buf)
            }
            depth => {
                // EXPAND lifts 1/2/4-bit data to 8 bits
                return Err(IoError::DecodeError(format!(
                    "unexpected bit depth after expansion: {:?}",
                    depth
                )));
            }
        };

        let layout = match info.color_type {
            png::ColorType::Grayscale => Layout::Gray,
            png::ColorType::GrayscaleAlpha => Layout::GrayAlpha,
            png::ColorType::Rgb => Layout::Rgb,
            png::ColorType::Rgba => Layout::Rgba,
            png::ColorType::Indexed => {
                return Err(IoError::DecodeError(
                    "indexed PNG was not expanded".into(),
                ));
            }
        };

        let rgba = expand::to_rgba8(layout, &samples)?;
        Ok(PixelGrid::from_raw_rgba(info.width, info.height, rgba)?)
    }

    fn read_dimensions(&self, data: &[u8]) -> IoResult<(u32, u32)> {
        let decoder = png::Decoder::new(Cursor::new(data));
        let reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        let info = reader.info();
        Ok((info.width, info.height))
    }
}

/// PNG writer.
///
/// Output is always 8-bit RGBA with default deflate settings and an sRGB
/// chunk.
#[derive(Debug, Clone, Default)]
pub struct PngWriter;

impl PngWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for PngWriter {
    fn write_to_memory(&self, grid: &PixelGrid) -> IoResult<Vec<u8>> {
        if grid.is_empty() {
            return Err(IoError::EncodeError(format!(
                "cannot write an empty {}x{} image as PNG",
                grid.width(),
                grid.height()
            )));
        }

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, grid.width(), grid.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

            let mut writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .write_image_data(&grid.to_raw_rgba())
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        Ok(out)
    }
}

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    PngReader::new().read(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphakey_core::Rgba8;

    fn gradient(width: u32, height: u32) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let px = Rgba8::new((x * 16) as u8, (y * 16) as u8, 64, ((x + y) * 8) as u8);
                grid.set_pixel(x, y, px).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_roundtrip_rgba_memory() {
        let grid = gradient(16, 16);
        let bytes = PngWriter::new().write_to_memory(&grid).unwrap();
        let loaded = PngReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_read_dimensions() {
        let bytes = PngWriter::new().write_to_memory(&gradient(7, 3)).unwrap();
        assert_eq!(PngReader::new().read_dimensions(&bytes).unwrap(), (7, 3));
    }

    #[test]
    fn test_rgb_png_gets_opaque_alpha() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 20, 30, 250, 250, 250]).unwrap();
        }
        let grid = PngReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(grid.pixel(0, 0), Some(Rgba8::opaque(10, 20, 30)));
        assert_eq!(grid.pixel(1, 0), Some(Rgba8::opaque(250, 250, 250)));
    }

    #[test]
    fn test_sixteen_bit_keeps_high_byte() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 1, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0xC8, 0xFF]).unwrap();
        }
        let grid = PngReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(grid.pixel(0, 0), Some(Rgba8::gray(0xC8)));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = PngReader::new().read_from_memory(b"not a png at all").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_empty_grid_is_encode_error() {
        let err = PngWriter::new().write_to_memory(&PixelGrid::new(0, 0)).unwrap_err();
        assert!(err.is_encode_failure());
    }
}
