//! I/O traits for image readers and writers.
//!
//! These traits define the interface for format-specific implementations.

use crate::IoResult;
use alphakey_core::PixelGrid;
use std::path::Path;

/// Trait for image format readers.
///
/// Implement this trait to add support for reading a new image format.
/// Readers always return RGBA8, whatever the source layout was.
///
/// # Example
///
/// ```rust,ignore
/// use alphakey_io::{ImageReader, IoResult};
/// use alphakey_core::PixelGrid;
///
/// struct MyFormatReader;
///
/// impl ImageReader for MyFormatReader {
///     fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelGrid> {
///         // Decode implementation
///     }
///
///     fn read_dimensions(&self, data: &[u8]) -> IoResult<(u32, u32)> {
///         // Header-only parse
///     }
/// }
/// ```
pub trait ImageReader {
    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelGrid> {
        let data = std::fs::read(path.as_ref())?;
        self.read_from_memory(&data)
    }

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelGrid>;

    /// Reads only the image dimensions from the header.
    fn read_dimensions(&self, data: &[u8]) -> IoResult<(u32, u32)>;
}

/// Trait for image format writers.
///
/// Implement this trait to add support for writing a new image format.
pub trait ImageWriter {
    /// Writes an image to memory.
    fn write_to_memory(&self, grid: &PixelGrid) -> IoResult<Vec<u8>>;
}
