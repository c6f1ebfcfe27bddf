//! # alphakey-io
//!
//! Decoder/encoder adapter for alphakey.
//!
//! Reads common raster formats into a [`PixelGrid`] and writes grids back
//! out as PNG:
//!
//! - **PNG** - read and write, lossless with alpha
//! - **JPEG** - read only
//! - **BMP** - read only
//!
//! # Architecture
//!
//! - [`ImageReader`] - Trait for format readers
//! - [`ImageWriter`] - Trait for format writers
//! - [`decode`] / [`encode`] - High-level functions with format detection,
//!   `.png` suffix handling and atomic replacement
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use alphakey_io::{decode, encode};
//!
//! let grid = decode("cartoon.jpg")?;
//! let written = encode(&grid, "cartoon")?; // writes cartoon.png
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Notes |
//! |--------|------|-------|-------|
//! | PNG | Yes | Yes | 8/16-bit, palette, tRNS; written as RGBA8 |
//! | JPEG | Yes | No | Gray, RGB, CMYK |
//! | BMP | Yes | No | via `image` crate |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)
//! - `bmp` - BMP support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod expand;
mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "bmp")]
pub mod bmp;

pub use alphakey_core::PixelGrid;
pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Suffix that [`encode`] guarantees on every output path.
pub const PNG_SUFFIX: &str = ".png";

/// Reads an image from a file, detecting the format.
///
/// The format is detected from magic bytes first, then from the extension.
/// The result is always RGBA8.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` is not an existing regular file
/// - [`IoError::UnsupportedFormat`] if the format cannot be identified
/// - [`IoError::DecodeError`] if the file is not a valid image of that format
pub fn decode<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(IoError::FileNotFound(path.to_path_buf()));
    }

    let format = Format::detect(path)?;
    debug!(path = %path.display(), %format, "decoding");

    let grid = read_with_format(format, path)?;
    debug!(width = grid.width(), height = grid.height(), "decoded");
    Ok(grid)
}

/// Decodes an in-memory image, detecting the format from magic bytes only.
pub fn decode_from_memory(data: &[u8]) -> IoResult<PixelGrid> {
    match Format::from_bytes(data) {
        #[cfg(feature = "png")]
        Format::Png => png::PngReader::new().read_from_memory(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader::new().read_from_memory(data),

        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::BmpReader::new().read_from_memory(data),

        other => Err(unsupported(other, None)),
    }
}

fn read_with_format(format: Format, path: &Path) -> IoResult<PixelGrid> {
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::read(path),

        other => Err(unsupported(other, Some(path))),
    }
}

fn unsupported(format: Format, path: Option<&Path>) -> IoError {
    let what = match format {
        Format::Unknown => path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
        known => format!("{} (support not compiled in)", known),
    };
    IoError::UnsupportedFormat(what)
}

/// Returns the path [`encode`] will write for `path`.
///
/// Appends `.png` unless the path already ends in exactly `.png`. The check
/// is case-sensitive, so `out.PNG` becomes `out.PNG.png`.
///
/// # Example
///
/// ```rust
/// use alphakey_io::resolve_png_path;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_png_path("out"), PathBuf::from("out.png"));
/// assert_eq!(resolve_png_path("out.png"), PathBuf::from("out.png"));
/// assert_eq!(resolve_png_path("out.PNG"), PathBuf::from("out.PNG.png"));
/// ```
pub fn resolve_png_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path
        .as_os_str()
        .as_encoded_bytes()
        .ends_with(PNG_SUFFIX.as_bytes())
    {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(PNG_SUFFIX);
    PathBuf::from(name)
}

/// Writes a grid as PNG and returns the path actually written.
///
/// The requested extension is ignored: the output is always PNG, and `.png`
/// is appended per [`resolve_png_path`]. Data goes to a temporary file in
/// the destination directory which is renamed over the target only after
/// the whole image was written, so a failure never leaves a truncated file.
/// A new file gets the same mode a plain write would give it; an existing
/// file keeps its mode.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] on any encoder or filesystem failure.
#[cfg(feature = "png")]
pub fn encode<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> IoResult<PathBuf> {
    let target = resolve_png_path(path);
    let bytes = encode_to_memory(grid)?;

    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let fail = |e: &dyn std::fmt::Display| {
        IoError::EncodeError(format!("{}: {}", target.display(), e))
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".alphakey-").suffix(".tmp");
    // tempfile defaults to 0600; create like a plain write would (umask applies)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(|e| fail(&e))?;

    // an overwritten file keeps its mode
    if let Ok(existing) = std::fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| fail(&e))?;
    }

    tmp.write_all(&bytes).map_err(|e| fail(&e))?;
    tmp.as_file().sync_all().map_err(|e| fail(&e))?;
    tmp.persist(&target).map_err(|e| fail(&e.error))?;

    debug!(
        path = %target.display(),
        width = grid.width(),
        height = grid.height(),
        bytes = bytes.len(),
        "encoded"
    );
    Ok(target)
}

/// Encodes a grid as PNG bytes.
#[cfg(feature = "png")]
pub fn encode_to_memory(grid: &PixelGrid) -> IoResult<Vec<u8>> {
    png::PngWriter::new().write_to_memory(grid)
}

/// Header-level facts about an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Detected format.
    pub format: Format,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// File size in bytes.
    pub file_size: u64,
}

/// Bytes read by [`read_info`] before falling back to the whole file.
const HEADER_PREFIX: u64 = 64 * 1024;

/// Reads format and dimensions without decoding pixel data.
///
/// Only the leading bytes of the file are parsed; the whole file is read
/// only when the header does not fit in them (e.g. a JPEG with a large EXIF
/// block). Fails the same way [`decode`] does.
pub fn read_info<P: AsRef<Path>>(path: P) -> IoResult<ImageInfo> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(IoError::FileNotFound(path.to_path_buf()));
    }

    let file_size = std::fs::metadata(path)?.len();
    let format = Format::detect(path)?;

    let mut head = Vec::new();
    std::fs::File::open(path)?
        .take(HEADER_PREFIX)
        .read_to_end(&mut head)?;

    let (width, height) = match read_dimensions(format, &head, path) {
        Err(e) if file_size > head.len() as u64 => {
            trace!(path = %path.display(), error = %e, "header not in prefix, reading whole file");
            read_dimensions(format, &std::fs::read(path)?, path)?
        }
        result => result?,
    };

    Ok(ImageInfo {
        format,
        width,
        height,
        file_size,
    })
}

fn read_dimensions(format: Format, data: &[u8], path: &Path) -> IoResult<(u32, u32)> {
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::PngReader::new().read_dimensions(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader::new().read_dimensions(data),

        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::BmpReader::new().read_dimensions(data),

        other => Err(unsupported(other, Some(path))),
    }
}
