//! CLI command implementations

pub mod convert;
pub mod info;

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Turns a user-supplied path into a `PathBuf`, treating `\` as a separator.
pub fn normalize_separators(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace('\\', "/"))
}

/// Parses a `WIDTHxHEIGHT` size such as `300x310`.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = s.trim().split_once(['x', 'X']) else {
        bail!("Invalid size '{}', expected WIDTHxHEIGHT", s);
    };
    let width = w
        .trim()
        .parse()
        .with_context(|| format!("Invalid width in size '{}'", s))?;
    let height = h
        .trim()
        .parse()
        .with_context(|| format!("Invalid height in size '{}'", s))?;
    Ok((width, height))
}

/// `<dir>/<stem>_transparent.png` next to the input.
pub fn default_output(input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("Cannot derive an output name from {}", input.display()))?;
    let mut name = OsString::from(stem);
    name.push("_transparent.png");
    Ok(input.with_file_name(name))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(
            normalize_separators(r"images\cartoon.jpg"),
            PathBuf::from("images/cartoon.jpg")
        );
        assert_eq!(normalize_separators("a/b.png"), PathBuf::from("a/b.png"));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("300x310").unwrap(), (300, 310));
        assert_eq!(parse_size(" 64X48 ").unwrap(), (64, 48));
        assert!(parse_size("300").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("-1x5").is_err());
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("shots/cartoon.jpg")).unwrap(),
            PathBuf::from("shots/cartoon_transparent.png")
        );
        assert_eq!(
            default_output(Path::new("logo")).unwrap(),
            PathBuf::from("logo_transparent.png")
        );
        assert!(default_output(Path::new("")).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
