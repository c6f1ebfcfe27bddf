//! Image info command.
//!
//! Shows format, dimensions and file size, plus how many pixels the active
//! rule would make transparent. With `--header-only` the pixel data is never
//! decoded and the keyed count is left out.

use crate::config::Settings;
use crate::InfoArgs;
use alphakey_io::{decode_from_memory, read_info, Format};
use alphakey_ops::count_near_white;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::trace;

/// What gets printed for one file.
#[derive(Debug, Clone, PartialEq)]
struct Report {
    format: Format,
    width: u32,
    height: u32,
    file_size: u64,
    /// Keyed pixel count, `None` when only the header was read.
    keyed: Option<usize>,
}

/// Runs the info command.
pub fn run(args: InfoArgs, settings: &Settings, verbose: u8) -> Result<()> {
    let rule = settings.rule(args.rule.threshold, args.rule.distance)?;

    for (i, raw) in args.input.iter().enumerate() {
        let path = super::normalize_separators(raw);
        trace!(path = %path.display(), header_only = args.header_only, "info");

        let report = if args.header_only {
            read_header(&path)?
        } else {
            read_full(&path, |grid| count_near_white(grid, rule))?
        };

        if i > 0 {
            println!();
        }
        println!("{}", path.display());
        println!("  Format:     {} ({})", report.format, report.format.mime_type());
        println!("  Resolution: {}x{}", report.width, report.height);
        println!("  Alpha:      {}", if report.format.supports_alpha() { "yes" } else { "no" });
        println!("  File size:  {}", super::format_size(report.file_size));
        if let Some(keyed) = report.keyed {
            let total = report.width as usize * report.height as usize;
            println!("  Pixels:     {}", total);
            if total > 0 {
                println!(
                    "  Keyed:      {} ({:.1}%)",
                    keyed,
                    keyed as f64 * 100.0 / total as f64
                );
            } else {
                println!("  Keyed:      0");
            }
        }
        if verbose > 0 {
            println!("  Rule:       {}", rule);
        }
    }

    Ok(())
}

fn read_header(path: &Path) -> Result<Report> {
    let info = read_info(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    Ok(Report {
        format: info.format,
        width: info.width,
        height: info.height,
        file_size: info.file_size,
        keyed: None,
    })
}

/// Reads the file once and decodes it from memory.
fn read_full(path: &Path, count: impl Fn(&alphakey_core::PixelGrid) -> usize) -> Result<Report> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    let grid = decode_from_memory(&bytes).with_context(|| format!("Failed to load: {}", path.display()))?;
    Ok(Report {
        format: Format::from_bytes(&bytes),
        width: grid.width(),
        height: grid.height(),
        file_size: bytes.len() as u64,
        keyed: Some(count(&grid)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleArgs;
    use alphakey_core::{PixelGrid, Rgba8};
    use alphakey_ops::WhiteMatch;
    use tempfile::TempDir;

    fn write_input(dir: &Path) -> std::path::PathBuf {
        let mut grid = PixelGrid::filled(5, 4, Rgba8::WHITE);
        grid.set_pixel(1, 1, Rgba8::BLACK).unwrap();
        grid.set_pixel(3, 2, Rgba8::new(120, 240, 240, 255)).unwrap();
        alphakey_io::encode(&grid, dir.join("art.png")).unwrap()
    }

    #[test]
    fn test_read_full_counts_keyed() {
        let dir = TempDir::new().unwrap();
        let input = write_input(dir.path());

        let report = read_full(&input, |g| count_near_white(g, WhiteMatch::default())).unwrap();
        assert_eq!(report.format, Format::Png);
        assert_eq!((report.width, report.height), (5, 4));
        assert_eq!(report.file_size, std::fs::metadata(&input).unwrap().len());
        assert_eq!(report.keyed, Some(18));
    }

    #[test]
    fn test_header_matches_full_read() {
        let dir = TempDir::new().unwrap();
        let input = write_input(dir.path());

        let header = read_header(&input).unwrap();
        let full = read_full(&input, |_| 0).unwrap();
        assert_eq!(header.keyed, None);
        assert_eq!(
            (header.format, header.width, header.height, header.file_size),
            (full.format, full.width, full.height, full.file_size)
        );
    }

    #[test]
    fn test_run_missing_file() {
        let args = InfoArgs {
            input: vec!["does/not/exist.png".into()],
            header_only: false,
            rule: RuleArgs::default(),
        };
        assert!(run(args, &Settings::default(), 0).is_err());
    }
}
