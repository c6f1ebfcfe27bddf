//! alphakey - white background removal CLI
//!
//! Turns the white background of a picture transparent and writes the
//! result as PNG, optionally with a scaled preview.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod session;

#[derive(Parser)]
#[command(name = "alphakey")]
#[command(author, version, about = "Remove white backgrounds and write transparent PNGs")]
#[command(long_about = "
Makes every near-white pixel of an image fully transparent and writes the
result as a PNG. Reads PNG, JPEG and BMP.

A pixel is background when red, green and blue are all above the threshold
(default 200), or, with --distance, when it lies within that RGB distance
of pure white.

Examples:
  alphakey convert cartoon.jpg                  # writes cartoon_transparent.png
  alphakey convert cartoon.jpg -o keyed         # writes keyed.png
  alphakey convert logo.bmp -o logo.png --threshold 230
  alphakey convert scan.png --distance 40 --preview thumb.png
  alphakey convert art.png --preview p.png --preview-size 640x480 --keep-aspect
  alphakey info a.png b.jpg                     # dimensions and keyed pixel count
  alphakey -vv --config alphakey.yaml convert photo.jpg
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// YAML settings file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove the white background and save as PNG
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Display image information and how many pixels would be keyed
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

/// Background classification overrides shared by all commands.
#[derive(Args, Debug, Clone, Default)]
struct RuleArgs {
    /// Per-channel threshold: R, G and B must all be above it
    #[arg(short = 't', long, conflicts_with = "distance")]
    threshold: Option<u8>,

    /// Key pixels closer than this RGB distance to pure white instead
    #[arg(short = 'd', long)]
    distance: Option<f32>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image (PNG, JPEG or BMP)
    input: String,

    /// Output PNG (".png" is appended when missing)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    rule: RuleArgs,

    /// Also write a scaled preview PNG to this path
    #[arg(short, long)]
    preview: Option<PathBuf>,

    /// Preview size as WIDTHxHEIGHT (default 300x310)
    #[arg(long, value_name = "WxH")]
    preview_size: Option<String>,

    /// Fit the preview inside the size instead of stretching to it
    #[arg(long)]
    keep_aspect: bool,

    /// Preview filter: nearest, bilinear, bicubic, lanczos3
    #[arg(short, long)]
    filter: Option<String>,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<String>,

    /// Only read the header: skip decoding and the keyed pixel count
    #[arg(long)]
    header_only: bool,

    #[command(flatten)]
    rule: RuleArgs,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `-v`. The returned guard flushes the
/// file writer and must live until exit.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let settings = config::Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args, &settings, cli.verbose),
        Commands::Info(args) => commands::info::run(args, &settings, cli.verbose),
    }
}
