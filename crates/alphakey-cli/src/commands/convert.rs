//! Background removal command.
//!
//! Decodes the input, keys out the white background and writes the result as
//! PNG. With `--preview` a scaled copy is written to a separate file; the
//! main output is always the unscaled grid.

use crate::config::Settings;
use crate::session::Session;
use crate::ConvertArgs;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Runs the convert command.
pub fn run(args: ConvertArgs, settings: &Settings, verbose: u8) -> Result<()> {
    trace!(input = %args.input, "convert::run");

    let input = super::normalize_separators(&args.input);
    let rule = settings.rule(args.rule.threshold, args.rule.distance)?;

    if verbose > 0 {
        println!("Converting {} ({})", input.display(), rule);
    }

    let session = Session::new();
    let keyed = session.convert(&input, rule)?;
    debug!(width = keyed.width(), height = keyed.height(), "converted");

    if let Some(output) = output_target(&input, args.output.as_deref(), args.preview.is_some())? {
        let written = session.save(&output)?;
        info!(path = %written.display(), "saved");
        println!("{}", written.display());
    }

    if let Some(preview) = &args.preview {
        let size = args.preview_size.as_deref().map(super::parse_size).transpose()?;
        let options = settings.preview(size, args.keep_aspect, args.filter.as_deref())?;
        let written = session.save_preview(preview, &options)?;
        info!(path = %written.display(), "preview saved");
        println!("{}", written.display());
    }

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

/// Where the unscaled result goes.
///
/// An explicit `-o` always wins. Without it, a preview-only run writes no
/// main output and a plain run writes `<stem>_transparent.png`.
fn output_target(input: &Path, output: Option<&Path>, has_preview: bool) -> Result<Option<PathBuf>> {
    match (output, has_preview) {
        (Some(path), _) => Ok(Some(path.to_path_buf())),
        (None, true) => Ok(None),
        (None, false) => super::default_output(input).map(Some),
    }
}
