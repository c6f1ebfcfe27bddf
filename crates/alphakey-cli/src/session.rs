//! Single-slot holder for the current keyed image.
//!
//! `convert` swaps a fully built grid into the slot; `save` and `preview`
//! work on a snapshot loaded at call time, so they never observe a grid
//! that is still being produced. A failed conversion leaves the slot as it
//! was.

use alphakey_core::PixelGrid;
use alphakey_ops::{
    count_near_white, fit_dimensions, remove_background, scale_to_fit_with, Filter, OpsError,
    WhiteMatch,
};
use anyhow::{Context, Result};
use arc_swap::ArcSwapOption;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// How to build the display preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewOptions {
    pub width: u32,
    pub height: u32,
    /// Fit inside `width x height` instead of stretching to it.
    pub keep_aspect: bool,
    pub filter: Filter,
}

#[derive(Default)]
pub struct Session {
    current: ArcSwapOption<PixelGrid>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `input`, removes its background and stores the result.
    pub fn convert(&self, input: &Path, rule: WhiteMatch) -> Result<Arc<PixelGrid>> {
        let grid = alphakey_io::decode(input)
            .with_context(|| format!("Failed to load: {}", input.display()))?;

        let keyed_count = count_near_white(&grid, rule);
        let keyed = Arc::new(remove_background(&grid, rule));
        info!(
            input = %input.display(),
            width = keyed.width(),
            height = keyed.height(),
            keyed = keyed_count,
            total = keyed.len(),
            %rule,
            "background removed"
        );

        self.current.store(Some(Arc::clone(&keyed)));
        Ok(keyed)
    }

    /// The grid produced by the last successful [`Session::convert`].
    pub fn current(&self) -> Option<Arc<PixelGrid>> {
        self.current.load_full()
    }

    fn snapshot(&self) -> Result<Arc<PixelGrid>> {
        self.current().ok_or_else(|| {
            OpsError::InvalidInput("no image has been converted yet".into()).into()
        })
    }

    /// Writes the unscaled current grid as PNG and returns the path written.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        let grid = self.snapshot()?;
        let written = alphakey_io::encode(&grid, path)
            .with_context(|| format!("Failed to save: {}", path.display()))?;
        debug!(path = %written.display(), "saved");
        Ok(written)
    }

    /// Scales a snapshot of the current grid for display.
    pub fn preview(&self, options: &PreviewOptions) -> Result<PixelGrid> {
        let grid = self.snapshot()?;
        let (width, height) = if options.keep_aspect {
            fit_dimensions(grid.width(), grid.height(), options.width, options.height)
        } else {
            (options.width, options.height)
        };
        debug!(width, height, filter = %options.filter, "building preview");

        scale_to_fit_with(&grid, width, height, options.filter)
            .with_context(|| format!("Failed to scale preview to {}x{}", width, height))
    }

    /// Builds the preview and writes it as PNG.
    pub fn save_preview(&self, path: &Path, options: &PreviewOptions) -> Result<PathBuf> {
        let preview = self.preview(options)?;
        let written = alphakey_io::encode(&preview, path)
            .with_context(|| format!("Failed to save preview: {}", path.display()))?;
        debug!(path = %written.display(), "preview saved");
        Ok(written)
    }
}
