//! YAML settings file.
//!
//! Every key is optional; missing keys fall back to the built-in defaults and
//! unknown keys are rejected. Command-line flags override file values.
//!
//! ```yaml
//! threshold: 200
//! distance: 40.0      # switches to the distance rule
//! preview:
//!   width: 300
//!   height: 310
//!   keep_aspect: false
//!   filter: bilinear
//! ```

use alphakey_ops::{Filter, WhiteMatch, DEFAULT_WHITE_THRESHOLD};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::session::PreviewOptions;

/// Default preview box, matching the size of a typical image label.
pub const DEFAULT_PREVIEW_SIZE: (u32, u32) = (300, 310);

/// Settings loaded from `--config`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Per-channel threshold for the default rule.
    pub threshold: u8,
    /// When set, the distance rule is used instead of the threshold.
    pub distance: Option<f32>,
    /// Preview defaults.
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewSettings {
    pub width: u32,
    pub height: u32,
    pub keep_aspect: bool,
    pub filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_WHITE_THRESHOLD,
            distance: None,
            preview: PreviewSettings::default(),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_PREVIEW_SIZE.0,
            height: DEFAULT_PREVIEW_SIZE.1,
            keep_aspect: false,
            filter: Filter::default().name().to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let settings = Self::from_yaml(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        debug!(path = %path.display(), ?settings, "loaded config");
        Ok(settings)
    }

    /// Parses settings from YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Resolves the classification rule.
    ///
    /// Precedence: `--threshold`, then `--distance`, then the file's
    /// `distance`, then the file's `threshold`.
    pub fn rule(&self, threshold: Option<u8>, distance: Option<f32>) -> Result<WhiteMatch> {
        let rule = match (threshold, distance, self.distance) {
            (Some(t), _, _) => WhiteMatch::Threshold(t),
            (None, Some(d), _) | (None, None, Some(d)) => WhiteMatch::Distance(d),
            (None, None, None) => WhiteMatch::Threshold(self.threshold),
        };
        Ok(rule.validate()?)
    }

    /// Resolves preview options, with command-line values taking precedence.
    ///
    /// `keep_aspect` can only be switched on from the command line.
    pub fn preview(
        &self,
        size: Option<(u32, u32)>,
        keep_aspect: bool,
        filter: Option<&str>,
    ) -> Result<PreviewOptions> {
        let (width, height) = size.unwrap_or((self.preview.width, self.preview.height));
        let filter: Filter = filter.unwrap_or(&self.preview.filter).parse()?;

        Ok(PreviewOptions {
            width,
            height,
            keep_aspect: keep_aspect || self.preview.keep_aspect,
            filter,
        })
    }
}
