//! Viewer configuration: highlight palette, surface size and layout spacing.
//!
//! Every field has a default; a JSON config file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use scrutiny_render::{LayoutOptions, Surface};

use crate::error::ViewerError;

/// Environment variable overriding the host surface width.
pub const SURFACE_WIDTH_ENV: &str = "SCRUTINY_SURFACE_WIDTH";

/// Highlight colors. Neutral styles belong to the drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill of a state the walk passed through.
    pub visited: String,
    /// Fill of a state a successful step arrived at.
    pub reached: String,
    /// Fill of a failed state, stroke and arrowhead of a failed edge.
    pub failed: String,
    pub failed_stroke_width: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            visited: "lightblue".to_string(),
            reached: "green".to_string(),
            failed: "red".to_string(),
            failed_stroke_width: "4px".to_string(),
        }
    }
}

/// Options for building a viewer context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub palette: Palette,
    pub surface: Surface,
    pub layout: LayoutOptions,
}

impl ViewerConfig {
    /// Reads a (possibly partial) JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ViewerError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Applies [`SURFACE_WIDTH_ENV`] if it holds a positive number.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(SURFACE_WIDTH_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(width) if width > 0.0 => self.surface.width = width,
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", SURFACE_WIDTH_ENV),
            }
        }
        self
    }
}
