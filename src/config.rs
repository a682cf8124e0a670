//! Generator configuration.
//!
//! Settings serialize to camelCase JSON and every field has a default, so a
//! partial (or empty) file is valid:
//!
//! ```json
//! {
//!   "circled": true,
//!   "groupByCategory": false,
//!   "includeFlatGlyphs": true,
//!   "workers": 8,
//!   "frame": { "strokeColor": "#074d92", "strokeWidth": 2.0, "fill": "none" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File looked up by [`GeneratorConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "icon-stencil.json";

// ============================================================================
// FrameStyle
// ============================================================================

/// Interior of the circular border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FrameFill {
    #[default]
    None,
    White,
}

impl FrameFill {
    /// Value of the SVG `fill` attribute.
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::White => "#FFFFFF",
        }
    }
}

/// Stroke and fill of the circled frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameStyle {
    pub stroke_color: String,
    pub stroke_width: f32,
    pub fill: FrameFill,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#074d92".into(),
            stroke_width: 2.0,
            fill: FrameFill::None,
        }
    }
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Options controlling which variants are produced and how they are grouped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Produce the circled variant next to the regular one.
    pub circled: bool,

    /// Split libraries (and output folders) by catalog category.
    pub group_by_category: bool,

    /// Synthesize flat glyph icons from the bundled glyph packages.
    pub include_flat_glyphs: bool,

    /// Upper bound on concurrent composition tasks.
    pub workers: usize,

    pub frame: FrameStyle,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            circled: true,
            group_by_category: false,
            include_flat_glyphs: false,
            workers: default_workers(),
            frame: FrameStyle::default(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_circled(mut self, circled: bool) -> Self {
        self.circled = circled;
        self
    }

    pub fn with_group_by_category(mut self, group: bool) -> Self {
        self.group_by_category = group;
        self
    }

    pub fn with_flat_glyphs(mut self, include: bool) -> Self {
        self.include_flat_glyphs = include;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_frame(mut self, frame: FrameStyle) -> Self {
        self.frame = frame;
        self
    }

    /// Worker count, never below one.
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&content)
    }

    /// Loads [`CONFIG_FILE_NAME`] from `dir`, or defaults when it is absent.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_path(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
