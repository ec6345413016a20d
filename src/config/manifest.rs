//! Editor configuration (xqc.yaml) parsing.
//!
//! The configuration sets the starting canvas (dimensions, palette, selected
//! slot, zoom) and export defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, DEFAULT_HEIGHT, DEFAULT_SLOT, DEFAULT_WIDTH, DEFAULT_ZOOM};
use crate::error::{XqError, Result};
use crate::types::{Palette, Swatch, DEFAULT_PALETTE, MIN_PALETTE_SIZE};

/// Configuration loaded from xqc.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width of a new canvas in cells.
    pub width: u32,

    /// Height of a new canvas in cells.
    pub height: u32,

    /// Display zoom percentage.
    pub zoom: u32,

    /// Explicit colours for the first palette slots.
    pub palette: Vec<Swatch>,

    /// Number of palette slots; defaults to the number of colours given.
    pub palette_size: Option<usize>,

    /// Slot selected for painting.
    pub slot: usize,

    /// Output directory for exports.
    pub output: PathBuf,

    /// Integer upscale for PNG exports.
    pub png_scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            zoom: DEFAULT_ZOOM,
            palette: DEFAULT_PALETTE.iter().map(|c| Swatch::normalize(c)).collect(),
            palette_size: None,
            slot: DEFAULT_SLOT,
            output: PathBuf::from("dist"),
            png_scale: 1,
        }
    }
}

impl Config {
    /// Load configuration from an xqc.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| XqError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| XqError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some("Check xqc.yaml syntax".to_string()),
        })
    }

    /// Palette size after applying the default and the minimum.
    pub fn effective_palette_size(&self) -> usize {
        self.palette_size
            .unwrap_or(self.palette.len())
            .max(MIN_PALETTE_SIZE)
    }

    /// Build the starting canvas described by this configuration.
    pub fn new_canvas(&self) -> Result<Canvas> {
        if let Some(size) = self.palette_size {
            if size < MIN_PALETTE_SIZE {
                return Err(XqError::Validation {
                    message: format!("palette_size {} is below the minimum of {}", size, MIN_PALETTE_SIZE),
                    help: Some("Remove palette_size or set it to 2 or more".to_string()),
                });
            }
        }

        let mut palette = Palette::new(self.effective_palette_size())?;
        for (slot, colour) in self.palette.iter().enumerate() {
            palette.set(slot, colour.as_str());
        }

        let mut canvas = Canvas::new(self.width, self.height, palette)?;
        canvas.select_slot(self.slot);
        canvas.set_zoom(self.zoom);
        Ok(canvas)
    }
}
