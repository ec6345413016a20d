//! Export and import of canvas images.
//!
//! Exports flatten the canvas into an [`ExportPayload`] and then either hand
//! it to a [`PixelCodec`] (binary and hex artifacts) or render it locally
//! (SVG and PNG). Every artifact is named with a millisecond timestamp.

mod import;
mod payload;
mod png;
mod svg;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::codec::{PixelBuffer, PixelCodec};
use crate::error::{XqError, Result};

pub use import::{decode, decode_buffer, import_file, read_file, ImportedImage, PendingImport};
pub use payload::{ExportPayload, PixelEntry};
pub use png::{rasterize, render_png};
pub use svg::render_svg;

/// Prefix shared by every exported filename.
pub const FILENAME_PREFIX: &str = "exquisite-graphics-image";

/// Artifact kinds an export can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raw codec bytes
    Binary,
    /// Codec bytes as a 0x-prefixed hex string
    Hex,
    /// Vector image, one square per cell
    Svg,
    /// Raster image
    Png,
}

impl ExportFormat {
    /// Look up a format by name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "binary" | "xqst" => Some(ExportFormat::Binary),
            "hex" => Some(ExportFormat::Hex),
            "svg" => Some(ExportFormat::Svg),
            "png" => Some(ExportFormat::Png),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Binary => "xqst",
            ExportFormat::Hex => "hex",
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Binary => write!(f, "binary"),
            ExportFormat::Hex => write!(f, "hex"),
            ExportFormat::Svg => write!(f, "svg"),
            ExportFormat::Png => write!(f, "png"),
        }
    }
}

/// A finished export, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub filename: String,
    pub contents: Vec<u8>,
}

impl Artifact {
    /// Write the artifact into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| XqError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;

        let path = dir.join(&self.filename);
        fs::write(&path, &self.contents).map_err(|e| XqError::Io {
            path: path.clone(),
            message: format!("Failed to write {} export: {}", self.format, e),
        })?;
        Ok(path)
    }
}

/// Filename for an artifact created at `timestamp_ms`.
pub fn artifact_name(format: ExportFormat, timestamp_ms: u128) -> String {
    format!("{}-{}.{}", FILENAME_PREFIX, timestamp_ms, format.extension())
}

/// Milliseconds since the Unix epoch.
pub fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Produces artifacts from a canvas through a codec.
#[derive(Debug, Clone)]
pub struct Exporter<C> {
    codec: C,
    png_scale: u32,
}

impl<C: PixelCodec> Exporter<C> {
    pub fn new(codec: C) -> Self {
        Self { codec, png_scale: 1 }
    }

    /// Set the integer upscale used for PNG output.
    pub fn with_png_scale(mut self, scale: u32) -> Self {
        self.png_scale = scale.max(1);
        self
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Export the canvas, stamping the filename with `timestamp_ms`.
    pub fn export(&self, canvas: &Canvas, format: ExportFormat, timestamp_ms: u128) -> Result<Artifact> {
        let payload = ExportPayload::from_canvas(canvas);

        let contents = match format {
            ExportFormat::Binary => payload.encode(&self.codec)?.to_bytes()?,
            ExportFormat::Hex => payload.encode(&self.codec)?.to_hex()?.into_bytes(),
            ExportFormat::Svg => render_svg(&payload)?.into_bytes(),
            ExportFormat::Png => render_png(&payload, self.png_scale)?,
        };

        Ok(Artifact {
            format,
            filename: artifact_name(format, timestamp_ms),
            contents,
        })
    }

    /// Export by format name. Unknown names produce no artifact.
    pub fn export_named(&self, canvas: &Canvas, name: &str, timestamp_ms: u128) -> Result<Option<Artifact>> {
        match ExportFormat::from_name(name) {
            Some(format) => self.export(canvas, format, timestamp_ms).map(Some),
            None => Ok(None),
        }
    }
}
