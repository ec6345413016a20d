//! Flattening a canvas into codec input.

use crate::canvas::Canvas;
use crate::codec::{Header, PixelBuffer, PixelCodec};
use crate::error::{XqError, Result};
use crate::types::{Colour, Swatch};

/// One grid cell with its effective slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelEntry {
    pub x: u32,
    pub y: u32,
    pub slot: usize,
}

/// Everything a codec needs to write an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub header: Header,
    /// Resolved colours for slots `0..palette_size`, in order.
    pub palette: Vec<Swatch>,
    /// Every cell of the grid in row-major order.
    pub pixels: Vec<PixelEntry>,
}

impl ExportPayload {
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let header = Header::new(canvas.width(), canvas.height(), canvas.palette_size());
        let pixels = canvas
            .cells()
            .map(|cell| PixelEntry {
                x: cell.x,
                y: cell.y,
                slot: canvas.slot_at(cell.x, cell.y),
            })
            .collect();

        Self {
            header,
            palette: canvas.palette_colours(),
            pixels,
        }
    }

    /// Parse every palette entry, for renderers that draw colours directly.
    ///
    /// Fails on the first swatch that is not a `#RRGGBB` value.
    pub fn colours(&self) -> Result<Vec<Colour>> {
        self.palette
            .iter()
            .map(|swatch| {
                swatch.to_colour().map_err(|_| XqError::Export {
                    message: format!("Cannot render palette colour {:?}", swatch.as_str()),
                    help: Some("Palette colours must be #RRGGBB hex values".to_string()),
                })
            })
            .collect()
    }

    /// Build a codec buffer holding this payload.
    pub fn encode<C: PixelCodec>(&self, codec: &C) -> Result<C::Buffer> {
        let mut buffer = codec.create(self.header.clone(), &self.palette)?;
        for entry in &self.pixels {
            buffer.set_pixel(entry.x, entry.y, entry.slot)?;
        }
        Ok(buffer)
    }
}
