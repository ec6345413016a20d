//! PNG rendering with integer upscaling.

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};

use crate::error::{XqError, Result};

use super::ExportPayload;

/// Largest side, in pixels, of a rendered PNG.
pub const MAX_PNG_SIDE: u32 = 16384;

/// Render a payload to PNG bytes.
///
/// Each cell becomes a `scale` x `scale` block; a scale of 0 is treated as 1.
pub fn render_png(payload: &ExportPayload, scale: u32) -> Result<Vec<u8>> {
    let image = rasterize(payload, scale)?;

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| XqError::Export {
            message: format!("Failed to encode PNG: {}", e),
            help: None,
        })?;

    Ok(bytes)
}

/// Rasterize a payload into an RGBA image.
pub fn rasterize(payload: &ExportPayload, scale: u32) -> Result<RgbaImage> {
    let scale = scale.max(1);
    let colours = payload.colours()?;

    let scaled = |side: u32| {
        side.checked_mul(scale)
            .filter(|&px| px <= MAX_PNG_SIDE)
            .ok_or_else(|| XqError::Export {
                message: format!(
                    "PNG scale {} makes a {}x{} image too large",
                    scale, payload.header.width, payload.header.height
                ),
                help: Some(format!("Rendered images are at most {} pixels on each side", MAX_PNG_SIDE)),
            })
    };
    let (width, height) = (scaled(payload.header.width)?, scaled(payload.header.height)?);
    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for entry in &payload.pixels {
        let rgba = Rgba(colours[entry.slot].to_rgba());
        for sy in 0..scale {
            for sx in 0..scale {
                img.put_pixel(entry.x * scale + sx, entry.y * scale + sy, rgba);
            }
        }
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::types::Palette;

    fn checker() -> ExportPayload {
        let mut canvas = Canvas::new(2, 2, Palette::default()).unwrap();
        canvas.set_palette_slot_colour(0, "#000000");
        canvas.set_palette_slot_colour(1, "#FFFFFF");
        canvas.set_pixel(1, 0, 1);
        canvas.set_pixel(0, 1, 1);
        ExportPayload::from_canvas(&canvas)
    }

    #[test]
    fn test_rasterize() {
        let img = rasterize(&checker(), 1).unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_rasterize_scaled() {
        let img = rasterize(&checker(), 3).unwrap();
        assert_eq!((img.width(), img.height()), (6, 6));
        assert_eq!(img.get_pixel(2, 2).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(3, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(5, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_scale_zero_treated_as_one() {
        let img = rasterize(&checker(), 0).unwrap();
        assert_eq!(img.width(), 2);
    }

    #[test]
    fn test_png_bytes_decode() {
        let bytes = render_png(&checker(), 2).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (4, 4));
        assert_eq!(img.get_pixel(2, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_oversized_scale_is_error() {
        let payload = ExportPayload::from_canvas(&Canvas::default());
        assert!(matches!(rasterize(&payload, 1 << 28), Err(XqError::Export { .. })));
        assert!(matches!(rasterize(&payload, u32::MAX), Err(XqError::Export { .. })));
        assert!(rasterize(&payload, MAX_PNG_SIDE / 16 + 1).is_err());
        assert_eq!(rasterize(&payload, MAX_PNG_SIDE / 256).unwrap().width(), MAX_PNG_SIDE / 16);
    }

    #[test]
    fn test_invalid_colour_is_error() {
        let mut canvas = Canvas::new(1, 1, Palette::default()).unwrap();
        canvas.set_palette_slot_colour(0, "nothex");
        assert!(rasterize(&ExportPayload::from_canvas(&canvas), 1).is_err());
    }
}
