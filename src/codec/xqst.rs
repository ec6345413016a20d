//! The XQST indexed bitmap format.
//!
//! Layout, all multi-byte fields big-endian:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | version (1) |
//! | 1 | 1 | width, 0 means 256 |
//! | 2 | 1 | height, 0 means 256 |
//! | 3 | 2 | number of palette colours |
//! | 5 | 2 | scale factor (12 bits), alpha flag, background flag, 2 reserved bits |
//! | 7 | 1 | background index |
//! | 8 | 3 or 4 per colour | palette, RGB or RGBA when the alpha flag is set |
//! | .. | .. | pixel indices, row-major, packed MSB-first |
//!
//! Pixels use 1, 2, 4 or 8 bits each depending on the palette size.

use crate::error::{XqError, Result};
use crate::types::{Colour, Swatch};

use super::{Header, PixelBuffer, PixelCodec, FORMAT_VERSION};

pub const HEADER_LEN: usize = 8;
pub const MAX_DIMENSION: u32 = 256;
pub const MAX_COLOURS: usize = 256;
const MAX_SCALE: u16 = 0x0FFF;

const ALPHA_FLAG: u16 = 1 << 3;
const BACKGROUND_FLAG: u16 = 1 << 2;

/// Bits used to store one pixel index for a palette of `num_colors`.
pub fn bits_per_pixel(num_colors: usize) -> usize {
    match num_colors {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XqstCodec;

/// An XQST image in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct XqstBuffer {
    header: Header,
    palette: Vec<String>,
    colours: Vec<Colour>,
    indices: Vec<u8>,
}

impl XqstBuffer {
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.header.width && y < self.header.height {
            Some(y as usize * self.header.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Parsed palette colours, including alpha when present.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
}

impl PixelBuffer for XqstBuffer {
    fn header(&self) -> &Header {
        &self.header
    }

    fn palette(&self) -> &[String] {
        &self.palette
    }

    fn get_pixel(&self, x: u32, y: u32) -> usize {
        self.offset(x, y)
            .map_or(0, |offset| self.indices[offset] as usize)
    }

    fn set_pixel(&mut self, x: u32, y: u32, index: usize) -> Result<()> {
        let offset = self.offset(x, y).ok_or_else(|| {
            XqError::codec(format!(
                "Pixel ({}, {}) is outside the {}x{} image",
                x, y, self.header.width, self.header.height
            ))
        })?;
        if index >= self.header.num_colors {
            return Err(XqError::codec(format!(
                "Palette index {} out of range for {} colours",
                index, self.header.num_colors
            )));
        }
        self.indices[offset] = index as u8;
        Ok(())
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let header = &self.header;
        let channels = if header.alpha { 4 } else { 3 };
        let bpp = bits_per_pixel(header.num_colors);
        let data_len = (self.indices.len() * bpp).div_ceil(8);

        let mut out = Vec::with_capacity(HEADER_LEN + self.colours.len() * channels + data_len);
        out.push(header.version);
        out.push((header.width % MAX_DIMENSION) as u8);
        out.push((header.height % MAX_DIMENSION) as u8);
        out.extend_from_slice(&(header.num_colors as u16).to_be_bytes());

        let mut packed = (header.scale_factor & MAX_SCALE) << 4;
        if header.alpha {
            packed |= ALPHA_FLAG;
        }
        if header.background_included {
            packed |= BACKGROUND_FLAG;
        }
        out.extend_from_slice(&packed.to_be_bytes());
        out.push(header.background_index);

        for colour in &self.colours {
            if header.alpha {
                out.extend_from_slice(&colour.to_rgba());
            } else {
                out.extend_from_slice(&colour.to_rgb());
            }
        }

        let mut data = vec![0u8; data_len];
        for (i, &index) in self.indices.iter().enumerate() {
            let bit = i * bpp;
            let shift = 8 - bpp - bit % 8;
            data[bit / 8] |= index << shift;
        }
        out.extend(data);

        Ok(out)
    }
}

impl PixelCodec for XqstCodec {
    type Buffer = XqstBuffer;

    fn create(&self, header: Header, palette: &[Swatch]) -> Result<XqstBuffer> {
        validate_header(&header)?;
        if palette.len() != header.num_colors {
            return Err(XqError::codec(format!(
                "Header declares {} colours but the palette has {}",
                header.num_colors,
                palette.len()
            )));
        }

        let colours = palette
            .iter()
            .enumerate()
            .map(|(slot, swatch)| {
                swatch.to_colour().map_err(|_| XqError::Codec {
                    message: format!("Palette slot {} is not a valid colour: {}", slot, swatch),
                    help: Some("Palette colours must be #RRGGBB hex values".to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let pixel_count = header.width as usize * header.height as usize;
        Ok(XqstBuffer {
            palette: palette.iter().map(|s| s.as_str().to_string()).collect(),
            colours,
            indices: vec![0; pixel_count],
            header,
        })
    }

    fn parse(&self, bytes: &[u8]) -> Result<XqstBuffer> {
        if bytes.len() < HEADER_LEN {
            return Err(XqError::Codec {
                message: format!("File too short for an XQST header ({} bytes)", bytes.len()),
                help: Some("Is this an XQST image?".to_string()),
            });
        }

        let version = bytes[0];
        if version != FORMAT_VERSION {
            return Err(XqError::codec(format!("Unsupported XQST version {}", version)));
        }

        let dimension = |b: u8| if b == 0 { MAX_DIMENSION } else { b as u32 };
        let packed = u16::from_be_bytes([bytes[5], bytes[6]]);
        let header = Header {
            version,
            width: dimension(bytes[1]),
            height: dimension(bytes[2]),
            num_colors: u16::from_be_bytes([bytes[3], bytes[4]]) as usize,
            scale_factor: packed >> 4,
            alpha: packed & ALPHA_FLAG != 0,
            background_included: packed & BACKGROUND_FLAG != 0,
            background_index: bytes[7],
        };
        validate_header(&header)?;

        let channels = if header.alpha { 4 } else { 3 };
        let palette_end = HEADER_LEN + header.num_colors * channels;
        let palette_bytes = bytes.get(HEADER_LEN..palette_end).ok_or_else(|| {
            XqError::codec(format!("Truncated palette: expected {} colours", header.num_colors))
        })?;

        let colours: Vec<Colour> = palette_bytes
            .chunks_exact(channels)
            .map(|c| {
                if header.alpha {
                    Colour::new(c[0], c[1], c[2], c[3])
                } else {
                    Colour::rgb(c[0], c[1], c[2])
                }
            })
            .collect();
        let palette = colours
            .iter()
            .map(|c| {
                if header.alpha {
                    format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
                } else {
                    c.to_hex_rgb()
                }
            })
            .collect();

        let pixel_count = header.width as usize * header.height as usize;
        let bpp = bits_per_pixel(header.num_colors);
        let data_len = (pixel_count * bpp).div_ceil(8);
        let data = bytes
            .get(palette_end..palette_end + data_len)
            .ok_or_else(|| XqError::codec(format!("Truncated pixel data: expected {} bytes", data_len)))?;

        let mask = ((1u16 << bpp) - 1) as u8;
        let indices = (0..pixel_count)
            .map(|i| {
                let bit = i * bpp;
                let shift = 8 - bpp - bit % 8;
                (data[bit / 8] >> shift) & mask
            })
            .collect();

        Ok(XqstBuffer {
            header,
            palette,
            colours,
            indices,
        })
    }
}

fn validate_header(header: &Header) -> Result<()> {
    let dimension_ok = |d: u32| (1..=MAX_DIMENSION).contains(&d);
    if !dimension_ok(header.width) || !dimension_ok(header.height) {
        return Err(XqError::Codec {
            message: format!("Image size {}x{} is not supported", header.width, header.height),
            help: Some(format!("XQST images are 1 to {} pixels on each side", MAX_DIMENSION)),
        });
    }
    if header.num_colors == 0 || header.num_colors > MAX_COLOURS {
        return Err(XqError::Codec {
            message: format!("{} palette colours is not supported", header.num_colors),
            help: Some(format!("XQST palettes hold 1 to {} colours", MAX_COLOURS)),
        });
    }
    if header.scale_factor > MAX_SCALE {
        return Err(XqError::codec(format!("Scale factor {} is too large", header.scale_factor)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn swatches(colours: &[&str]) -> Vec<Swatch> {
        colours.iter().map(|c| Swatch::normalize(c)).collect()
    }

    #[test]
    fn test_bits_per_pixel() {
        assert_eq!(bits_per_pixel(2), 1);
        assert_eq!(bits_per_pixel(3), 2);
        assert_eq!(bits_per_pixel(4), 2);
        assert_eq!(bits_per_pixel(5), 4);
        assert_eq!(bits_per_pixel(16), 4);
        assert_eq!(bits_per_pixel(17), 8);
        assert_eq!(bits_per_pixel(256), 8);
    }

    #[test]
    fn test_known_bytes() {
        let codec = XqstCodec;
        let mut buffer = codec
            .create(Header::new(4, 2, 2), &swatches(&["#000000", "#FFFFFF"]))
            .unwrap();
        buffer.set_pixel(0, 0, 1).unwrap();
        buffer.set_pixel(3, 1, 1).unwrap();

        let bytes = buffer.to_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![
                1, 4, 2, 0, 2, 0x00, 0x10, 0, // header
                0, 0, 0, 255, 255, 255, // palette
                0b1000_0001, // pixels
            ]
        );
        assert_eq!(buffer.to_hex().unwrap(), "0x0104020002001000000000ffffff81");
    }

    #[test]
    fn test_parse_reads_back_pixels() {
        let codec = XqstCodec;
        let mut buffer = codec
            .create(
                Header::new(3, 3, 5),
                &swatches(&["#000000", "#111111", "#222222", "#333333", "#444444"]),
            )
            .unwrap();
        for (i, (x, y)) in [(0, 0), (1, 1), (2, 2), (2, 0)].into_iter().enumerate() {
            buffer.set_pixel(x, y, i + 1).unwrap();
        }

        let parsed = codec.parse(&buffer.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.header(), buffer.header());
        assert_eq!(parsed.palette(), buffer.palette());
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(parsed.get_pixel(x, y), buffer.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_full_size_dimensions() {
        let codec = XqstCodec;
        let buffer = codec
            .create(Header::new(256, 1, 2), &swatches(&["#000000", "#FFFFFF"]))
            .unwrap();
        let bytes = buffer.to_bytes().unwrap();
        assert_eq!(bytes[1], 0);
        assert_eq!(codec.parse(&bytes).unwrap().header().width, 256);
    }

    #[test]
    fn test_parse_alpha_palette() {
        let bytes = vec![1, 1, 1, 0, 2, 0x00, 0x18, 0, 255, 0, 0, 128, 0, 0, 0, 255, 0b1000_0000];
        let buffer = XqstCodec.parse(&bytes).unwrap();
        assert!(buffer.header().alpha);
        assert_eq!(buffer.palette(), &["#FF000080".to_string(), "#000000FF".to_string()]);
        assert_eq!(buffer.get_pixel(0, 0), 1);
        assert_eq!(buffer.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(XqstCodec.parse(&[]).is_err());
        assert!(XqstCodec.parse(b"not an image at all").is_err());
        // valid header, missing palette
        assert!(XqstCodec.parse(&[1, 2, 2, 0, 2, 0, 0x10, 0]).is_err());
        // valid header and palette, missing pixels
        assert!(XqstCodec.parse(&[1, 16, 16, 0, 2, 0, 0x10, 0, 0, 0, 0, 1, 1, 1]).is_err());
    }

    #[test]
    fn test_create_rejects_unsupported() {
        let two = swatches(&["#000000", "#FFFFFF"]);
        assert!(XqstCodec.create(Header::new(257, 1, 2), &two).is_err());
        assert!(XqstCodec.create(Header::new(2, 2, 3), &two).is_err());
        assert!(XqstCodec
            .create(Header::new(2, 2, 2), &swatches(&["#zzzzzz", "#FFFFFF"]))
            .is_err());
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut buffer = XqstCodec
            .create(Header::new(2, 2, 2), &swatches(&["#000000", "#FFFFFF"]))
            .unwrap();
        assert!(buffer.set_pixel(2, 0, 1).is_err());
        assert!(buffer.set_pixel(0, 0, 2).is_err());
        assert_eq!(buffer.get_pixel(9, 9), 0);
    }
}
