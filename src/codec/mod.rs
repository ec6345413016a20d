//! Pixel buffer codec boundary.
//!
//! The canvas never touches bytes directly. Export builds a buffer through a
//! [`PixelCodec`] from a header and a dense palette, writes every pixel and
//! asks for bytes or hex; import hands bytes to the codec and reads back the
//! header, palette strings and pixels.
//!
//! [`XqstCodec`] is the codec shipped with the crate.

mod xqst;

use serde::Serialize;

use crate::error::{XqError, Result};
use crate::types::Swatch;

pub use xqst::{bits_per_pixel, XqstBuffer, XqstCodec, HEADER_LEN, MAX_COLOURS, MAX_DIMENSION};

/// Format version written by this crate.
pub const FORMAT_VERSION: u8 = 1;

/// Image header shared by every codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version: u8,
    pub width: u32,
    pub height: u32,
    pub num_colors: usize,
    pub scale_factor: u16,
    pub alpha: bool,
    pub background_included: bool,
    pub background_index: u8,
}

impl Header {
    /// Header for an opaque image at scale 1 with no background colour.
    pub fn new(width: u32, height: u32, num_colors: usize) -> Self {
        Self {
            version: FORMAT_VERSION,
            width,
            height,
            num_colors,
            scale_factor: 1,
            alpha: false,
            background_included: false,
            background_index: 0,
        }
    }
}

/// An image held by a codec: header, palette and one index per pixel.
pub trait PixelBuffer {
    fn header(&self) -> &Header;

    /// Palette colours as strings, in slot order.
    fn palette(&self) -> &[String];

    /// The stored index of a pixel, 0 outside the image.
    fn get_pixel(&self, x: u32, y: u32) -> usize;

    fn set_pixel(&mut self, x: u32, y: u32, index: usize) -> Result<()>;

    /// Serialize to the codec's binary form.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// The binary form as a `0x`-prefixed lowercase hex string.
    fn to_hex(&self) -> Result<String> {
        Ok(encode_hex(&self.to_bytes()?))
    }
}

/// Creates and parses pixel buffers.
pub trait PixelCodec {
    type Buffer: PixelBuffer;

    /// A blank buffer (every pixel index 0) for `header` and a dense palette.
    fn create(&self, header: Header, palette: &[Swatch]) -> Result<Self::Buffer>;

    /// Parse a buffer from its binary form.
    fn parse(&self, bytes: &[u8]) -> Result<Self::Buffer>;
}

/// Hex-encode bytes with a `0x` prefix.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for byte in bytes {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// Decode a hex string, with or without the `0x` prefix.
///
/// Surrounding whitespace is ignored.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    if digits.len() % 2 != 0 || !digits.is_ascii() {
        return Err(XqError::Codec {
            message: "Hex data must have an even number of ASCII digits".to_string(),
            help: None,
        });
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| XqError::codec(format!("Invalid hex byte '{}'", &digits[i..i + 2])))
        })
        .collect()
}

/// Check whether file contents are a hex artifact rather than raw bytes.
pub fn is_hex_text(bytes: &[u8]) -> bool {
    let text = bytes.trim_ascii();
    text.len() > 2
        && (text.starts_with(b"0x") || text.starts_with(b"0X"))
        && text[2..].iter().all(u8::is_ascii_hexdigit)
}
