//! Normalized palette entry strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::Colour;

/// Length of a normalized swatch: `#` plus six characters.
const SWATCH_LEN: usize = 7;

/// A palette colour as the user typed it, normalized to `#` plus six characters.
///
/// Normalization never validates the characters themselves: `#zzzzzz` is a
/// valid swatch and only fails when converted to a [`Colour`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Swatch(String);

impl Swatch {
    /// Normalize any input into a swatch.
    ///
    /// A missing `#` is added, longer input is truncated (dropping an alpha
    /// channel, for instance) and shorter input is right-padded with `0`.
    pub fn normalize(value: &str) -> Self {
        let mut out = String::with_capacity(SWATCH_LEN);
        if !value.starts_with('#') {
            out.push('#');
        }
        out.extend(value.chars().take(SWATCH_LEN - out.chars().count()));
        while out.chars().count() < SWATCH_LEN {
            out.push('0');
        }
        Swatch(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the swatch as an opaque RGB colour.
    pub fn to_colour(&self) -> Result<Colour> {
        self.0.parse()
    }
}

impl From<String> for Swatch {
    fn from(value: String) -> Self {
        Swatch::normalize(&value)
    }
}

impl From<&str> for Swatch {
    fn from(value: &str) -> Self {
        Swatch::normalize(value)
    }
}

impl From<Swatch> for String {
    fn from(value: Swatch) -> Self {
        value.0
    }
}

impl From<Colour> for Swatch {
    fn from(value: Colour) -> Self {
        Swatch(value.to_hex_rgb())
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
