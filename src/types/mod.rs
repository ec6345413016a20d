//! Core domain types for xqc.
//!
//! This module contains the value types the canvas is built from:
//! - `Colour` - RGBA colour values used at the codec and raster boundary
//! - `Swatch` - a normalized `#RRGGBB` palette entry
//! - `Palette` - sparse slot overrides plus the placeholder generator
//! - `PixelGrid` - sparse per-cell slot storage keyed by `Cell`

mod colour;
mod grid;
mod palette;
mod swatch;

pub use colour::Colour;
pub use grid::{Cell, PixelGrid};
pub use palette::{Palette, DEFAULT_PALETTE, MIN_PALETTE_SIZE};
pub use swatch::Swatch;
