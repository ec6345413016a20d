//! The canvas state store.
//!
//! A `Canvas` owns the grid dimensions, the palette, the per-cell slots and
//! the editor selection (current slot, zoom, eyedropper). All mutations apply
//! immediately; there is no deferred state.
//!
//! Slot values are clamped against the palette size twice, independently:
//! once when a cell is written, and again when it is read. Shrinking the
//! palette therefore never rewrites stored cells, but changes what they
//! resolve to.

use crate::error::{XqError, Result};
use crate::types::{Cell, Palette, PixelGrid, Swatch};

pub const DEFAULT_WIDTH: u32 = 16;
pub const DEFAULT_HEIGHT: u32 = 16;
pub const DEFAULT_ZOOM: u32 = 200;
pub const DEFAULT_SLOT: usize = 1;

/// What [`Canvas::purge_unreachable`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Purged {
    pub cells: usize,
    pub overrides: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    palette: Palette,
    pixels: PixelGrid,
    current_slot: usize,
    zoom: u32,
    dropper: bool,
}

impl Canvas {
    /// Create an empty canvas with the given dimensions and palette.
    pub fn new(width: u32, height: u32, palette: Palette) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            palette,
            pixels: PixelGrid::new(),
            current_slot: DEFAULT_SLOT,
            zoom: DEFAULT_ZOOM,
            dropper: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_size(&self) -> usize {
        self.palette.size()
    }

    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    /// Change either or both dimensions.
    ///
    /// Stored cells are left alone: cells outside the new bounds become
    /// unreachable and reappear if the grid grows back over them.
    pub fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<()> {
        let width = width.unwrap_or(self.width);
        let height = height.unwrap_or(self.height);
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Write a slot to a cell, clamped to the palette.
    ///
    /// No bounds check is made against the grid; out-of-bounds writes are
    /// stored but unreachable.
    pub fn set_pixel(&mut self, x: u32, y: u32, slot: usize) {
        let slot = self.palette.clamp(slot);
        self.pixels.set(Cell::new(x, y), slot);
    }

    /// The raw stored slot for a cell, if it was ever painted.
    pub fn stored_slot(&self, x: u32, y: u32) -> Option<usize> {
        self.pixels.get(Cell::new(x, y))
    }

    /// The effective slot a cell renders with.
    pub fn slot_at(&self, x: u32, y: u32) -> usize {
        match self.stored_slot(x, y) {
            None | Some(0) => 0,
            Some(slot) => self.palette.clamp(slot),
        }
    }

    /// The resolved colour a cell renders with.
    pub fn colour_at(&self, x: u32, y: u32) -> Swatch {
        self.palette.colour(self.slot_at(x, y))
    }

    /// Override the colour of a palette slot.
    pub fn set_palette_slot_colour(&mut self, slot: usize, value: &str) {
        self.palette.set(slot, value);
    }

    /// Override the colour of the currently selected slot.
    pub fn set_current_colour(&mut self, value: &str) {
        self.palette.set(self.current_slot, value);
    }

    pub fn grow_palette(&mut self) {
        self.palette.grow();
    }

    /// Remove the last palette slot; a no-op at the minimum size.
    pub fn shrink_palette(&mut self) -> bool {
        self.palette.shrink()
    }

    /// Select the slot used for painting. Not range-checked.
    pub fn select_slot(&mut self, slot: usize) {
        self.current_slot = slot;
    }

    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    /// The resolved colour of the selected slot.
    pub fn current_colour(&self) -> Swatch {
        self.palette.colour(self.current_slot)
    }

    /// Resolved colours for slots `0..palette_size`.
    pub fn palette_colours(&self) -> Vec<Swatch> {
        self.palette.resolved()
    }

    /// Resolved palette colours joined with commas.
    pub fn palette_string(&self) -> String {
        self.palette_colours()
            .iter()
            .map(Swatch::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Set the display zoom percentage. Presentation only.
    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom.max(1);
    }

    pub fn dropper_active(&self) -> bool {
        self.dropper
    }

    pub fn set_dropper(&mut self, active: bool) {
        self.dropper = active;
    }

    /// Eyedropper pick: select the effective slot of a cell and turn the
    /// dropper off. Returns the picked slot.
    pub fn pick(&mut self, x: u32, y: u32) -> usize {
        let slot = self.slot_at(x, y);
        self.current_slot = slot;
        self.dropper = false;
        slot
    }

    /// Replace the image wholesale: dimensions, palette and pixels.
    ///
    /// Selection state (slot, zoom, dropper) is kept. Nothing is changed if
    /// the dimensions are invalid.
    pub fn replace_image(
        &mut self,
        width: u32,
        height: u32,
        palette: Palette,
        pixels: PixelGrid,
    ) -> Result<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.palette = palette;
        self.pixels = pixels;
        Ok(())
    }

    /// Drop cells outside the grid and overrides beyond the palette.
    pub fn purge_unreachable(&mut self) -> Purged {
        Purged {
            cells: self.pixels.retain_within(self.width, self.height),
            overrides: self.palette.purge_unreachable(),
        }
    }

    /// Iterate every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette: Palette::default_palette(),
            pixels: PixelGrid::new(),
            current_slot: DEFAULT_SLOT,
            zoom: DEFAULT_ZOOM,
            dropper: false,
        }
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(XqError::Validation {
            message: format!("Canvas dimensions must be at least 1x1, got {}x{}", width, height),
            help: None,
        });
    }
    Ok(())
}
