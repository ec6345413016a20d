//! Mapping screen points to grid cells.

use crate::canvas::Canvas;
use crate::types::Cell;

use super::Point;

/// Screen size of one cell at 100% zoom (one em).
pub const BASE_CELL_SIZE: f32 = 16.0;

/// Resolves which cell, if any, lies under a screen point.
///
/// Implementations must read dimensions from the canvas passed in rather
/// than caching them, so a resize takes effect on the next event.
pub trait HitTest {
    fn cell_at(&self, canvas: &Canvas, point: Point) -> Option<Cell>;
}

/// An axis-aligned grid drawn at `origin`, scaled by the canvas zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: Point,
    pub base_cell: f32,
}

impl GridLayout {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            base_cell: BASE_CELL_SIZE,
        }
    }

    /// On-screen size of one cell at the canvas's current zoom.
    pub fn cell_size(&self, canvas: &Canvas) -> f32 {
        self.base_cell * canvas.zoom() as f32 / 100.0
    }

    /// Screen-space centre of a cell.
    pub fn centre_of(&self, canvas: &Canvas, cell: Cell) -> Point {
        let size = self.cell_size(canvas);
        Point::new(
            self.origin.x + (cell.x as f32 + 0.5) * size,
            self.origin.y + (cell.y as f32 + 0.5) * size,
        )
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(Point::default())
    }
}

impl HitTest for GridLayout {
    fn cell_at(&self, canvas: &Canvas, point: Point) -> Option<Cell> {
        let size = self.cell_size(canvas);
        if size <= 0.0 {
            return None;
        }

        let fx = (point.x - self.origin.x) / size;
        let fy = (point.y - self.origin.y) / size;
        if !(fx >= 0.0 && fy >= 0.0) {
            return None;
        }

        let (x, y) = (fx.floor(), fy.floor());
        if x >= canvas.width() as f32 || y >= canvas.height() as f32 {
            return None;
        }
        Some(Cell::new(x as u32, y as u32))
    }
}
