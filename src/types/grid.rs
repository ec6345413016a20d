//! Sparse per-cell slot storage.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the canvas grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Check if the cell lies inside a `width` x `height` grid.
    pub fn within(self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stored palette slots keyed by cell.
///
/// Cells that were never painted are absent and read as slot 0. Stored
/// values are raw: clamping against the palette size is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelGrid {
    cells: HashMap<Cell, usize>,
}

impl PixelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a slot for a cell, replacing any previous value.
    pub fn set(&mut self, cell: Cell, slot: usize) {
        self.cells.insert(cell, slot);
    }

    /// The stored slot for a cell, if it was ever written.
    pub fn get(&self, cell: Cell) -> Option<usize> {
        self.cells.get(&cell).copied()
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate stored cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, usize)> + '_ {
        self.cells.iter().map(|(cell, slot)| (*cell, *slot))
    }

    /// Drop every cell outside a `width` x `height` grid.
    ///
    /// Returns how many cells were removed.
    pub fn retain_within(&mut self, width: u32, height: u32) -> usize {
        let before = self.cells.len();
        self.cells.retain(|cell, _| cell.within(width, height));
        before - self.cells.len()
    }
}

impl FromIterator<(Cell, usize)> for PixelGrid {
    fn from_iter<I: IntoIterator<Item = (Cell, usize)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_cell_is_none() {
        let grid = PixelGrid::new();
        assert_eq!(grid.get(Cell::new(3, 3)), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let mut grid = PixelGrid::new();
        grid.set(Cell::new(1, 2), 4);
        grid.set(Cell::new(1, 2), 1);
        assert_eq!(grid.get(Cell::new(1, 2)), Some(1));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_cells_are_distinct_by_axis() {
        let mut grid = PixelGrid::new();
        grid.set(Cell::new(1, 12), 1);
        grid.set(Cell::new(11, 2), 2);
        assert_eq!(grid.get(Cell::new(1, 12)), Some(1));
        assert_eq!(grid.get(Cell::new(11, 2)), Some(2));
    }

    #[test]
    fn test_retain_within() {
        let mut grid: PixelGrid = [(Cell::new(0, 0), 1), (Cell::new(5, 0), 1), (Cell::new(0, 9), 1)]
            .into_iter()
            .collect();
        assert_eq!(grid.retain_within(4, 4), 2);
        assert_eq!(grid.get(Cell::new(0, 0)), Some(1));
        assert_eq!(grid.get(Cell::new(5, 0)), None);
    }

    #[test]
    fn test_within() {
        assert!(Cell::new(15, 15).within(16, 16));
        assert!(!Cell::new(16, 0).within(16, 16));
    }
}
