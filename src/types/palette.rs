//! Indexed palette with sparse overrides and generated placeholders.
//!
//! Every slot below the palette size always resolves to a colour: either an
//! explicit override the user set, or a placeholder derived from the slot
//! number alone. Overrides at or beyond the size are kept so that growing the
//! palette again brings them back.

use std::collections::BTreeMap;

use crate::error::{XqError, Result};

use super::Swatch;

/// Smallest palette a canvas may have.
pub const MIN_PALETTE_SIZE: usize = 2;

/// Colours of a fresh canvas.
pub const DEFAULT_PALETTE: [&str; 2] = ["#F8FAFC", "#0EA5E9"];

/// Alphabet the placeholder generator draws from.
const PLACEHOLDER_ALPHABET: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Modulus applied to the slot for each of the six output characters.
const PLACEHOLDER_MODULI: [usize; 6] = [6, 5, 5, 4, 5, 3];

/// A palette of `size` slots with sparse per-slot colour overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    overrides: BTreeMap<usize, Swatch>,
    size: usize,
}

impl Palette {
    /// Create a palette of `size` slots with no overrides.
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_PALETTE_SIZE {
            return Err(XqError::Validation {
                message: format!("Palette size {} is below the minimum of {}", size, MIN_PALETTE_SIZE),
                help: None,
            });
        }
        Ok(Self {
            overrides: BTreeMap::new(),
            size,
        })
    }

    /// The two-slot palette a new canvas starts with.
    pub fn default_palette() -> Self {
        Self::from_dense(DEFAULT_PALETTE.iter().map(|c| Swatch::normalize(c)).collect())
    }

    /// Build a palette where every entry is an explicit override.
    ///
    /// The size is the number of entries, raised to the minimum if fewer are
    /// given; slots without an entry fall back to placeholders.
    pub fn from_dense(colours: Vec<Swatch>) -> Self {
        let size = colours.len().max(MIN_PALETTE_SIZE);
        Self {
            overrides: colours.into_iter().enumerate().collect(),
            size,
        }
    }

    /// The deterministic placeholder colour for a slot.
    ///
    /// Depends on the slot alone, never on palette size or overrides.
    pub fn placeholder(slot: usize) -> Swatch {
        let mut hex = String::with_capacity(7);
        hex.push('#');
        for modulus in PLACEHOLDER_MODULI {
            hex.push(PLACEHOLDER_ALPHABET[slot % modulus]);
        }
        Swatch::normalize(&hex)
    }

    /// Resolve the colour of a slot: its override, or the placeholder.
    pub fn colour(&self, slot: usize) -> Swatch {
        self.overrides
            .get(&slot)
            .cloned()
            .unwrap_or_else(|| Self::placeholder(slot))
    }

    /// Store a colour override, normalizing the value first.
    pub fn set(&mut self, slot: usize, value: &str) {
        self.overrides.insert(slot, Swatch::normalize(value));
    }

    /// Number of selectable slots.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Highest valid slot.
    pub fn max_slot(&self) -> usize {
        self.size - 1
    }

    /// Clamp a slot into `0..size`.
    pub fn clamp(&self, slot: usize) -> usize {
        slot.min(self.max_slot())
    }

    /// Add one slot. There is no upper bound.
    pub fn grow(&mut self) {
        self.size += 1;
    }

    /// Remove one slot unless that would go below the minimum.
    ///
    /// Returns whether the size changed.
    pub fn shrink(&mut self) -> bool {
        if self.size > MIN_PALETTE_SIZE {
            self.size -= 1;
            true
        } else {
            false
        }
    }

    /// Resolved colours for every slot in order.
    pub fn resolved(&self) -> Vec<Swatch> {
        (0..self.size).map(|slot| self.colour(slot)).collect()
    }

    /// Iterate explicit overrides, including unreachable ones.
    pub fn overrides(&self) -> impl Iterator<Item = (usize, &Swatch)> {
        self.overrides.iter().map(|(slot, swatch)| (*slot, swatch))
    }

    /// Drop overrides for slots at or beyond the current size.
    ///
    /// Returns how many were removed.
    pub fn purge_unreachable(&mut self) -> usize {
        let before = self.overrides.len();
        let size = self.size;
        self.overrides.retain(|slot, _| *slot < size);
        before - self.overrides.len()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder_values() {
        assert_eq!(Palette::placeholder(0).as_str(), "#AAAAAA");
        assert_eq!(Palette::placeholder(1).as_str(), "#BBBBBB");
        assert_eq!(Palette::placeholder(3).as_str(), "#DDDDDA");
        assert_eq!(Palette::placeholder(4).as_str(), "#EEEAEB");
        assert_eq!(Palette::placeholder(5).as_str(), "#FAABAC");
        assert_eq!(Palette::placeholder(6).as_str(), "#ABBCBA");
    }

    #[test]
    fn test_placeholder_independent_of_size() {
        let small = Palette::new(2).unwrap();
        let large = Palette::new(40).unwrap();
        for slot in 0..64 {
            assert_eq!(small.colour(slot), large.colour(slot));
            assert_eq!(small.colour(slot), Palette::placeholder(slot));
        }
    }

    #[test]
    fn test_override_wins() {
        let mut palette = Palette::new(3).unwrap();
        palette.set(2, "ff0000");
        assert_eq!(palette.colour(2).as_str(), "#ff0000");
        assert_eq!(palette.colour(1), Palette::placeholder(1));
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default_palette();
        assert_eq!(palette.size(), 2);
        assert_eq!(
            palette.resolved(),
            vec![Swatch::normalize("#F8FAFC"), Swatch::normalize("#0EA5E9")]
        );
    }

    #[test]
    fn test_new_rejects_small_size() {
        assert!(Palette::new(1).is_err());
        assert!(Palette::new(0).is_err());
    }

    #[test]
    fn test_shrink_floor() {
        let mut palette = Palette::new(4).unwrap();
        assert!(palette.shrink());
        assert!(palette.shrink());
        for _ in 0..10 {
            assert!(!palette.shrink());
        }
        assert_eq!(palette.size(), MIN_PALETTE_SIZE);
    }

    #[test]
    fn test_grow_unbounded() {
        let mut palette = Palette::default_palette();
        for _ in 0..300 {
            palette.grow();
        }
        assert_eq!(palette.size(), 302);
    }

    #[test]
    fn test_clamp() {
        let palette = Palette::new(5).unwrap();
        assert_eq!(palette.clamp(0), 0);
        assert_eq!(palette.clamp(4), 4);
        assert_eq!(palette.clamp(99), 4);
    }

    #[test]
    fn test_shrink_keeps_override_for_grow_back() {
        let mut palette = Palette::new(3).unwrap();
        palette.set(2, "#123456");
        palette.shrink();
        assert_eq!(palette.resolved().len(), 2);
        palette.grow();
        assert_eq!(palette.colour(2).as_str(), "#123456");
    }

    #[test]
    fn test_purge_unreachable() {
        let mut palette = Palette::new(3).unwrap();
        palette.set(2, "#123456");
        palette.set(0, "#000000");
        palette.shrink();
        assert_eq!(palette.purge_unreachable(), 1);
        palette.grow();
        assert_eq!(palette.colour(2), Palette::placeholder(2));
        assert_eq!(palette.colour(0).as_str(), "#000000");
    }

    #[test]
    fn test_from_dense_short_input_is_padded() {
        let palette = Palette::from_dense(vec![Swatch::normalize("#010101")]);
        assert_eq!(palette.size(), 2);
        assert_eq!(palette.colour(1), Palette::placeholder(1));
    }
}
