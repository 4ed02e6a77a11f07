#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use shuffle::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod shuffle;
mod tile;
mod types;

/// Validated puzzle dimensions. The product ships a fixed 3x3 grid, but the
/// engine accepts any perfect square of at least 4 tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    tile_count: TileCount,
    grid_width: GridWidth,
}

impl PuzzleConfig {
    pub const DEFAULT_TILE_COUNT: TileCount = 9;

    pub const fn new(tile_count: TileCount) -> Result<Self> {
        let mut width: GridWidth = 2;
        while (width as u16) * (width as u16) < tile_count as u16 {
            width += 1;
        }
        if (width as u16) * (width as u16) != tile_count as u16 {
            return Err(PuzzleError::InvalidTileCount);
        }
        Ok(Self {
            tile_count,
            grid_width: width,
        })
    }

    pub const fn tile_count(&self) -> TileCount {
        self.tile_count
    }

    pub const fn grid_width(&self) -> GridWidth {
        self.grid_width
    }

    pub const fn validate_slot(&self, slot: SlotIndex) -> Result<SlotIndex> {
        if slot < self.tile_count {
            Ok(slot)
        } else {
            Err(PuzzleError::InvalidSlot)
        }
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TILE_COUNT).expect("default tile count is a perfect square")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_squares_are_accepted() {
        for count in [4, 9, 16] {
            let config = PuzzleConfig::new(count).unwrap();
            assert_eq!(config.tile_count(), count);
            assert_eq!(
                config.grid_width() as TileCount * config.grid_width() as TileCount,
                count
            );
        }
    }

    #[test]
    fn non_squares_and_tiny_grids_are_rejected() {
        for count in [0, 1, 2, 3, 5, 8, 10, 12, 15] {
            assert_eq!(PuzzleConfig::new(count), Err(PuzzleError::InvalidTileCount));
        }
    }

    #[test]
    fn slot_validation_matches_tile_count() {
        let config = PuzzleConfig::default();
        assert_eq!(config.validate_slot(0), Ok(0));
        assert_eq!(config.validate_slot(8), Ok(8));
        assert_eq!(config.validate_slot(9), Err(PuzzleError::InvalidSlot));
    }
}
