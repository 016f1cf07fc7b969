//! Tile grid - immutable walkability data for a simulation run
//!
//! The grid itself never changes during a run; structures opening and
//! closing are modeled as entity state, not grid state.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::Coordinate;

/// Immutable width/height plus the set of blocked tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    blocked: AHashSet<Coordinate>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32, blocked: AHashSet<Coordinate>) -> Self {
        Self {
            width,
            height,
            blocked,
        }
    }

    /// Grid with no blocked tiles
    pub fn open(width: i32, height: i32) -> Self {
        Self::new(width, height, AHashSet::new())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: &Coordinate) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    pub fn is_blocked(&self, coord: &Coordinate) -> bool {
        self.blocked.contains(coord)
    }

    /// A tile an agent may stand on: inside the grid and not blocked
    pub fn is_walkable(&self, coord: &Coordinate) -> bool {
        self.in_bounds(coord) && !self.is_blocked(coord)
    }

    /// Row-major index for dense per-tile fields
    pub fn index_of(&self, coord: &Coordinate) -> usize {
        (coord.y * self.width + coord.x) as usize
    }

    pub fn tile_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = TileGrid::open(4, 3);
        assert!(grid.in_bounds(&Coordinate::new(0, 0)));
        assert!(grid.in_bounds(&Coordinate::new(3, 2)));
        assert!(!grid.in_bounds(&Coordinate::new(4, 0)));
        assert!(!grid.in_bounds(&Coordinate::new(0, 3)));
        assert!(!grid.in_bounds(&Coordinate::new(-1, 1)));
    }

    #[test]
    fn test_blocked_tiles_not_walkable() {
        let mut blocked = AHashSet::new();
        blocked.insert(Coordinate::new(1, 1));
        let grid = TileGrid::new(3, 3, blocked);
        assert!(!grid.is_walkable(&Coordinate::new(1, 1)));
        assert!(grid.is_walkable(&Coordinate::new(0, 1)));
    }

    #[test]
    fn test_row_major_index() {
        let grid = TileGrid::open(5, 4);
        assert_eq!(grid.index_of(&Coordinate::new(0, 0)), 0);
        assert_eq!(grid.index_of(&Coordinate::new(4, 0)), 4);
        assert_eq!(grid.index_of(&Coordinate::new(0, 1)), 5);
        assert_eq!(grid.tile_count(), 20);
    }
}
