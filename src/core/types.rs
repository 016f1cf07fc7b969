//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (one tick = `tick_minutes` of village time)
pub type Tick = u64;

/// Integer tile position on the village grid
///
/// Equality and hashing are by value; ordering is `(y, x)` because the
/// pathfinder breaks ties by the lexicographically smallest `(y, x)`
/// neighbor, and deterministic random picks sort candidates the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbors (no diagonal movement)
    pub fn neighbors4(&self) -> [Coordinate; 4] {
        [
            Coordinate::new(self.x, self.y - 1),
            Coordinate::new(self.x, self.y + 1),
            Coordinate::new(self.x - 1, self.y),
            Coordinate::new(self.x + 1, self.y),
        ]
    }

    /// Chebyshev (king-move) distance, used for discovery radii
    pub fn chebyshev(&self, other: &Coordinate) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

/// Index of an NPC in the world's processing order
///
/// NPCs are processed in ascending id order each tick, which is what makes
/// shared-state mutation deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(pub usize);

/// Index of an outstanding guild work order within a tick's order list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_equality_and_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<Coordinate, &str> = HashMap::new();
        map.insert(Coordinate::new(3, 4), "well");
        assert_eq!(map.get(&Coordinate::new(3, 4)), Some(&"well"));
        assert_eq!(map.get(&Coordinate::new(4, 3)), None);
    }

    #[test]
    fn test_coordinate_ordering_is_y_then_x() {
        let a = Coordinate::new(5, 1);
        let b = Coordinate::new(0, 2);
        // y dominates
        assert!(a < b);
        // same y falls back to x
        assert!(Coordinate::new(1, 2) < Coordinate::new(3, 2));
    }

    #[test]
    fn test_neighbors4_no_diagonals() {
        let c = Coordinate::new(2, 2);
        for n in c.neighbors4() {
            assert_eq!((n.x - c.x).abs() + (n.y - c.y).abs(), 1);
        }
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Coordinate::new(0, 0);
        assert_eq!(a.chebyshev(&Coordinate::new(3, 1)), 3);
        assert_eq!(a.chebyshev(&Coordinate::new(-2, -2)), 2);
        assert_eq!(a.chebyshev(&a), 0);
    }
}
