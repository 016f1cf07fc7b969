//! World snapshot - the input contract from the world-data collaborator
//!
//! Level parsing and schema validation live outside this crate; what we
//! consume is an already-typed, immutable snapshot of the starting world.

use serde::{Deserialize, Serialize};

use crate::core::types::Coordinate;
use crate::world::entity::Entity;

/// A named rectangular region of the level (e.g. the starting town)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRegion {
    pub name: String,
    pub origin: Coordinate,
    pub width: i32,
    pub height: i32,
}

impl LevelRegion {
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.x >= self.origin.x
            && coord.y >= self.origin.y
            && coord.x < self.origin.x + self.width
            && coord.y < self.origin.y + self.height
    }
}

/// Typed starting state for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub blocked: Vec<Coordinate>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub regions: Vec<LevelRegion>,
}

impl WorldSnapshot {
    /// Region lookup by name, first match
    pub fn region(&self, name: &str) -> Option<&LevelRegion> {
        self.regions.iter().find(|r| r.name == name)
    }
}
