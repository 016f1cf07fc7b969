//! World entities as tagged variants
//!
//! Keys are lookup tokens, not unique ids: a forest holds many entities
//! with key "tree". Invariants (quantity and duration ranges) are clamped
//! once at construction and never re-validated per access.

use serde::{Deserialize, Serialize};

use crate::core::types::Coordinate;

/// A consumable world resource (herb patch, tree, ore vein, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntity {
    pub key: String,
    pub name: String,
    pub position: Coordinate,
    pub max_quantity: u32,
    pub current_quantity: u32,
    pub is_discovered: bool,
}

impl ResourceEntity {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        position: Coordinate,
        max_quantity: u32,
        current_quantity: u32,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            position,
            max_quantity,
            current_quantity: current_quantity.min(max_quantity),
            is_discovered: false,
        }
    }

    pub fn discovered(mut self) -> Self {
        self.is_discovered = true;
        self
    }

    pub fn is_depleted(&self) -> bool {
        self.current_quantity == 0
    }
}

/// A crafting station or a built structure
///
/// Both carry a duration gauge (e.g. remaining service life or door-open
/// time) with the invariant `min <= current <= max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationEntity {
    pub key: String,
    pub name: String,
    pub position: Coordinate,
    pub min_duration: u32,
    pub current_duration: u32,
    pub max_duration: u32,
}

impl StationEntity {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        position: Coordinate,
        min_duration: u32,
        current_duration: u32,
        max_duration: u32,
    ) -> Self {
        let max = max_duration.max(min_duration);
        Self {
            key: key.into(),
            name: name.into(),
            position,
            min_duration,
            current_duration: current_duration.clamp(min_duration, max),
            max_duration: max,
        }
    }
}

/// A named stat marker placed in the world (spawn points, shrines, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntity {
    pub key: String,
    pub name: String,
    pub position: Coordinate,
}

/// Polymorphic world entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Resource(ResourceEntity),
    Workbench(StationEntity),
    Structure(StationEntity),
    Stat(StatEntity),
}

impl Entity {
    pub fn key(&self) -> &str {
        match self {
            Entity::Resource(r) => &r.key,
            Entity::Workbench(s) | Entity::Structure(s) => &s.key,
            Entity::Stat(s) => &s.key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Resource(r) => &r.name,
            Entity::Workbench(s) | Entity::Structure(s) => &s.name,
            Entity::Stat(s) => &s.name,
        }
    }

    pub fn position(&self) -> Coordinate {
        match self {
            Entity::Resource(r) => r.position,
            Entity::Workbench(s) | Entity::Structure(s) => s.position,
            Entity::Stat(s) => s.position,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceEntity> {
        match self {
            Entity::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_resource_mut(&mut self) -> Option<&mut ResourceEntity> {
        match self {
            Entity::Resource(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_quantity_clamped_to_max() {
        let r = ResourceEntity::new("herb", "Herb Patch", Coordinate::new(0, 0), 10, 99);
        assert_eq!(r.current_quantity, 10);
    }

    #[test]
    fn test_station_duration_clamped_into_range() {
        let s = StationEntity::new("forge", "Forge", Coordinate::new(1, 1), 5, 100, 20);
        assert_eq!(s.current_duration, 20);
        let s = StationEntity::new("forge", "Forge", Coordinate::new(1, 1), 5, 1, 20);
        assert_eq!(s.current_duration, 5);
    }

    #[test]
    fn test_entity_accessors() {
        let e = Entity::Resource(ResourceEntity::new(
            "tree_oak",
            "Oak",
            Coordinate::new(2, 3),
            8,
            8,
        ));
        assert_eq!(e.key(), "tree_oak");
        assert_eq!(e.position(), Coordinate::new(2, 3));
        assert!(e.as_resource().is_some());
    }
}
