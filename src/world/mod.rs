//! World entities and their single-owner manager

pub mod entity;
pub mod manager;
pub mod snapshot;

pub use entity::{Entity, ResourceEntity, StatEntity, StationEntity};
pub use manager::EntityManager;
pub use snapshot::{LevelRegion, WorldSnapshot};
