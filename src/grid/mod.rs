//! Tile grid and wavefront pathfinding

pub mod tile;
pub mod wavefront;

pub use tile::TileGrid;
pub use wavefront::{
    batch_next_steps_by_wavefront, find_path_to_nearest_target, wavefront_distances, DistanceField,
    UNREACHABLE,
};
