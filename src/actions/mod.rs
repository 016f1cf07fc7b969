//! Action definitions, rules loading, and ticked execution

pub mod defs;
pub mod execute;
pub mod loader;

pub use defs::{
    resolve_action_def, ActionCatalog, ActionDef, ItemCatalog, JobCatalog, OutputQuantity,
};
pub use execute::{
    apply_building_side_effects, is_building_key, tick_work, BuildingState, WorkOutcome,
};
pub use loader::{load_rules, parse_rules};
