//! Simulation coordination: world ownership, tick orchestration, reports

pub mod report;
pub mod tick;
pub mod world;

pub use report::{report, VillageReport};
pub use tick::run_simulation_tick;
pub use world::VillageWorld;
