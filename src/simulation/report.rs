//! Read-only per-tick snapshots for the UI collaborator
//!
//! Everything here is copied out of the live world; the UI never holds
//! references into simulation state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::types::{Coordinate, Tick};
use crate::simulation::world::VillageWorld;

#[derive(Debug, Clone, Serialize)]
pub struct NpcReport {
    pub name: String,
    pub job: String,
    pub position: Coordinate,
    pub path: Vec<Coordinate>,
    pub inventory: BTreeMap<String, u32>,
    pub hunger: i32,
    pub fatigue: i32,
    pub activity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingReport {
    pub key: String,
    pub task: String,
    pub progress: u32,
    pub last_event: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VillageReport {
    pub tick: Tick,
    pub hour: u64,
    pub npcs: Vec<NpcReport>,
    pub buildings: Vec<BuildingReport>,
    pub stocks: BTreeMap<String, u32>,
    pub outstanding_orders: usize,
    pub known_cells: usize,
}

/// Snapshot the world for display
pub fn report(world: &VillageWorld) -> VillageReport {
    VillageReport {
        tick: world.tick,
        hour: world.hour(),
        npcs: world
            .npcs
            .iter()
            .map(|npc| NpcReport {
                name: npc.name.clone(),
                job: npc.job.clone(),
                position: npc.position,
                path: npc.contract.path.clone(),
                inventory: npc.inventory.clone(),
                hunger: npc.status.hunger,
                fatigue: npc.status.fatigue,
                activity: npc.contract.current_action_display.clone(),
            })
            .collect(),
        buildings: world
            .buildings
            .iter()
            .map(|(key, state)| BuildingReport {
                key: key.clone(),
                task: state.task.clone(),
                progress: state.progress,
                last_event: state.last_event.clone(),
            })
            .collect(),
        stocks: world.stocks.clone(),
        outstanding_orders: world.orders.len(),
        known_cells: world.board.known_cells.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::exploration::GuildBoard;
    use crate::grid::TileGrid;
    use crate::world::EntityManager;

    #[test]
    fn test_report_reflects_world() {
        let mut world = VillageWorld::new(
            1,
            SimulationConfig::default(),
            TileGrid::open(4, 4),
            EntityManager::new(vec![]),
            GuildBoard::with_all_cells_known(4, 4),
        )
        .unwrap();
        world.add_npc("Wren", "adventurer", Coordinate::new(2, 2));
        world.stocks.insert("herb".to_string(), 3);

        let report = report(&world);
        assert_eq!(report.npcs.len(), 1);
        assert_eq!(report.npcs[0].position, Coordinate::new(2, 2));
        assert_eq!(report.stocks.get("herb"), Some(&3));
        assert_eq!(report.known_cells, 16);
    }
}
