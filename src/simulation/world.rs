//! The village world - single owner of all mutable simulation state
//!
//! Every shared collection (entity list, exploration board, NPC list,
//! building states, guild stock) is owned here and mutated only through
//! the tick orchestration; nothing holds references into it across ticks.
//! One seeded generator drives all sampling, which is what makes a run
//! replayable from its seed.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::actions::{ActionCatalog, BuildingState, ItemCatalog, JobCatalog};
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, VillageError};
use crate::core::types::{Coordinate, NpcId, Tick};
use crate::exploration::GuildBoard;
use crate::grid::TileGrid;
use crate::guild::{GuildDispatcher, GuildIssue};
use crate::npc::{DailySchedule, Npc};
use crate::world::{EntityManager, WorldSnapshot};

/// Name of the snapshot region seeded as fully known on the board
pub const TOWN_REGION: &str = "town";

pub struct VillageWorld {
    pub config: SimulationConfig,
    pub schedule: DailySchedule,
    pub grid: TileGrid,
    pub entities: EntityManager,
    pub board: GuildBoard,
    pub npcs: Vec<Npc>,
    /// Building key -> display state shown to the UI collaborator
    pub buildings: BTreeMap<String, BuildingState>,
    /// Guild-banked goods per resource key
    pub stocks: BTreeMap<String, u32>,
    /// Outstanding work orders, recomputed at the end of every tick
    pub orders: Vec<GuildIssue>,
    /// Orders currently claimed by an agent, keyed by NPC index
    pub claims: BTreeMap<usize, GuildIssue>,
    pub target_stock: BTreeMap<String, u32>,
    pub target_available: BTreeMap<String, u32>,
    /// Optional strict registration list for the dispatcher
    pub registered_resources: Option<Vec<String>>,
    pub actions: ActionCatalog,
    pub jobs: JobCatalog,
    pub items: ItemCatalog,
    pub tick: Tick,
    pub rng: ChaCha8Rng,
}

impl VillageWorld {
    pub fn new(
        seed: u64,
        config: SimulationConfig,
        grid: TileGrid,
        entities: EntityManager,
        board: GuildBoard,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(VillageError::InvalidConfig)?;
        Ok(Self {
            config,
            schedule: DailySchedule::default(),
            grid,
            entities,
            board,
            npcs: Vec::new(),
            buildings: BTreeMap::new(),
            stocks: BTreeMap::new(),
            orders: Vec::new(),
            claims: BTreeMap::new(),
            target_stock: BTreeMap::new(),
            target_available: BTreeMap::new(),
            registered_resources: None,
            actions: ActionCatalog::with_defaults(),
            jobs: JobCatalog::with_defaults(),
            items: ItemCatalog::with_defaults(),
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Build a world from the typed snapshot supplied by the world-data
    /// collaborator
    ///
    /// The `town` region, when present, is pre-seeded as known on the
    /// board so agents never explore inside settled areas; its rim toward
    /// unknown territory becomes the initial frontier.
    pub fn from_snapshot(
        snapshot: &WorldSnapshot,
        seed: u64,
        config: SimulationConfig,
    ) -> Result<Self> {
        let blocked = snapshot.blocked.iter().copied().collect();
        let grid = TileGrid::new(snapshot.width, snapshot.height, blocked);
        let entities = EntityManager::new(snapshot.entities.clone());

        let mut board = GuildBoard::new();
        if let Some(town) = snapshot.region(TOWN_REGION) {
            for y in town.origin.y..town.origin.y + town.height {
                for x in town.origin.x..town.origin.x + town.width {
                    board.known_cells.insert(Coordinate::new(x, y));
                }
            }
        }
        seed_frontier(&mut board, &grid);

        Self::new(seed, config, grid, entities, board)
    }

    pub fn add_npc(
        &mut self,
        name: impl Into<String>,
        job: impl Into<String>,
        position: Coordinate,
    ) -> NpcId {
        let id = NpcId(self.npcs.len());
        self.npcs.push(Npc::new(id, name, job, position));
        id
    }

    pub fn set_targets(
        &mut self,
        target_stock: BTreeMap<String, u32>,
        target_available: BTreeMap<String, u32>,
    ) {
        self.target_stock = target_stock;
        self.target_available = target_available;
    }

    /// Hour of the village day for the current tick
    pub fn hour(&self) -> u64 {
        (self.tick * self.config.tick_minutes / 60) % 24
    }

    pub fn stock(&self, key: &str) -> u32 {
        self.stocks.get(key).copied().unwrap_or(0)
    }

    /// Deposit gathered goods into the guild stock
    pub fn bank_items(&mut self, produced: &BTreeMap<String, u32>) {
        for (item, quantity) in produced {
            *self.stocks.entry(item.clone()).or_insert(0) += quantity;
        }
    }

    /// Rebuild the dispatcher from live state and refresh outstanding
    /// orders; runs at the end of every tick
    pub fn recompute_orders(&mut self) {
        let dispatcher = GuildDispatcher::from_world(
            &self.entities,
            self.registered_resources.as_deref(),
            &self.stocks,
            self.config.discovered_only_availability,
        );
        self.orders = dispatcher.issue_for_targets(&self.target_stock, &self.target_available);
    }

    /// First outstanding order not already covered by a claim
    pub fn next_unclaimed_order(&self) -> Option<GuildIssue> {
        self.orders
            .iter()
            .find(|order| {
                !self.claims.values().any(|claimed| {
                    claimed.action_name == order.action_name
                        && claimed.resource_key == order.resource_key
                })
            })
            .cloned()
    }
}

/// Mark every known cell bordering unknown in-bounds territory as frontier
pub fn seed_frontier(board: &mut GuildBoard, grid: &TileGrid) {
    let mut frontier = Vec::new();
    for cell in &board.known_cells {
        let borders_unknown = cell
            .neighbors4()
            .iter()
            .any(|n| grid.in_bounds(n) && !board.known_cells.contains(n));
        if borders_unknown {
            frontier.push(*cell);
        }
    }
    board.frontier_cells.extend(frontier);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::LevelRegion;

    fn snapshot() -> WorldSnapshot {
        WorldSnapshot {
            width: 8,
            height: 8,
            blocked: vec![Coordinate::new(4, 4)],
            entities: vec![],
            regions: vec![LevelRegion {
                name: TOWN_REGION.into(),
                origin: Coordinate::new(0, 0),
                width: 3,
                height: 3,
            }],
        }
    }

    #[test]
    fn test_from_snapshot_seeds_town_and_frontier() {
        let world = VillageWorld::from_snapshot(&snapshot(), 1, SimulationConfig::default()).unwrap();
        assert_eq!(world.board.known_cells.len(), 9);
        assert!(world.board.is_known(&Coordinate::new(2, 2)));
        assert!(!world.board.is_known(&Coordinate::new(3, 0)));
        // Town rim cells bordering the unknown are frontier
        assert!(world.board.frontier_cells.contains(&Coordinate::new(2, 0)));
        assert!(world.board.frontier_cells.contains(&Coordinate::new(0, 2)));
        // Interior town cells are not
        assert!(!world.board.frontier_cells.contains(&Coordinate::new(0, 0)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            tick_minutes: 0,
            ..SimulationConfig::default()
        };
        assert!(VillageWorld::from_snapshot(&snapshot(), 1, config).is_err());
    }

    #[test]
    fn test_hour_advances_with_ticks() {
        let mut world =
            VillageWorld::from_snapshot(&snapshot(), 1, SimulationConfig::default()).unwrap();
        assert_eq!(world.hour(), 0);
        world.tick = 6; // 60 minutes
        assert_eq!(world.hour(), 1);
        world.tick = 6 * 24;
        assert_eq!(world.hour(), 0);
    }

    #[test]
    fn test_bank_items_accumulates() {
        let mut world =
            VillageWorld::from_snapshot(&snapshot(), 1, SimulationConfig::default()).unwrap();
        let produced: BTreeMap<String, u32> =
            [("herb".to_string(), 2)].into_iter().collect();
        world.bank_items(&produced);
        world.bank_items(&produced);
        assert_eq!(world.stock("herb"), 4);
    }

    #[test]
    fn test_next_unclaimed_order_skips_claimed() {
        let mut world =
            VillageWorld::from_snapshot(&snapshot(), 1, SimulationConfig::default()).unwrap();
        world.orders = vec![
            GuildIssue::new("explore", "herb", 3),
            GuildIssue::new("gather_herbs", "herb", 2),
        ];
        world
            .claims
            .insert(0, GuildIssue::new("explore", "herb", 3));
        let next = world.next_unclaimed_order().unwrap();
        assert_eq!(next.action_name, "gather_herbs");
    }
}
