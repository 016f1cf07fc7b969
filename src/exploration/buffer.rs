//! Per-agent exploration delta buffer
//!
//! Owned exclusively by one NPC, filled during a tick's exploration step,
//! merged into the guild board, then cleared. It only ever holds the
//! incremental observation made this tick - never a copy of board state.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::types::Coordinate;
use crate::exploration::intel::{CellIntel, IntelRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcExplorationBuffer {
    pub new_known_cells: AHashSet<Coordinate>,
    pub new_frontier_cells: AHashSet<Coordinate>,
    pub intel_updates: AHashMap<Coordinate, CellIntel>,
}

impl NpcExplorationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_known(&mut self, cell: Coordinate) {
        self.new_known_cells.insert(cell);
    }

    pub fn record_frontier(&mut self, cell: Coordinate) {
        self.new_frontier_cells.insert(cell);
    }

    pub fn record_resource_intel(&mut self, cell: Coordinate, record: IntelRecord) {
        self.intel_updates.entry(cell).or_default().resources = Some(record);
    }

    pub fn record_monster_intel(&mut self, cell: Coordinate, record: IntelRecord) {
        self.intel_updates.entry(cell).or_default().monsters = Some(record);
    }

    pub fn is_empty(&self) -> bool {
        self.new_known_cells.is_empty()
            && self.new_frontier_cells.is_empty()
            && self.intel_updates.is_empty()
    }

    pub fn clear(&mut self) {
        self.new_known_cells.clear();
        self.new_frontier_cells.clear();
        self.intel_updates.clear();
    }
}
