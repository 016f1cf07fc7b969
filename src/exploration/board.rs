//! Guild board - the authoritative exploration knowledge store
//!
//! Singleton for the lifetime of a simulation. NPCs observe into private
//! delta buffers and merge them here; the dispatcher and action resolution
//! read only from the board. Intel conflicts are resolved by a uniform
//! random choice between the two records: intel quality is not otherwise
//! comparable, so last-writer-wins is deliberately rejected.

use ahash::{AHashMap, AHashSet};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Coordinate;
use crate::exploration::buffer::NpcExplorationBuffer;
use crate::exploration::intel::{CellIntel, IntelRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuildBoard {
    pub known_cells: AHashSet<Coordinate>,
    /// Known cells adjacent to unknown territory - candidate exploration
    /// targets. May transiently overlap `known_cells`.
    pub frontier_cells: AHashSet<Coordinate>,
    pub cell_intel: AHashMap<Coordinate, CellIntel>,
}

/// Merge two optional intel records: keep the lone side, or pick uniformly
/// at random when both are present.
fn merge_record(
    existing: Option<IntelRecord>,
    incoming: Option<IntelRecord>,
    rng: &mut impl Rng,
) -> Option<IntelRecord> {
    match (existing, incoming) {
        (Some(a), Some(b)) => Some(if rng.gen_bool(0.5) { a } else { b }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

impl GuildBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board pre-seeded with every cell of a width x height rectangle known
    ///
    /// Used for the starting town region so agents never need to explore
    /// inside settled areas.
    pub fn with_all_cells_known(width: i32, height: i32) -> Self {
        let mut known_cells = AHashSet::new();
        for y in 0..height {
            for x in 0..width {
                known_cells.insert(Coordinate::new(x, y));
            }
        }
        Self {
            known_cells,
            frontier_cells: AHashSet::new(),
            cell_intel: AHashMap::new(),
        }
    }

    pub fn is_known(&self, cell: &Coordinate) -> bool {
        self.known_cells.contains(cell)
    }

    /// Merge one agent's delta buffer into the board
    ///
    /// Known and frontier sets are unioned; intel is merged per cell, with
    /// the resource and monster sub-records merged independently.
    pub fn apply_npc_buffer(&mut self, buffer: &NpcExplorationBuffer, rng: &mut impl Rng) {
        self.known_cells.extend(buffer.new_known_cells.iter().copied());
        self.frontier_cells
            .extend(buffer.new_frontier_cells.iter().copied());

        // Deterministic merge order regardless of hash iteration
        let mut cells: Vec<Coordinate> = buffer.intel_updates.keys().copied().collect();
        cells.sort_unstable();
        for cell in cells {
            let incoming = &buffer.intel_updates[&cell];
            let existing = self.cell_intel.remove(&cell).unwrap_or_default();
            let merged = CellIntel {
                resources: merge_record(existing.resources, incoming.resources.clone(), rng),
                monsters: merge_record(existing.monsters, incoming.monsters.clone(), rng),
            };
            if !merged.is_empty() {
                self.cell_intel.insert(cell, merged);
            }
        }

        tracing::debug!(
            known = self.known_cells.len(),
            frontier = self.frontier_cells.len(),
            "guild board merged exploration buffer"
        );
    }

    /// Export a catch-up delta limited to what the board knows about the
    /// requested cells
    pub fn export_delta_for_known_cells(&self, cells: &[Coordinate]) -> NpcExplorationBuffer {
        let mut delta = NpcExplorationBuffer::new();
        for cell in cells {
            if self.known_cells.contains(cell) {
                delta.new_known_cells.insert(*cell);
            }
            if self.frontier_cells.contains(cell) {
                delta.new_frontier_cells.insert(*cell);
            }
            if let Some(intel) = self.cell_intel.get(cell) {
                delta.intel_updates.insert(*cell, intel.clone());
            }
        }
        delta
    }

    /// Uniform-random pick from the current frontier, or None when empty
    ///
    /// Deliberately unweighted to avoid systematic exploration bias.
    /// Candidates are sorted before indexing so the pick depends only on
    /// the RNG stream, not hash iteration order.
    pub fn choose_next_frontier(&self, rng: &mut impl Rng) -> Option<Coordinate> {
        if self.frontier_cells.is_empty() {
            return None;
        }
        let mut candidates: Vec<Coordinate> = self.frontier_cells.iter().copied().collect();
        candidates.sort_unstable();
        Some(candidates[rng.gen_range(0..candidates.len())])
    }

    /// Retire a frontier cell once an explorer has processed it
    pub fn clear_frontier(&mut self, cell: &Coordinate) {
        self.frontier_cells.remove(cell);
    }
}
