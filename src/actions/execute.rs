//! Ticked action execution
//!
//! One call advances one NPC's in-progress action by at most one tick.
//! The tool gate runs every tick before anything is decremented, so a
//! never-available tool leaves the action permanently in progress rather
//! than abandoned; callers see the failure signal and retry next tick.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::defs::{ActionDef, ItemCatalog, BUILDING_PROGRESS_MODULUS};
use crate::core::config::SimulationConfig;
use crate::npc::Npc;
use crate::world::EntityManager;

/// Entity keys whose actions drive building state
pub const BUILDING_KEYS: &[&str] = &["bakery", "forge", "workshop"];

pub fn is_building_key(key: &str) -> bool {
    BUILDING_KEYS.contains(&key)
}

/// Result of one execution tick
///
/// Failures are values, not errors: the simulation never halts because an
/// agent could not work this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOutcome {
    /// A required tool is absent from inventory; nothing was decremented
    MissingTool { tool: String },
    /// The required world entity is depleted or absent; nothing was
    /// decremented
    EntityUnavailable { key: String },
    /// One tick of work consumed, more remain
    InProgress,
    /// Final tick: outputs were produced and the work fields cleared
    Completed { produced: BTreeMap<String, u32> },
}

/// Mutable display state of one village building
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingState {
    pub task: String,
    /// 0..=100, advances by a random amount and wraps
    pub progress: u32,
    pub last_event: String,
}

/// Fractional per-tick cost: `round(total / ticks)`, floored at zero
fn per_tick_cost(total: i32, ticks: u32) -> i32 {
    if total <= 0 || ticks == 0 {
        return 0;
    }
    let total = total as u32;
    ((total + ticks / 2) / ticks) as i32
}

/// Advance `npc`'s current action by one tick
pub fn tick_work(
    npc: &mut Npc,
    def: &ActionDef,
    entities: &mut EntityManager,
    items: &ItemCatalog,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> WorkOutcome {
    let total_ticks = def.work_ticks(config.tick_minutes);

    // First tick of this action: initialize the countdown
    if npc.current_work_action.as_deref() != Some(def.name.as_str())
        || npc.work_ticks_remaining == 0
    {
        npc.current_work_action = Some(def.name.clone());
        npc.work_ticks_remaining = total_ticks;
    }

    // Tool gate, re-checked every tick before any decrement
    for tool in &def.required_tools {
        if !npc.has_tool(tool) {
            return WorkOutcome::MissingTool { tool: tool.clone() };
        }
    }

    if let Some(key) = &def.required_entity {
        if !entities.consume(key, 1, rng) {
            return WorkOutcome::EntityUnavailable { key: key.clone() };
        }
    }

    npc.status.apply_work_cost(
        per_tick_cost(def.hunger_cost, total_ticks),
        per_tick_cost(def.fatigue_cost, total_ticks),
    );
    npc.work_ticks_remaining -= 1;

    if npc.work_ticks_remaining > 0 {
        return WorkOutcome::InProgress;
    }

    // Final tick: produce outputs, unknown item keys silently dropped
    let mut produced = BTreeMap::new();
    for (item, quantity) in &def.outputs {
        if !items.is_known(item) {
            continue;
        }
        let amount = quantity.sample(rng);
        if amount > 0 {
            npc.add_item(item.clone(), amount);
            produced.insert(item.clone(), amount);
        }
    }
    npc.clear_work();
    tracing::debug!(npc = %npc.name, action = %def.name, "action completed");
    WorkOutcome::Completed { produced }
}

/// Apply the building-state side effects of a completed building action
///
/// Only called for actions whose required entity key is in
/// [`BUILDING_KEYS`]; the caller owns the state map.
pub fn apply_building_side_effects(
    state: &mut BuildingState,
    def: &ActionDef,
    rng: &mut impl Rng,
) {
    state.task = def.display_name.clone();
    state.progress =
        (state.progress + rng.gen_range(0..BUILDING_PROGRESS_MODULUS)) % BUILDING_PROGRESS_MODULUS;
    state.last_event = format!("Finished: {}", def.display_name);
}
