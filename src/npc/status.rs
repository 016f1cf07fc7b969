//! NPC status gauges
//!
//! Hunger and fatigue run 0..=100 where 0 means sated/rested. Decay and
//! restore amounts come from `SimulationConfig`; work actions add their own
//! per-tick costs on top.

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;

pub const STATUS_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcStatus {
    pub hunger: i32,
    pub fatigue: i32,
}

fn clamp_gauge(value: i32) -> i32 {
    value.clamp(0, STATUS_MAX)
}

impl NpcStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passive decay applied every awake tick
    pub fn apply_awake_decay(&mut self, config: &SimulationConfig) {
        self.hunger = clamp_gauge(self.hunger + config.hunger_per_tick);
        self.fatigue = clamp_gauge(self.fatigue + config.fatigue_per_tick);
    }

    /// One meal activity
    pub fn eat_meal(&mut self, config: &SimulationConfig) {
        self.hunger = clamp_gauge(self.hunger - config.meal_restore);
    }

    /// One tick spent sleeping (no awake decay while asleep)
    pub fn sleep_tick(&mut self, config: &SimulationConfig) {
        self.fatigue = clamp_gauge(self.fatigue - config.sleep_restore_per_tick);
        self.hunger = clamp_gauge(self.hunger + config.hunger_per_tick);
    }

    /// Per-tick cost of an in-progress work action
    pub fn apply_work_cost(&mut self, hunger_cost: i32, fatigue_cost: i32) {
        self.hunger = clamp_gauge(self.hunger + hunger_cost.max(0));
        self.fatigue = clamp_gauge(self.fatigue + fatigue_cost.max(0));
    }
}
