//! The NPC record
//!
//! One struct owns everything mutable about an agent: position, status
//! gauges, inventory, in-progress work, contract state, and the private
//! exploration delta buffer. Inventory entries are removed when quantity
//! reaches zero and can never go negative.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Coordinate, NpcId};
use crate::exploration::NpcExplorationBuffer;
use crate::npc::contract::NpcContract;
use crate::npc::status::NpcStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub job: String,
    pub position: Coordinate,
    pub status: NpcStatus,
    /// item key -> quantity; kept sorted for stable report output
    pub inventory: BTreeMap<String, u32>,
    pub current_work_action: Option<String>,
    pub work_ticks_remaining: u32,
    pub contract: NpcContract,
    #[serde(default)]
    pub exploration: NpcExplorationBuffer,
}

impl Npc {
    pub fn new(
        id: NpcId,
        name: impl Into<String>,
        job: impl Into<String>,
        position: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            job: job.into(),
            position,
            status: NpcStatus::new(),
            inventory: BTreeMap::new(),
            current_work_action: None,
            work_ticks_remaining: 0,
            contract: NpcContract::new(),
            exploration: NpcExplorationBuffer::new(),
        }
    }

    pub fn is_adventurer(&self) -> bool {
        self.job == "adventurer"
    }

    pub fn item_count(&self, key: &str) -> u32 {
        self.inventory.get(key).copied().unwrap_or(0)
    }

    /// A tool is usable only while its quantity is positive
    pub fn has_tool(&self, key: &str) -> bool {
        self.item_count(key) > 0
    }

    pub fn add_item(&mut self, key: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.inventory.entry(key.into()).or_insert(0) += quantity;
    }

    /// Remove up to `quantity` of an item; fails without mutating when the
    /// agent holds fewer than requested.
    pub fn remove_item(&mut self, key: &str, quantity: u32) -> bool {
        match self.inventory.get_mut(key) {
            Some(held) if *held >= quantity => {
                *held -= quantity;
                if *held == 0 {
                    self.inventory.remove(key);
                }
                true
            }
            _ => false,
        }
    }

    /// Drain the whole inventory, returning what was held
    pub fn take_all_items(&mut self) -> BTreeMap<String, u32> {
        std::mem::take(&mut self.inventory)
    }

    /// Abandon any in-progress work without crediting outputs
    pub fn clear_work(&mut self) {
        self.current_work_action = None;
        self.work_ticks_remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npc() -> Npc {
        Npc::new(NpcId(0), "Wren", "adventurer", Coordinate::new(0, 0))
    }

    #[test]
    fn test_add_and_remove_items() {
        let mut npc = npc();
        npc.add_item("axe", 1);
        npc.add_item("herb", 3);
        assert!(npc.has_tool("axe"));
        assert!(npc.remove_item("herb", 2));
        assert_eq!(npc.item_count("herb"), 1);
    }

    #[test]
    fn test_entry_removed_at_zero() {
        let mut npc = npc();
        npc.add_item("herb", 2);
        assert!(npc.remove_item("herb", 2));
        assert!(!npc.inventory.contains_key("herb"));
        assert!(!npc.has_tool("herb"));
    }

    #[test]
    fn test_remove_more_than_held_fails_without_mutation() {
        let mut npc = npc();
        npc.add_item("ore", 1);
        assert!(!npc.remove_item("ore", 2));
        assert_eq!(npc.item_count("ore"), 1);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut npc = npc();
        npc.add_item("herb", 0);
        assert!(npc.inventory.is_empty());
    }

    #[test]
    fn test_take_all_items_empties_inventory() {
        let mut npc = npc();
        npc.add_item("herb", 4);
        npc.add_item("ore", 2);
        let taken = npc.take_all_items();
        assert_eq!(taken.get("herb"), Some(&4));
        assert!(npc.inventory.is_empty());
    }

    #[test]
    fn test_clear_work_resets_fields() {
        let mut npc = npc();
        npc.current_work_action = Some("mine_ore".into());
        npc.work_ticks_remaining = 7;
        npc.clear_work();
        assert!(npc.current_work_action.is_none());
        assert_eq!(npc.work_ticks_remaining, 0);
    }
}
