//! Guild dispatcher - converts global resource targets into work orders
//!
//! The dispatcher is a stateless policy evaluator: it is rebuilt each
//! decision cycle from a live entity snapshot plus the guild's banked
//! stock, and emits explore/gather issues for the gap between what the
//! village has and what it wants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::world::EntityManager;

/// Action name used for exploration issues (and for the adventurer's
/// board-check eligibility)
pub const EXPLORE_ACTION: &str = "explore";

/// A work order emitted by the dispatcher; immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildIssue {
    pub action_name: String,
    pub resource_key: String,
    pub amount: u32,
}

impl GuildIssue {
    pub fn new(action_name: impl Into<String>, resource_key: impl Into<String>, amount: u32) -> Self {
        Self {
            action_name: action_name.into(),
            resource_key: resource_key.into(),
            amount,
        }
    }

    pub fn is_explore(&self) -> bool {
        self.action_name == EXPLORE_ACTION
    }
}

/// Gather action name for a resource key, by fixed prefix table
///
/// Unmatched prefixes fall back to the generic gather action.
pub fn gather_action_for_key(key: &str) -> &'static str {
    let lower = key.to_ascii_lowercase();
    if lower.starts_with("herb") {
        "gather_herbs"
    } else if lower.starts_with("tree") {
        "fell_trees"
    } else if lower.starts_with("ore") {
        "mine_ore"
    } else if lower.starts_with("animal") || lower.starts_with("monster") {
        "hunt"
    } else {
        "gather"
    }
}

/// Per-key stock and availability ledger entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ResourceLedger {
    /// Units the guild has banked
    stock: u32,
    /// Sum of current_quantity across matching world resource entities
    available: u32,
}

/// Supply/demand evaluator over registered resource keys
///
/// The ledger is a `BTreeMap` so issues come out ordered by sorted key.
#[derive(Debug, Clone)]
pub struct GuildDispatcher {
    ledger: BTreeMap<String, ResourceLedger>,
}

impl GuildDispatcher {
    /// Build from a live entity snapshot
    ///
    /// `registered` restricts tracked keys (and their availability sums)
    /// strictly to that list when present; otherwise every distinct
    /// resource key in the world is tracked. `starting_stock` defaults to
    /// zero for unlisted keys. When `discovered_only` is set, undiscovered
    /// resources contribute nothing to availability.
    pub fn from_world(
        entities: &EntityManager,
        registered: Option<&[String]>,
        starting_stock: &BTreeMap<String, u32>,
        discovered_only: bool,
    ) -> Self {
        let mut ledger: BTreeMap<String, ResourceLedger> = BTreeMap::new();

        match registered {
            Some(keys) => {
                for key in keys {
                    ledger.entry(key.clone()).or_default();
                }
            }
            None => {
                for entity in entities.entities() {
                    if entity.as_resource().is_some() {
                        ledger.entry(entity.key().to_string()).or_default();
                    }
                }
                for key in starting_stock.keys() {
                    ledger.entry(key.clone()).or_default();
                }
            }
        }

        for (key, entry) in ledger.iter_mut() {
            entry.stock = starting_stock.get(key).copied().unwrap_or(0);
            entry.available = entities
                .candidates_by_key(key, discovered_only)
                .into_iter()
                .filter_map(|i| entities.entities()[i].as_resource())
                .map(|r| r.current_quantity)
                .sum();
        }

        Self { ledger }
    }

    pub fn tracked_keys(&self) -> impl Iterator<Item = &str> {
        self.ledger.keys().map(String::as_str)
    }

    pub fn stock(&self, key: &str) -> u32 {
        self.ledger.get(key).map_or(0, |e| e.stock)
    }

    pub fn available(&self, key: &str) -> u32 {
        self.ledger.get(key).map_or(0, |e| e.available)
    }

    /// Emit work orders for the gap between targets and current state
    ///
    /// For each tracked key, independently (both may fire the same tick):
    /// - explore for `max(0, target_available - available)` when positive;
    /// - gather for `min(max(0, target_stock - stock), available)` when
    ///   positive - a gather order never promises more than physically
    ///   exists right now.
    ///
    /// Output is ordered by sorted key.
    pub fn issue_for_targets(
        &self,
        target_stock: &BTreeMap<String, u32>,
        target_available: &BTreeMap<String, u32>,
    ) -> Vec<GuildIssue> {
        let mut issues = Vec::new();
        for (key, entry) in &self.ledger {
            let want_available = target_available.get(key).copied().unwrap_or(0);
            let explore_amount = want_available.saturating_sub(entry.available);
            if explore_amount > 0 {
                issues.push(GuildIssue::new(EXPLORE_ACTION, key.clone(), explore_amount));
            }

            let want_stock = target_stock.get(key).copied().unwrap_or(0);
            let gather_amount = want_stock.saturating_sub(entry.stock).min(entry.available);
            if gather_amount > 0 {
                issues.push(GuildIssue::new(
                    gather_action_for_key(key),
                    key.clone(),
                    gather_amount,
                ));
            }
        }

        if !issues.is_empty() {
            tracing::debug!(count = issues.len(), "guild dispatcher issued work orders");
        }
        issues
    }
}
