//! Per-cell intelligence records
//!
//! The payload is opaque key-value data; timestamp and discoverer are kept
//! for provenance only and never used to order merges.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::Tick;

/// One observation about a cell's resource or monster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelRecord {
    /// Opaque payload (e.g. "key" -> "herb", "quantity" -> "4")
    pub data: BTreeMap<String, String>,
    pub recorded_tick: Tick,
    pub reported_by: String,
}

impl IntelRecord {
    pub fn new(recorded_tick: Tick, reported_by: impl Into<String>) -> Self {
        Self {
            data: BTreeMap::new(),
            recorded_tick,
            reported_by: reported_by.into(),
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// What is known about one cell: resource intel and monster intel,
/// independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellIntel {
    pub resources: Option<IntelRecord>,
    pub monsters: Option<IntelRecord>,
}

impl CellIntel {
    pub fn with_resources(record: IntelRecord) -> Self {
        Self {
            resources: Some(record),
            monsters: None,
        }
    }

    pub fn with_monsters(record: IntelRecord) -> Self {
        Self {
            resources: None,
            monsters: Some(record),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_none() && self.monsters.is_none()
    }
}
