//! TOML rules loading
//!
//! One rules file carries the action definitions, the job -> action lists,
//! and the item registry. Malformed values inside a definition (short
//! durations, inverted ranges) are normalized rather than rejected; only
//! unparseable TOML is an error.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::actions::defs::{ActionCatalog, ActionDef, ItemCatalog, JobCatalog};
use crate::core::error::Result;

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    actions: Vec<ActionDef>,
    #[serde(default)]
    jobs: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    items: BTreeMap<String, String>,
}

/// Parse a rules document from TOML text
pub fn parse_rules(text: &str) -> Result<(ActionCatalog, JobCatalog, ItemCatalog)> {
    let file: RulesFile = toml::from_str(text)?;
    tracing::debug!(
        actions = file.actions.len(),
        jobs = file.jobs.len(),
        items = file.items.len(),
        "parsed rules file"
    );
    Ok((
        ActionCatalog::new(file.actions),
        JobCatalog::new(file.jobs),
        ItemCatalog::new(file.items),
    ))
}

/// Load a rules document from disk
pub fn load_rules(path: &Path) -> Result<(ActionCatalog, JobCatalog, ItemCatalog)> {
    let text = std::fs::read_to_string(path)?;
    parse_rules(&text)
}
