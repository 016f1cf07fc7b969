//! Action definitions and configuration catalogs
//!
//! Definitions are validated once at load time (duration floor, inverted
//! output ranges) and never re-checked per tick. Catalogs are `BTreeMap`s
//! so iteration and report output stay in sorted-key order.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shortest action duration in village minutes
pub const MIN_DURATION_MINUTES: u64 = 10;

/// Progress counters on buildings wrap modulo this
pub const BUILDING_PROGRESS_MODULUS: u32 = 101;

/// Quantity produced by one completed action output
///
/// Untagged so TOML can write `herb = 2` or `herb = { min = 1, max = 3 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputQuantity {
    Fixed(u32),
    Range { min: i64, max: i64 },
}

impl OutputQuantity {
    /// Sample a concrete quantity
    ///
    /// Inverted ranges are swapped rather than rejected; negative samples
    /// clamp to zero.
    pub fn sample(&self, rng: &mut impl Rng) -> u32 {
        match *self {
            OutputQuantity::Fixed(n) => n,
            OutputQuantity::Range { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                rng.gen_range(lo..=hi).max(0) as u32
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    pub display_name: String,
    pub duration_minutes: u64,
    #[serde(default)]
    pub required_tools: Vec<String>,
    #[serde(default)]
    pub required_entity: Option<String>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputQuantity>,
    #[serde(default)]
    pub fatigue_cost: i32,
    #[serde(default)]
    pub hunger_cost: i32,
}

impl ActionDef {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, duration_minutes: u64) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            duration_minutes: duration_minutes.max(MIN_DURATION_MINUTES),
            required_tools: Vec::new(),
            required_entity: None,
            outputs: BTreeMap::new(),
            fatigue_cost: 0,
            hunger_cost: 0,
        }
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.required_tools.push(tool.into());
        self
    }

    pub fn with_entity(mut self, key: impl Into<String>) -> Self {
        self.required_entity = Some(key.into());
        self
    }

    pub fn with_output(mut self, item: impl Into<String>, quantity: OutputQuantity) -> Self {
        self.outputs.insert(item.into(), quantity);
        self
    }

    pub fn with_costs(mut self, hunger: i32, fatigue: i32) -> Self {
        self.hunger_cost = hunger;
        self.fatigue_cost = fatigue;
        self
    }

    /// Duration in ticks: floored minutes divided by the tick unit, never
    /// below one tick
    pub fn work_ticks(&self, tick_minutes: u64) -> u32 {
        (self.duration_minutes.max(MIN_DURATION_MINUTES) / tick_minutes).max(1) as u32
    }

    /// Enforce load-time invariants on a deserialized definition
    pub fn normalized(mut self) -> Self {
        self.duration_minutes = self.duration_minutes.max(MIN_DURATION_MINUTES);
        self
    }
}

/// All named action definitions, keyed by action name
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: BTreeMap<String, ActionDef>,
}

impl ActionCatalog {
    pub fn new(defs: impl IntoIterator<Item = ActionDef>) -> Self {
        Self {
            actions: defs
                .into_iter()
                .map(|d| (d.name.clone(), d.normalized()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ActionDef> {
        self.actions.get(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The demo/test catalog used when no TOML rules file is supplied
    pub fn with_defaults() -> Self {
        Self::new([
            ActionDef::new("idle", "Idling", 10),
            ActionDef::new("check_guild_board", "Checking the guild board", 10),
            ActionDef::new("explore", "Exploring the wilds", 30).with_costs(1, 2),
            ActionDef::new("gather_herbs", "Gathering herbs", 60)
                .with_entity("herb")
                .with_output("herb", OutputQuantity::Range { min: 1, max: 3 })
                .with_costs(1, 2),
            ActionDef::new("fell_trees", "Felling trees", 120)
                .with_tool("axe")
                .with_entity("tree")
                .with_output("wood", OutputQuantity::Fixed(2))
                .with_costs(2, 4),
            ActionDef::new("mine_ore", "Mining ore", 180)
                .with_tool("pickaxe")
                .with_entity("ore")
                .with_output("ore", OutputQuantity::Range { min: 1, max: 2 })
                .with_costs(2, 5),
            ActionDef::new("hunt", "Hunting game", 120)
                .with_tool("bow")
                .with_entity("animal")
                .with_output("meat", OutputQuantity::Range { min: 0, max: 2 })
                .with_costs(2, 4),
            ActionDef::new("gather", "Gathering supplies", 60)
                .with_output("supplies", OutputQuantity::Fixed(1))
                .with_costs(1, 2),
            ActionDef::new("bake_bread", "Baking bread", 120)
                .with_entity("bakery")
                .with_output("bread", OutputQuantity::Range { min: 1, max: 2 })
                .with_costs(1, 2),
        ])
    }
}

/// Job name -> allowed action names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCatalog {
    jobs: BTreeMap<String, Vec<String>>,
}

impl JobCatalog {
    pub fn new(jobs: BTreeMap<String, Vec<String>>) -> Self {
        Self { jobs }
    }

    pub fn actions_for(&self, job: &str) -> Option<&[String]> {
        self.jobs.get(job).map(Vec::as_slice)
    }

    pub fn allows(&self, job: &str, action_name: &str) -> bool {
        self.actions_for(job)
            .is_some_and(|actions| actions.iter().any(|a| a == action_name))
    }

    pub fn with_defaults() -> Self {
        let mut jobs = BTreeMap::new();
        jobs.insert(
            "adventurer".to_string(),
            vec![
                "idle".to_string(),
                "check_guild_board".to_string(),
                "explore".to_string(),
                "gather_herbs".to_string(),
                "fell_trees".to_string(),
                "mine_ore".to_string(),
                "hunt".to_string(),
                "gather".to_string(),
            ],
        );
        jobs.insert(
            "baker".to_string(),
            vec!["idle".to_string(), "bake_bread".to_string()],
        );
        Self { jobs }
    }
}

/// Known item keys and their display names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: BTreeMap<String, String>,
}

impl ItemCatalog {
    pub fn new(items: BTreeMap<String, String>) -> Self {
        Self { items }
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.items.get(key).map_or(key, String::as_str)
    }

    pub fn with_defaults() -> Self {
        let items = [
            ("herb", "Herb"),
            ("wood", "Wood"),
            ("ore", "Ore"),
            ("meat", "Meat"),
            ("supplies", "Supplies"),
            ("bread", "Bread"),
            ("axe", "Axe"),
            ("pickaxe", "Pickaxe"),
            ("bow", "Bow"),
        ];
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Validate that `action_name` belongs to `job` and resolve its definition
///
/// Any job/action mismatch is rejected outright, never substituted with a
/// different action.
pub fn resolve_action_def<'a>(
    jobs: &JobCatalog,
    actions: &'a ActionCatalog,
    job: &str,
    action_name: &str,
) -> Option<&'a ActionDef> {
    if !jobs.allows(job, action_name) {
        return None;
    }
    actions.get(action_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_duration_floor_and_tick_conversion() {
        let short = ActionDef::new("poke", "Poking", 3);
        assert_eq!(short.duration_minutes, MIN_DURATION_MINUTES);
        assert_eq!(short.work_ticks(10), 1);

        let long = ActionDef::new("dig", "Digging", 180);
        assert_eq!(long.work_ticks(10), 18);
        // Coarse ticks still take at least one
        assert_eq!(long.work_ticks(500), 1);
    }

    #[test]
    fn test_output_fixed_and_range_sampling() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(OutputQuantity::Fixed(4).sample(&mut rng), 4);
        for _ in 0..50 {
            let q = OutputQuantity::Range { min: 1, max: 3 }.sample(&mut rng);
            assert!((1..=3).contains(&q));
        }
    }

    #[test]
    fn test_inverted_range_swapped_and_negatives_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let q = OutputQuantity::Range { min: 3, max: 1 }.sample(&mut rng);
            assert!((1..=3).contains(&q));
        }
        for _ in 0..50 {
            let q = OutputQuantity::Range { min: -5, max: 1 }.sample(&mut rng);
            assert!(q <= 1);
        }
    }

    #[test]
    fn test_resolve_rejects_job_mismatch() {
        let jobs = JobCatalog::with_defaults();
        let actions = ActionCatalog::with_defaults();
        assert!(resolve_action_def(&jobs, &actions, "adventurer", "mine_ore").is_some());
        // Bakers do not mine, and unknown jobs get nothing
        assert!(resolve_action_def(&jobs, &actions, "baker", "mine_ore").is_none());
        assert!(resolve_action_def(&jobs, &actions, "smith", "mine_ore").is_none());
        assert!(resolve_action_def(&jobs, &actions, "adventurer", "no_such").is_none());
    }

    #[test]
    fn test_item_catalog_lookup() {
        let items = ItemCatalog::with_defaults();
        assert!(items.is_known("herb"));
        assert!(!items.is_known("moon_dust"));
        assert_eq!(items.display_name("herb"), "Herb");
        assert_eq!(items.display_name("moon_dust"), "moon_dust");
    }
}
