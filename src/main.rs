//! Headless simulation runner
//!
//! Runs a seeded village for a number of ticks and prints the per-tick
//! log lines plus a final summary. World and rules files are optional;
//! without them a built-in demo village is used.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hearthvale::actions::load_rules;
use hearthvale::core::config::SimulationConfig;
use hearthvale::core::error::Result;
use hearthvale::core::types::Coordinate;
use hearthvale::simulation::{report, run_simulation_tick, VillageWorld};
use hearthvale::world::{Entity, LevelRegion, ResourceEntity, StationEntity, WorldSnapshot};

#[derive(Parser, Debug)]
#[command(name = "hearthvale", about = "Headless village coordination simulation")]
struct Args {
    /// RNG seed; the same seed replays the same run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (one tick is 10 village minutes)
    #[arg(long, default_value_t = 288)]
    ticks: u64,

    /// World snapshot JSON; the demo village is used when omitted
    #[arg(long)]
    world: Option<PathBuf>,

    /// Rules TOML with action definitions, jobs, and items
    #[arg(long)]
    actions: Option<PathBuf>,
}

fn demo_snapshot() -> WorldSnapshot {
    WorldSnapshot {
        width: 16,
        height: 12,
        blocked: vec![
            Coordinate::new(7, 3),
            Coordinate::new(7, 4),
            Coordinate::new(7, 5),
            Coordinate::new(7, 6),
        ],
        entities: vec![
            Entity::Workbench(StationEntity::new(
                "bakery",
                "Village Bakery",
                Coordinate::new(2, 2),
                0,
                10,
                10,
            )),
            Entity::Resource(
                ResourceEntity::new("herb", "Herb Patch", Coordinate::new(4, 4), 20, 12)
                    .discovered(),
            ),
            Entity::Resource(ResourceEntity::new(
                "herb",
                "Wild Herbs",
                Coordinate::new(12, 8),
                20,
                20,
            )),
            Entity::Resource(
                ResourceEntity::new("tree_oak", "Oak Stand", Coordinate::new(3, 9), 30, 30)
                    .discovered(),
            ),
            Entity::Resource(ResourceEntity::new(
                "ore_iron",
                "Iron Vein",
                Coordinate::new(14, 2),
                15,
                15,
            )),
        ],
        regions: vec![LevelRegion {
            name: "town".into(),
            origin: Coordinate::new(0, 0),
            width: 5,
            height: 5,
        }],
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let snapshot = match &args.world {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => demo_snapshot(),
    };
    let mut world = VillageWorld::from_snapshot(&snapshot, args.seed, SimulationConfig::default())?;

    if let Some(path) = &args.actions {
        let (actions, jobs, items) = load_rules(path)?;
        world.actions = actions;
        world.jobs = jobs;
        world.items = items;
    }

    world.add_npc("Wren", "adventurer", Coordinate::new(1, 1));
    world.add_npc("Bram", "adventurer", Coordinate::new(3, 1));
    world.add_npc("Oda", "baker", Coordinate::new(2, 3));

    let target_stock: BTreeMap<String, u32> = [
        ("herb".to_string(), 8),
        ("tree_oak".to_string(), 6),
        ("ore_iron".to_string(), 4),
    ]
    .into_iter()
    .collect();
    let target_available: BTreeMap<String, u32> =
        [("herb".to_string(), 20), ("ore_iron".to_string(), 10)]
            .into_iter()
            .collect();
    world.set_targets(target_stock, target_available);
    world.recompute_orders();

    tracing::info!(seed = args.seed, ticks = args.ticks, "starting simulation");
    for _ in 0..args.ticks {
        let lines = run_simulation_tick(&mut world);
        for line in lines {
            println!("[tick {:>4}] {}", world.tick, line);
        }
    }

    let summary = report(&world);
    println!();
    println!(
        "After {} ticks (day hour {}): {} cells known, {} orders outstanding",
        summary.tick, summary.hour, summary.known_cells, summary.outstanding_orders
    );
    for (key, amount) in &summary.stocks {
        println!("  guild stock: {} x{}", key, amount);
    }
    for npc in &summary.npcs {
        println!(
            "  {} ({}) at ({}, {}) hunger {} fatigue {}",
            npc.name, npc.job, npc.position.x, npc.position.y, npc.hunger, npc.fatigue
        );
    }
    Ok(())
}
