//! Hearthvale - a village coordination engine
//!
//! Simulates a persistent village of autonomous NPCs on a tile grid:
//! multi-target wavefront pathfinding, a guild board that distributes
//! exploration knowledge between agents, a supply/demand dispatcher that
//! turns global resource targets into work orders, and a per-agent
//! contract state machine that executes those orders as ticked,
//! interruptible, tool-gated actions.
//!
//! The engine is single-threaded and tick-driven; for a fixed seed and
//! NPC order a run is fully replayable.

pub mod actions;
pub mod core;
pub mod exploration;
pub mod grid;
pub mod guild;
pub mod npc;
pub mod simulation;
pub mod world;
