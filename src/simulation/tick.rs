//! Per-tick orchestration
//!
//! One call advances the whole village by one tick. NPCs are processed in
//! ascending index order and nothing runs in parallel, so every mutation
//! of shared state (entities, board, stocks) lands in a deterministic
//! order for a fixed seed. The returned strings are advisory log lines
//! for the UI collaborator and are never parsed back in.

use rand::Rng;

use crate::actions::{
    apply_building_side_effects, is_building_key, resolve_action_def, tick_work, WorkOutcome,
};
use crate::core::types::{Coordinate, OrderId};
use crate::exploration::IntelRecord;
use crate::grid::find_path_to_nearest_target;
use crate::guild::GuildIssue;
use crate::npc::{
    ContractExecuteState, ContractState, Npc, ScheduledActivity, BOARD_CHECK_ACTION, IDLE_ACTION,
};
use crate::simulation::world::VillageWorld;

/// Advance the simulation by one tick, returning the tick's log lines
pub fn run_simulation_tick(world: &mut VillageWorld) -> Vec<String> {
    let hour = world.hour();
    let activity = world.schedule.activity_for_hour(hour);
    let mut log = Vec::new();

    // NPCs are detached for the duration of the tick so their handlers can
    // borrow the rest of the world mutably
    let mut npcs = std::mem::take(&mut world.npcs);
    for npc in npcs.iter_mut() {
        match activity {
            ScheduledActivity::Meal => {
                if npc.current_work_action.is_some() {
                    log.push(format!("{} stops working for a meal", npc.name));
                    npc.clear_work();
                }
                npc.status.apply_awake_decay(&world.config);
                npc.status.eat_meal(&world.config);
                log.push(format!("{} has a meal", npc.name));
            }
            ScheduledActivity::Sleep => {
                if npc.current_work_action.is_some() {
                    log.push(format!("{} stops working to sleep", npc.name));
                    npc.clear_work();
                }
                npc.status.sleep_tick(&world.config);
                tracing::debug!(npc = %npc.name, "sleeping");
            }
            ScheduledActivity::Work => {
                npc.status.apply_awake_decay(&world.config);
                if npc.is_adventurer() {
                    advance_contract(world, npc, &mut log);
                } else {
                    villager_work(world, npc, &mut log);
                }
            }
        }
    }
    world.npcs = npcs;

    // Dispatcher sees this tick's consumption, discovery, and banking
    world.recompute_orders();
    world.tick += 1;
    log
}

/// One step of the adventurer contract state machine
fn advance_contract(world: &mut VillageWorld, npc: &mut Npc, log: &mut Vec<String>) {
    match npc.contract.state {
        ContractState::NoContract => assign_contract(world, npc),
        ContractState::GoBoard => {
            npc.contract.ticks_remaining = npc.contract.ticks_remaining.saturating_sub(1);
            if npc.contract.ticks_remaining == 0 {
                npc.contract.start_acquiring();
            }
        }
        ContractState::AcquireOrder => acquire_order(world, npc, log),
        ContractState::Executing => match npc.contract.execute_state {
            ContractExecuteState::MoveToWorksite => move_toward_worksite(world, npc, log),
            ContractExecuteState::PerformAction => perform_order(world, npc, log),
            ContractExecuteState::Idle => npc.contract.idle_placeholder(),
        },
    }
}

/// Entry decision when the agent holds no contract
fn assign_contract(world: &mut VillageWorld, npc: &mut Npc) {
    if let Some(order) = world.claims.get(&npc.id.0).cloned() {
        // Resume an order interrupted by the schedule
        enter_order(world, npc, &order);
    } else if world.jobs.allows(&npc.job, BOARD_CHECK_ACTION) {
        npc.contract.route_to_board();
    } else {
        npc.contract.idle_placeholder();
    }
}

fn acquire_order(world: &mut VillageWorld, npc: &mut Npc, log: &mut Vec<String>) {
    let order = world
        .claims
        .get(&npc.id.0)
        .cloned()
        .or_else(|| world.next_unclaimed_order());
    match order {
        Some(order) => {
            enter_order(world, npc, &order);
            log.push(format!(
                "{} accepts a guild order: {}",
                npc.name, npc.contract.current_action_display
            ));
        }
        None => npc.contract.idle_placeholder(),
    }
}

/// Record the claim and transition into execution
fn enter_order(world: &mut VillageWorld, npc: &mut Npc, order: &GuildIssue) {
    let order_id = world
        .orders
        .iter()
        .position(|o| o == order)
        .map(OrderId)
        .unwrap_or(OrderId(0));
    let (display, ticks) = match world.actions.get(&order.action_name) {
        Some(def) => (
            format!("{} ({} x{})", def.display_name, order.resource_key, order.amount),
            def.work_ticks(world.config.tick_minutes),
        ),
        None => (
            format!("{} ({} x{})", order.action_name, order.resource_key, order.amount),
            1,
        ),
    };
    world.claims.insert(npc.id.0, order.clone());
    npc.contract
        .accept_order(order_id, order.action_name.clone(), display, ticks);
}

/// Drop the claim and fall back to no contract
fn abandon_order(world: &mut VillageWorld, npc: &mut Npc) {
    world.claims.remove(&npc.id.0);
    npc.contract.release();
}

fn move_toward_worksite(world: &mut VillageWorld, npc: &mut Npc, log: &mut Vec<String>) {
    if !npc.contract.work_path_initialized {
        let Some(order) = world.claims.get(&npc.id.0).cloned() else {
            npc.contract.release();
            return;
        };
        let target = if order.is_explore() {
            world.board.choose_next_frontier(&mut world.rng)
        } else {
            world.entities.resolve_target_tile(
                &order.resource_key,
                world.config.discovered_only_availability,
                &mut world.rng,
            )
        };
        let Some(target) = target else {
            // Nowhere to go this tick; the order stays on the board
            abandon_order(world, npc);
            return;
        };
        npc.contract.path = find_path_to_nearest_target(&world.grid, npc.position, &[target]);
        npc.contract.work_path_initialized = true;
        if npc.contract.path.is_empty() {
            if npc.position == target {
                npc.contract.arrive_at_worksite();
            } else {
                log.push(format!("{} cannot reach the worksite", npc.name));
                abandon_order(world, npc);
            }
            return;
        }
    }

    if !npc.contract.path.is_empty() {
        npc.position = npc.contract.path.remove(0);
    }
    if npc.contract.path.is_empty() {
        npc.contract.arrive_at_worksite();
    }
}

fn perform_order(world: &mut VillageWorld, npc: &mut Npc, log: &mut Vec<String>) {
    let Some(order) = world.claims.get(&npc.id.0).cloned() else {
        npc.contract.release();
        return;
    };

    if order.is_explore() {
        perform_exploration(world, npc, log);
        abandon_order(world, npc);
        return;
    }

    let Some(def) =
        resolve_action_def(&world.jobs, &world.actions, &npc.job, &order.action_name)
    else {
        // Job/action mismatch: filtered, never substituted
        tracing::debug!(npc = %npc.name, action = %order.action_name, "rejected mismatched order");
        abandon_order(world, npc);
        return;
    };
    let def = def.clone();

    let outcome = tick_work(
        npc,
        &def,
        &mut world.entities,
        &world.items,
        &world.config,
        &mut world.rng,
    );
    match outcome {
        WorkOutcome::MissingTool { tool } => {
            log.push(format!("{} cannot {}: no {}", npc.name, def.display_name, tool));
        }
        WorkOutcome::EntityUnavailable { key } => {
            log.push(format!("{} finds no {} to work on", npc.name, key));
        }
        WorkOutcome::InProgress => {
            log.push(format!(
                "{} is {} ({} ticks left)",
                npc.name, def.display_name, npc.work_ticks_remaining
            ));
        }
        WorkOutcome::Completed { produced } => {
            for (item, quantity) in &produced {
                npc.remove_item(item, *quantity);
            }
            world.bank_items(&produced);
            finish_building_action(world, &def);
            let summary: Vec<String> = produced
                .iter()
                .map(|(item, quantity)| format!("{} x{}", item, quantity))
                .collect();
            log.push(format!(
                "{} finished {} and banked {}",
                npc.name,
                def.display_name,
                if summary.is_empty() { "nothing".to_string() } else { summary.join(", ") }
            ));
            abandon_order(world, npc);
        }
    }
}

/// Survey around the agent: record known cells and the new frontier rim,
/// try a discovery roll, then merge the delta into the board
fn perform_exploration(world: &mut VillageWorld, npc: &mut Npc, log: &mut Vec<String>) {
    let radius = world.config.observe_radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let cell = Coordinate::new(npc.position.x + dx, npc.position.y + dy);
            if world.grid.in_bounds(&cell) {
                npc.exploration.record_known(cell);
            }
        }
    }
    let observed = npc.exploration.new_known_cells.clone();
    for cell in observed.iter() {
        let borders_unknown = cell.neighbors4().iter().any(|n| {
            world.grid.in_bounds(n) && !world.board.is_known(n) && !observed.contains(n)
        });
        if borders_unknown {
            npc.exploration.record_frontier(*cell);
        }
    }

    if let Some(found) =
        world
            .entities
            .discover_near(npc.position, world.config.discover_radius, &mut world.rng)
    {
        let record = IntelRecord::new(world.tick, npc.name.clone())
            .with_entry("key", found.key.clone())
            .with_entry("quantity", found.current_quantity.to_string());
        npc.exploration.record_resource_intel(found.position, record);
        log.push(format!(
            "{} discovered {} at ({}, {})",
            npc.name, found.name, found.position.x, found.position.y
        ));
    }

    world.board.clear_frontier(&npc.position);
    world.board.apply_npc_buffer(&npc.exploration, &mut world.rng);
    npc.exploration.clear();
    log.push(format!(
        "{} surveyed the area around ({}, {})",
        npc.name, npc.position.x, npc.position.y
    ));
}

/// Uniform random action from the job's allowed set, or continuation of
/// whatever is already in progress
fn villager_work(world: &mut VillageWorld, npc: &mut Npc, log: &mut Vec<String>) {
    let action_name = match &npc.current_work_action {
        Some(name) => name.clone(),
        None => {
            let Some(allowed) = world.jobs.actions_for(&npc.job) else {
                return;
            };
            if allowed.is_empty() {
                return;
            }
            allowed[world.rng.gen_range(0..allowed.len())].clone()
        }
    };
    if action_name == IDLE_ACTION || action_name == BOARD_CHECK_ACTION {
        return;
    }
    let Some(def) = resolve_action_def(&world.jobs, &world.actions, &npc.job, &action_name) else {
        npc.clear_work();
        return;
    };
    let def = def.clone();

    let outcome = tick_work(
        npc,
        &def,
        &mut world.entities,
        &world.items,
        &world.config,
        &mut world.rng,
    );
    match outcome {
        WorkOutcome::MissingTool { tool } => {
            log.push(format!("{} cannot {}: no {}", npc.name, def.display_name, tool));
        }
        WorkOutcome::EntityUnavailable { key } => {
            log.push(format!("{} finds no {} to work on", npc.name, key));
        }
        WorkOutcome::InProgress => {
            log.push(format!(
                "{} is {} ({} ticks left)",
                npc.name, def.display_name, npc.work_ticks_remaining
            ));
        }
        WorkOutcome::Completed { produced } => {
            finish_building_action(world, &def);
            let summary: Vec<String> = produced
                .iter()
                .map(|(item, quantity)| format!("{} x{}", item, quantity))
                .collect();
            log.push(format!(
                "{} finished {} producing {}",
                npc.name,
                def.display_name,
                if summary.is_empty() { "nothing".to_string() } else { summary.join(", ") }
            ));
        }
    }
}

/// Building state advances only for actions tied to a building key
fn finish_building_action(world: &mut VillageWorld, def: &crate::actions::ActionDef) {
    if let Some(key) = &def.required_entity {
        if is_building_key(key) {
            let state = world.buildings.entry(key.clone()).or_default();
            apply_building_side_effects(state, def, &mut world.rng);
        }
    }
}
