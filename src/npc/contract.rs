//! Per-agent contract state machine
//!
//! Glues dispatcher output to execution. The outer state tracks where the
//! agent is in the order lifecycle; `Executing` carries a nested sub-state
//! for movement versus action performance. Every transition resets
//! `work_path_initialized` so the movement layer recomputes its path
//! instead of reusing a stale one.

use serde::{Deserialize, Serialize};

use crate::core::types::{Coordinate, OrderId};

/// Default action used while an agent has nothing assigned
pub const IDLE_ACTION: &str = "idle";

/// Action name that routes an agent to the guild board to re-poll
pub const BOARD_CHECK_ACTION: &str = "check_guild_board";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractState {
    NoContract,
    GoBoard,
    AcquireOrder,
    Executing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractExecuteState {
    Idle,
    MoveToWorksite,
    PerformAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcContract {
    pub state: ContractState,
    pub execute_state: ContractExecuteState,
    pub assigned_order_id: Option<OrderId>,
    pub current_action: Option<String>,
    pub current_action_display: String,
    pub ticks_remaining: u32,
    pub path: Vec<Coordinate>,
    pub work_path_initialized: bool,
}

impl Default for NpcContract {
    fn default() -> Self {
        Self {
            state: ContractState::NoContract,
            execute_state: ContractExecuteState::Idle,
            assigned_order_id: None,
            current_action: None,
            current_action_display: String::new(),
            ticks_remaining: 0,
            path: Vec::new(),
            work_path_initialized: false,
        }
    }
}

impl NpcContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// No order assigned: fall back to a 1-tick idle placeholder
    pub fn idle_placeholder(&mut self) {
        self.state = ContractState::NoContract;
        self.execute_state = ContractExecuteState::Idle;
        self.assigned_order_id = None;
        self.current_action = Some(IDLE_ACTION.to_string());
        self.current_action_display = "Idling".to_string();
        self.ticks_remaining = 1;
        self.work_path_initialized = false;
    }

    /// No order available but a board-check action exists: go re-poll
    pub fn route_to_board(&mut self) {
        self.state = ContractState::GoBoard;
        self.execute_state = ContractExecuteState::Idle;
        self.current_action = Some(BOARD_CHECK_ACTION.to_string());
        self.current_action_display = "Checking the guild board".to_string();
        self.ticks_remaining = 1;
        self.work_path_initialized = false;
    }

    /// At the board, waiting for the dispatcher's next order list
    pub fn start_acquiring(&mut self) {
        self.state = ContractState::AcquireOrder;
        self.execute_state = ContractExecuteState::Idle;
        self.work_path_initialized = false;
    }

    /// Order assigned (fresh or resumed): begin executing
    ///
    /// Clears any previous path so movement is recomputed from scratch.
    pub fn accept_order(
        &mut self,
        order_id: OrderId,
        action_name: impl Into<String>,
        display: impl Into<String>,
        work_ticks: u32,
    ) {
        self.state = ContractState::Executing;
        self.execute_state = ContractExecuteState::MoveToWorksite;
        self.assigned_order_id = Some(order_id);
        self.current_action = Some(action_name.into());
        self.current_action_display = display.into();
        self.ticks_remaining = work_ticks;
        self.path.clear();
        self.work_path_initialized = false;
    }

    /// Movement finished: switch to performing the action in place
    pub fn arrive_at_worksite(&mut self) {
        self.execute_state = ContractExecuteState::PerformAction;
        self.path.clear();
        self.work_path_initialized = false;
    }

    /// Order fulfilled or abandoned: release everything
    pub fn release(&mut self) {
        *self = Self::default();
    }

    pub fn is_executing(&self) -> bool {
        self.state == ContractState::Executing
    }
}
