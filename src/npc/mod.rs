//! NPC model: schedule, status gauges, contract state machine, agent record

pub mod contract;
pub mod npc;
pub mod schedule;
pub mod status;

pub use contract::{
    ContractExecuteState, ContractState, NpcContract, BOARD_CHECK_ACTION, IDLE_ACTION,
};
pub use npc::Npc;
pub use schedule::{DailySchedule, ScheduledActivity};
pub use status::NpcStatus;
