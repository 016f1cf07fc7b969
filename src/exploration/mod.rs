//! Exploration knowledge: guild board, per-agent delta buffers, cell intel

pub mod board;
pub mod buffer;
pub mod intel;

pub use board::GuildBoard;
pub use buffer::NpcExplorationBuffer;
pub use intel::{CellIntel, IntelRecord};
