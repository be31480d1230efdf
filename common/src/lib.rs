//! A knowledge-based minesweeper player.
//!
//! The player keeps sentences of the form "exactly N of these cells are
//! mines", one per probed cell, and derives new ones by subset elimination
//! until no further cell can be proven safe or a mine.

pub mod ai;
pub mod autoplay;
pub mod board;
pub mod cell;
pub mod error;
pub mod sentence;

#[cfg(test)]
mod oracle;

pub use ai::MinesweeperAi;
pub use autoplay::{Autoplay, GameState, MoveKind, Turn};
pub use board::Minesweeper;
pub use cell::Cell;
pub use error::KnowledgeError;
pub use sentence::Sentence;
