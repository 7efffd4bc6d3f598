//! Core domain types for Wordle
//!
//! This module contains the fundamental domain types and the pure rules of
//! the game. Nothing here performs I/O or logs.

mod feedback;
mod game;
pub mod hard_mode;
mod player;
mod stats;
mod word;

pub use feedback::{Classification, Feedback};
pub use game::{GameId, GameState, GameStateError, GameStatus, Outcome};
pub use hard_mode::{HardModeRule, HardModeViolation, Requirement};
pub use player::{Player, PlayerId};
pub use stats::PlayerStatistics;
pub use word::{Word, WordError, WordLength};
