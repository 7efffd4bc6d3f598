//! Guess submission and game creation
//!
//! The engine ties the pure rules in [`crate::core`] to a dictionary. It never
//! touches storage: callers load a game and the owner's statistics, submit a
//! guess, and commit whatever the returned [`Submission`] holds.

mod error;
mod game_engine;

pub use error::{EngineError, GuessError};
pub use game_engine::{GameEngine, Submission, SubmissionOutcome};
