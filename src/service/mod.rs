//! Player-facing operations
//!
//! The service loads records, runs the engine and commits the result. A player
//! may only act on the game their record points to; starting a game moves the
//! pointer, deleting one clears it.

mod error;
mod game_service;
mod view;

pub use error::ServiceError;
pub use game_service::GameService;
pub use view::{GameView, GuessReport};
