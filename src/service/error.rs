//! Service error types

use crate::core::{GameId, PlayerId};
use crate::engine::{EngineError, GuessError};
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("player {player} is not allowed to access game {game}")]
    NotAuthorised { player: PlayerId, game: GameId },

    #[error("game {0} is still in progress")]
    ActiveGameExists(GameId),

    #[error("player {0} has no current game")]
    NoCurrentGame(PlayerId),

    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
