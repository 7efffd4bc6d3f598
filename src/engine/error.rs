//! Engine error types

use crate::core::{HardModeViolation, WordLength};
use crate::dictionary::DictionaryError;
use thiserror::Error;

/// Why a guess was rejected
///
/// A rejected guess never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess must be {expected} letters long, got {actual}")]
    InvalidLength { expected: WordLength, actual: usize },

    #[error("guess must contain only letters a-z")]
    InvalidCharacters,

    #[error("'{0}' is not in the word list")]
    NotInDictionary(String),

    #[error(transparent)]
    HardMode(#[from] HardModeViolation),
}

/// Why a game could not be created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("target must be {expected} letters long, got {actual}")]
    TargetLength {
        expected: WordLength,
        actual: WordLength,
    },

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}
