//! Stored record wrappers

use crate::core::{GameId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored record together with its concurrency token
///
/// `version` starts at 1 when the record is inserted and increases by one on
/// every successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub record: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub const fn new(record: T, version: u64) -> Self {
        Self { record, version }
    }
}

/// Identifies one stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Game(GameId),
    Player(PlayerId),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game(id) => write!(f, "game {id}"),
            Self::Player(id) => write!(f, "player {id}"),
        }
    }
}
