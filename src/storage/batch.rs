//! Conditional write batches

use super::RecordKey;
use crate::core::{GameId, GameState, Player};

/// One conditional write
///
/// `expected` is the version the writer last saw. `None` means the record
/// must not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    PutGame {
        game: GameState,
        expected: Option<u64>,
    },
    DeleteGame {
        id: GameId,
        expected: u64,
    },
    PutPlayer {
        player: Player,
        expected: Option<u64>,
    },
}

impl Write {
    /// The record this write touches
    #[must_use]
    pub fn key(&self) -> RecordKey {
        match self {
            Self::PutGame { game, .. } => RecordKey::Game(game.id()),
            Self::DeleteGame { id, .. } => RecordKey::Game(*id),
            Self::PutPlayer { player, .. } => RecordKey::Player(player.id),
        }
    }

    /// The version this write requires the stored record to have
    #[must_use]
    pub const fn expected(&self) -> Option<u64> {
        match self {
            Self::PutGame { expected, .. } | Self::PutPlayer { expected, .. } => *expected,
            Self::DeleteGame { expected, .. } => Some(*expected),
        }
    }
}

/// Writes applied all-or-nothing by [`super::Storage::commit`]
///
/// # Examples
/// ```
/// use wordle_engine::core::{Player, PlayerId};
/// use wordle_engine::storage::{InMemoryStorage, Storage, WriteBatch};
///
/// let storage = InMemoryStorage::new();
/// let id = PlayerId::new_random();
///
/// storage.commit(WriteBatch::new().put_player(Player::new(id), None)).unwrap();
/// assert_eq!(storage.load_player(id).unwrap().version, 1);
///
/// // Stale token: the whole batch is refused
/// assert!(storage.commit(WriteBatch::new().put_player(Player::new(id), None)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (`expected = None`) or replace a game
    #[must_use]
    pub fn put_game(mut self, game: GameState, expected: Option<u64>) -> Self {
        self.writes.push(Write::PutGame { game, expected });
        self
    }

    #[must_use]
    pub fn delete_game(mut self, id: GameId, expected: u64) -> Self {
        self.writes.push(Write::DeleteGame { id, expected });
        self
    }

    /// Insert (`expected = None`) or replace a player
    #[must_use]
    pub fn put_player(mut self, player: Player, expected: Option<u64>) -> Self {
        self.writes.push(Write::PutPlayer { player, expected });
        self
    }

    #[must_use]
    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

impl IntoIterator for WriteBatch {
    type Item = Write;
    type IntoIter = std::vec::IntoIter<Write>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}
