//! Record tables shared by the storage implementations
//!
//! `apply` checks every write of a batch before touching anything, so a batch
//! either lands completely or not at all.

use super::error::Result;
use super::{RecordKey, StorageError, Versioned, Write, WriteBatch};
use crate::core::{GameId, GameState, Player, PlayerId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    games: FxHashMap<GameId, Versioned<GameState>>,
    players: FxHashMap<PlayerId, Versioned<Player>>,
}

/// On-disk image of the tables
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    games: Vec<Versioned<GameState>>,
    players: Vec<Versioned<Player>>,
}

impl Tables {
    pub(crate) fn game(&self, id: GameId) -> Result<Versioned<GameState>> {
        self.games
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(RecordKey::Game(id)))
    }

    pub(crate) fn player(&self, id: PlayerId) -> Result<Versioned<Player>> {
        self.players
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(RecordKey::Player(id)))
    }

    fn version(&self, key: RecordKey) -> Option<u64> {
        match key {
            RecordKey::Game(id) => self.games.get(&id).map(|r| r.version),
            RecordKey::Player(id) => self.players.get(&id).map(|r| r.version),
        }
    }

    /// Validate every write, then apply them in order
    pub(crate) fn apply(&mut self, batch: WriteBatch) -> Result<()> {
        let mut seen = FxHashSet::default();
        for write in batch.writes() {
            let key = write.key();
            if !seen.insert(key) {
                return Err(StorageError::DuplicateWrite(key));
            }
            self.check(key, write.expected())?;
        }

        for write in batch {
            match write {
                Write::PutGame { game, expected } => {
                    let version = next_version(expected);
                    self.games.insert(game.id(), Versioned::new(game, version));
                }
                Write::DeleteGame { id, .. } => {
                    self.games.remove(&id);
                }
                Write::PutPlayer { player, expected } => {
                    let version = next_version(expected);
                    self.players.insert(player.id, Versioned::new(player, version));
                }
            }
        }

        Ok(())
    }

    fn check(&self, key: RecordKey, expected: Option<u64>) -> Result<()> {
        match (expected, self.version(key)) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(StorageError::AlreadyExists(key)),
            (Some(expected), Some(found)) if expected == found => Ok(()),
            (Some(expected), found) => Err(StorageError::Conflict {
                key,
                expected,
                found,
            }),
        }
    }

    pub(crate) fn to_snapshot(&self) -> Snapshot {
        let mut games: Vec<_> = self.games.values().cloned().collect();
        let mut players: Vec<_> = self.players.values().cloned().collect();
        // Stable file contents across runs
        games.sort_by_key(|r| r.record.id());
        players.sort_by_key(|r| r.record.id);
        Snapshot { games, players }
    }

    pub(crate) fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            games: snapshot
                .games
                .into_iter()
                .map(|r| (r.record.id(), r))
                .collect(),
            players: snapshot
                .players
                .into_iter()
                .map(|r| (r.record.id, r))
                .collect(),
        }
    }
}

const fn next_version(expected: Option<u64>) -> u64 {
    match expected {
        Some(version) => version + 1,
        None => 1,
    }
}
