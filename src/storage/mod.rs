//! Versioned record storage
//!
//! Storage holds two kinds of record: games and players (a player record also
//! carries the player's statistics). Every record has a version token, and
//! all writes go through [`Storage::commit`], which applies a [`WriteBatch`]
//! of conditional writes all-or-nothing. Two submissions racing on the same
//! game both read version `n`; only the first commit to land succeeds, the
//! other sees `StorageError::Conflict`.

mod batch;
mod error;
mod file;
mod memory;
mod record;
mod tables;

pub use batch::{Write, WriteBatch};
pub use error::{Result, StorageError};
pub use file::JsonFileStorage;
pub use memory::InMemoryStorage;
pub use record::{RecordKey, Versioned};

use crate::core::{GameId, GameState, Player, PlayerId, PlayerStatistics};

/// Contract for game and player persistence
pub trait Storage: Send + Sync {
    /// Load a game and its version
    fn load_game(&self, id: GameId) -> Result<Versioned<GameState>>;

    /// Load a player and its version
    fn load_player(&self, id: PlayerId) -> Result<Versioned<Player>>;

    /// Apply every write in `batch`, or none of them
    ///
    /// Fails with `Conflict`, `AlreadyExists` or `DuplicateWrite` without
    /// writing anything if any write's expected version does not match.
    fn commit(&self, batch: WriteBatch) -> Result<()>;

    /// Load a player's statistics
    fn load_stats(&self, player: PlayerId) -> Result<PlayerStatistics> {
        Ok(self.load_player(player)?.record.stats)
    }

    /// Store a finished game together with the owner's new statistics
    ///
    /// `game` and `player` carry the versions they were loaded at.
    fn commit_game_and_stats(
        &self,
        game: Versioned<GameState>,
        player: Versioned<Player>,
        stats: PlayerStatistics,
    ) -> Result<()> {
        let mut updated = player.record;
        updated.stats = stats;
        self.commit(
            WriteBatch::new()
                .put_game(game.record, Some(game.version))
                .put_player(updated, Some(player.version)),
        )
    }
}
