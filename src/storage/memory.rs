//! In-memory storage

use super::error::Result;
use super::tables::Tables;
use super::{Storage, StorageError, Versioned, WriteBatch};
use crate::core::{GameId, GameState, Player, PlayerId};
use std::sync::RwLock;

/// Storage kept in process memory, guarded by one lock
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    tables: RwLock<Tables>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for InMemoryStorage {
    fn load_game(&self, id: GameId) -> Result<Versioned<GameState>> {
        let tables = self.tables.read().map_err(|_| StorageError::LockPoisoned)?;
        tables.game(id)
    }

    fn load_player(&self, id: PlayerId) -> Result<Versioned<Player>> {
        let tables = self.tables.read().map_err(|_| StorageError::LockPoisoned)?;
        tables.player(id)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        tables.apply(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Outcome, PlayerStatistics, Word};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn seeded() -> (InMemoryStorage, PlayerId, GameId) {
        let storage = InMemoryStorage::new();
        let mut player = Player::new(PlayerId::new_random());
        let game = GameState::new(
            GameId::new_random(),
            player.id,
            Word::new("crane").unwrap(),
            false,
        );
        player.current_game = Some(game.id());
        let ids = (player.id, game.id());

        storage
            .commit(
                WriteBatch::new()
                    .put_game(game, None)
                    .put_player(player, None),
            )
            .unwrap();
        (storage, ids.0, ids.1)
    }

    #[test]
    fn load_missing_record_is_not_found() {
        let storage = InMemoryStorage::new();
        assert!(matches!(
            storage.load_game(GameId::new_random()),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.load_stats(PlayerId::new_random()),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn commit_game_and_stats_updates_both() {
        let (storage, player_id, game_id) = seeded();
        let game = storage.load_game(game_id).unwrap();
        let player = storage.load_player(player_id).unwrap();
        let stats = PlayerStatistics::default().apply(Outcome::Won);

        storage
            .commit_game_and_stats(game, player, stats)
            .unwrap();

        assert_eq!(storage.load_stats(player_id).unwrap(), stats);
        assert_eq!(storage.load_game(game_id).unwrap().version, 2);
        assert_eq!(storage.load_player(player_id).unwrap().version, 2);
    }

    #[test]
    fn stale_commit_game_and_stats_changes_nothing() {
        let (storage, player_id, game_id) = seeded();
        let game = storage.load_game(game_id).unwrap();
        let player = storage.load_player(player_id).unwrap();

        // Someone else updates the game first
        storage
            .commit(WriteBatch::new().put_game(game.record.clone(), Some(game.version)))
            .unwrap();

        let stats = PlayerStatistics::default().apply(Outcome::Lost);
        let err = storage
            .commit_game_and_stats(game, player, stats)
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(
            storage.load_stats(player_id).unwrap(),
            PlayerStatistics::default()
        );
        assert_eq!(storage.load_player(player_id).unwrap().version, 1);
    }

    #[test]
    fn racing_writers_on_one_game_have_exactly_one_winner() {
        let (storage, _, game_id) = seeded();
        let snapshot = storage.load_game(game_id).unwrap();
        let committed = AtomicUsize::new(0);
        let conflicts = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let batch = WriteBatch::new()
                        .put_game(snapshot.record.clone(), Some(snapshot.version));
                    match storage.commit(batch) {
                        Ok(()) => committed.fetch_add(1, Ordering::SeqCst),
                        Err(err) => {
                            assert!(err.is_conflict());
                            conflicts.fetch_add(1, Ordering::SeqCst)
                        }
                    };
                });
            }
        });

        assert_eq!(committed.load(Ordering::SeqCst), 1);
        assert_eq!(conflicts.load(Ordering::SeqCst), 7);
        assert_eq!(storage.load_game(game_id).unwrap().version, 2);
    }
}
