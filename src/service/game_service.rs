//! Load, run the engine, commit

use super::{GameView, GuessReport, ServiceError};
use crate::core::{GameId, GameState, HardModeRule, Player, PlayerId, Word, WordLength};
use crate::dictionary::WordDictionary;
use crate::engine::{GameEngine, SubmissionOutcome};
use crate::storage::{Storage, StorageError, Versioned, WriteBatch};
use rand::RngCore;

type Result<T> = std::result::Result<T, ServiceError>;

/// Player and game operations over a dictionary and a store
///
/// The service holds no game state between calls. Every operation reads the
/// records it needs and writes them back in one conditional batch, so
/// concurrent callers are serialized by the storage version tokens. A
/// conflicting commit is reported as `StorageError::Conflict` and not retried.
pub struct GameService<D, S> {
    dictionary: D,
    storage: S,
    hard_mode_rule: HardModeRule,
}

impl<D: WordDictionary, S: Storage> GameService<D, S> {
    pub const fn new(dictionary: D, storage: S) -> Self {
        Self {
            dictionary,
            storage,
            hard_mode_rule: HardModeRule::ExactPositions,
        }
    }

    /// Use `rule` for games with hard mode enabled
    #[must_use]
    pub fn with_hard_mode_rule(mut self, rule: HardModeRule) -> Self {
        self.hard_mode_rule = rule;
        self
    }

    pub const fn dictionary(&self) -> &D {
        &self.dictionary
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn engine(&self) -> GameEngine<'_, D> {
        GameEngine::new(&self.dictionary).with_hard_mode_rule(self.hard_mode_rule)
    }

    /// Register a new player with empty statistics
    ///
    /// # Errors
    /// Returns a storage error if the record cannot be written.
    pub fn create_player(&self) -> Result<Player> {
        let player = Player::new(PlayerId::new_random());
        self.storage
            .commit(WriteBatch::new().put_player(player.clone(), None))?;

        tracing::info!("Created player {}", player.id);
        Ok(player)
    }

    /// Look up a player
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` for unknown players.
    pub fn player(&self, id: PlayerId) -> Result<Player> {
        Ok(self.storage.load_player(id)?.record)
    }

    /// Start a game with a random target and make it the player's current game
    ///
    /// # Errors
    /// - `ActiveGameExists` if the current game is still in progress
    /// - `Engine` if the dictionary has no word of `word_length`
    /// - `Storage` on load or commit failure
    pub fn start_game<R: RngCore>(
        &self,
        player: PlayerId,
        word_length: WordLength,
        hard_mode: bool,
        rng: &mut R,
    ) -> Result<GameView> {
        let player = self.storage.load_player(player)?;
        let previous = self.finished_previous_game(&player.record)?;
        let game = self
            .engine()
            .new_game(player.record.id, word_length, hard_mode, rng)?;
        self.install_game(player, previous, game)
    }

    /// Start a game with a chosen target
    ///
    /// # Errors
    /// Same as [`GameService::start_game`]; the target length must match
    /// `word_length`.
    pub fn start_game_with_target(
        &self,
        player: PlayerId,
        word_length: WordLength,
        hard_mode: bool,
        target: Word,
    ) -> Result<GameView> {
        let player = self.storage.load_player(player)?;
        let previous = self.finished_previous_game(&player.record)?;
        let game = self
            .engine()
            .create_game(player.record.id, word_length, hard_mode, target)?;
        self.install_game(player, previous, game)
    }

    /// The player's current game, if it is still stored, provided it is finished
    fn finished_previous_game(
        &self,
        player: &Player,
    ) -> Result<Option<Versioned<GameState>>> {
        let Some(current) = player.current_game else {
            return Ok(None);
        };

        match self.storage.load_game(current) {
            Ok(game) if game.record.is_terminal() => Ok(Some(game)),
            Ok(_) => Err(ServiceError::ActiveGameExists(current)),
            Err(StorageError::NotFound(_)) => {
                tracing::warn!("Player {} points at missing game {current}", player.id);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Insert `game`, drop the finished previous game and move the pointer, atomically
    fn install_game(
        &self,
        player: Versioned<Player>,
        previous: Option<Versioned<GameState>>,
        game: GameState,
    ) -> Result<GameView> {
        let view = GameView::from(&game);
        let mut updated = player.record;
        updated.current_game = Some(game.id());

        let mut batch = WriteBatch::new().put_game(game, None);
        if let Some(previous) = &previous {
            batch = batch.delete_game(previous.record.id(), previous.version);
        }
        batch = batch.put_player(updated, Some(player.version));
        self.storage.commit(batch)?;

        tracing::info!(
            "Player {} started game {} ({} letters, hard mode {})",
            view.owner,
            view.id,
            view.word_length,
            if view.hard_mode { "on" } else { "off" }
        );
        Ok(view)
    }

    /// Look up one of the player's games
    ///
    /// # Errors
    /// Returns `NotAuthorised` unless `game` is the player's current game.
    pub fn game(&self, player: PlayerId, game: GameId) -> Result<GameView> {
        let (_, game) = self.authorize(player, game)?;
        Ok(GameView::from(&game.record))
    }

    /// The game the player's record currently points to
    ///
    /// # Errors
    /// Returns `NoCurrentGame` if the player has none.
    pub fn current_game(&self, player: PlayerId) -> Result<GameView> {
        let record = self.storage.load_player(player)?.record;
        let game = record
            .current_game
            .ok_or(ServiceError::NoCurrentGame(player))?;
        self.game(player, game)
    }

    /// Submit a guess on the player's current game
    ///
    /// Non-final guesses write only the game. The guess that finishes the game
    /// writes the game and the player's statistics in one batch. A guess on a
    /// finished game writes nothing.
    ///
    /// # Errors
    /// - `NotAuthorised` if `game` is not the player's current game
    /// - `Guess` if the engine rejected the guess; nothing is written
    /// - `Storage` on load failure or a conflicting commit
    pub fn guess(&self, player: PlayerId, game: GameId, raw_guess: &str) -> Result<GuessReport> {
        let (player, game) = self.authorize(player, game)?;

        let submission = self
            .engine()
            .submit_guess(&game.record, &player.record.stats, raw_guess)
            .inspect_err(|err| {
                tracing::debug!(
                    "Rejected guess '{}' on game {}: {err}",
                    raw_guess.trim(),
                    game.record.id()
                );
            })?;

        match (&submission.outcome, submission.stats) {
            (SubmissionOutcome::AlreadyDecided, _) => {
                tracing::debug!("Game {} already decided, ignoring guess", game.record.id());
            }
            (SubmissionOutcome::Accepted(_), Some(stats)) => {
                self.storage.commit_game_and_stats(
                    Versioned::new(submission.game.clone(), game.version),
                    player,
                    stats,
                )?;
                tracing::info!(
                    "Game {} finished: {} after {} guesses",
                    submission.game.id(),
                    submission.game.status(),
                    submission.game.guesses().len()
                );
            }
            (SubmissionOutcome::Accepted(feedback), None) => {
                self.storage.commit(
                    WriteBatch::new().put_game(submission.game.clone(), Some(game.version)),
                )?;
                tracing::debug!(
                    "Game {} accepted guess: {feedback} ({} attempts left)",
                    submission.game.id(),
                    submission.game.attempts_remaining()
                );
            }
        }

        Ok(GuessReport::new(
            &submission.game,
            submission.outcome,
            submission.stats,
        ))
    }

    /// Delete the player's current game and clear the pointer
    ///
    /// # Errors
    /// Returns `NotAuthorised` unless `game` is the player's current game.
    pub fn delete_game(&self, player: PlayerId, game: GameId) -> Result<()> {
        let (player, game) = self.authorize(player, game)?;

        let mut updated = player.record;
        updated.current_game = None;
        self.storage.commit(
            WriteBatch::new()
                .delete_game(game.record.id(), game.version)
                .put_player(updated, Some(player.version)),
        )?;

        tracing::info!("Deleted game {}", game.record.id());
        Ok(())
    }

    /// Load the player and game, checking that the player may act on it
    fn authorize(
        &self,
        player: PlayerId,
        game: GameId,
    ) -> Result<(Versioned<Player>, Versioned<GameState>)> {
        let player = self.storage.load_player(player)?;
        if !player.record.owns(game) {
            tracing::warn!("Player {} denied access to game {game}", player.record.id);
            return Err(ServiceError::NotAuthorised {
                player: player.record.id,
                game,
            });
        }

        let loaded = self.storage.load_game(game)?;
        if loaded.record.owner() != player.record.id {
            return Err(ServiceError::NotAuthorised {
                player: player.record.id,
                game,
            });
        }

        Ok((player, loaded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameStatus, PlayerStatistics};
    use crate::dictionary::WordList;
    use crate::engine::GuessError;
    use crate::storage::InMemoryStorage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn service() -> GameService<WordList, InMemoryStorage> {
        GameService::new(
            WordList::from_words([
                "brave", "chimp", "chirp", "chomp", "crane", "slate", "trace",
            ]),
            InMemoryStorage::new(),
        )
    }

    fn start(
        service: &GameService<WordList, InMemoryStorage>,
        player: PlayerId,
        target: &str,
    ) -> GameView {
        service
            .start_game_with_target(player, WordLength::MIN, false, Word::new(target).unwrap())
            .unwrap()
    }

    #[test]
    fn create_player_persists_empty_record() {
        let service = service();
        let player = service.create_player().unwrap();

        assert_eq!(service.player(player.id).unwrap(), player);
        assert_eq!(player.stats, PlayerStatistics::default());
        assert_eq!(player.current_game, None);
    }

    #[test]
    fn start_game_sets_pointer_and_hides_target() {
        let service = service();
        let player = service.create_player().unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let view = service
            .start_game(player.id, WordLength::MIN, true, &mut rng)
            .unwrap();

        assert_eq!(view.status, GameStatus::InProgress);
        assert_eq!(view.attempts_remaining, 6);
        assert_eq!(view.target, None);
        assert_eq!(service.player(player.id).unwrap().current_game, Some(view.id));
        assert_eq!(service.current_game(player.id).unwrap(), view);
    }

    #[test]
    fn cannot_start_while_a_game_is_in_progress() {
        let service = service();
        let player = service.create_player().unwrap();
        let first = start(&service, player.id, "crane");

        let result = service.start_game_with_target(
            player.id,
            WordLength::MIN,
            false,
            Word::new("slate").unwrap(),
        );
        assert!(matches!(result, Err(ServiceError::ActiveGameExists(id)) if id == first.id));
    }

    #[test]
    fn finished_game_is_replaced_by_the_next_one() {
        let service = service();
        let player = service.create_player().unwrap();
        let first = start(&service, player.id, "crane");
        service.guess(player.id, first.id, "crane").unwrap();

        let second = start(&service, player.id, "slate");

        assert_ne!(first.id, second.id);
        assert!(matches!(
            service.storage().load_game(first.id),
            Err(StorageError::NotFound(_))
        ));
        assert_eq!(service.player(player.id).unwrap().current_game, Some(second.id));
    }

    #[test]
    fn other_players_cannot_touch_a_game() {
        let service = service();
        let owner = service.create_player().unwrap();
        let intruder = service.create_player().unwrap();
        let game = start(&service, owner.id, "crane");

        assert!(matches!(
            service.game(intruder.id, game.id),
            Err(ServiceError::NotAuthorised { .. })
        ));
        assert!(matches!(
            service.guess(intruder.id, game.id, "slate"),
            Err(ServiceError::NotAuthorised { .. })
        ));
        assert!(matches!(
            service.delete_game(intruder.id, game.id),
            Err(ServiceError::NotAuthorised { .. })
        ));
        assert!(service.game(owner.id, game.id).unwrap().guesses.is_empty());
    }

    #[test]
    fn winning_guess_commits_game_and_stats_together() {
        let service = service();
        let player = service.create_player().unwrap();
        let game = start(&service, player.id, "crane");

        let report = service.guess(player.id, game.id, "slate").unwrap();
        assert_eq!(report.stats, None);
        assert_eq!(report.game.attempts_remaining, 5);

        let report = service.guess(player.id, game.id, "CRANE").unwrap();
        assert_eq!(report.game.status, GameStatus::Won);
        assert_eq!(report.game.target.as_ref().map(Word::text), Some("crane"));

        let stored = service.player(player.id).unwrap().stats;
        assert_eq!(report.stats, Some(stored));
        assert_eq!(stored.games_won(), 1);
        assert_eq!(stored.current_streak(), 1);
    }

    #[test]
    fn losing_the_game_resets_the_streak() {
        let service = service();
        let player = service.create_player().unwrap();

        let won = start(&service, player.id, "crane");
        service.guess(player.id, won.id, "crane").unwrap();

        let lost = start(&service, player.id, "crane");
        let mut report = None;
        for _ in 0..6 {
            report = Some(service.guess(player.id, lost.id, "slate").unwrap());
        }

        let report = report.unwrap();
        assert_eq!(report.game.status, GameStatus::Lost);
        assert_eq!(report.game.attempts_remaining, 0);

        let stats = service.player(player.id).unwrap().stats;
        assert_eq!(stats.games_played(), 2);
        assert_eq!(stats.games_won(), 1);
        assert_eq!(stats.current_streak(), 0);
        assert_eq!(stats.longest_streak(), 1);
    }

    #[test]
    fn guesses_after_the_end_change_nothing() {
        let service = service();
        let player = service.create_player().unwrap();
        let game = start(&service, player.id, "crane");
        service.guess(player.id, game.id, "crane").unwrap();

        let game_version = service.storage().load_game(game.id).unwrap().version;
        let player_version = service.storage().load_player(player.id).unwrap().version;

        let report = service.guess(player.id, game.id, "slate").unwrap();
        assert!(report.already_decided());
        assert_eq!(report.stats, None);
        assert_eq!(report.game.guesses.len(), 1);

        assert_eq!(service.storage().load_game(game.id).unwrap().version, game_version);
        assert_eq!(
            service.storage().load_player(player.id).unwrap().version,
            player_version
        );
        assert_eq!(service.player(player.id).unwrap().stats.games_played(), 1);
    }

    #[test]
    fn rejected_guess_is_not_stored() {
        let service = service();
        let player = service.create_player().unwrap();
        let game = start(&service, player.id, "crane");

        assert!(matches!(
            service.guess(player.id, game.id, "zzzzz"),
            Err(ServiceError::Guess(GuessError::NotInDictionary(_)))
        ));
        assert_eq!(service.storage().load_game(game.id).unwrap().version, 1);
        assert!(service.game(player.id, game.id).unwrap().guesses.is_empty());
    }

    #[test]
    fn strict_rule_reaches_the_engine() {
        let service = service().with_hard_mode_rule(HardModeRule::Strict);
        let player = service.create_player().unwrap();
        let game = service
            .start_game_with_target(player.id, WordLength::MIN, true, Word::new("trace").unwrap())
            .unwrap();

        service.guess(player.id, game.id, "crane").unwrap();
        // Keeps R, A and E in place but drops the revealed C
        assert!(matches!(
            service.guess(player.id, game.id, "brave"),
            Err(ServiceError::Guess(GuessError::HardMode(_)))
        ));
    }

    #[test]
    fn delete_game_clears_pointer() {
        let service = service();
        let player = service.create_player().unwrap();
        let game = start(&service, player.id, "crane");

        service.delete_game(player.id, game.id).unwrap();

        assert_eq!(service.player(player.id).unwrap().current_game, None);
        assert!(matches!(
            service.current_game(player.id),
            Err(ServiceError::NoCurrentGame(_))
        ));
        assert!(matches!(
            service.game(player.id, game.id),
            Err(ServiceError::NotAuthorised { .. })
        ));

        // Pointer is clear, so a new game can start straight away
        start(&service, player.id, "slate");
    }

    #[test]
    fn unknown_player_is_not_found() {
        let service = service();
        assert!(matches!(
            service.player(PlayerId::new_random()),
            Err(ServiceError::Storage(StorageError::NotFound(_)))
        ));
    }
}
