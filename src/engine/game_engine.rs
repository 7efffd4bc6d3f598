//! Game engine: validates guesses and drives the state machine

use super::{EngineError, GuessError};
use crate::core::{
    Feedback, GameId, GameState, HardModeRule, PlayerId, PlayerStatistics, Word, WordLength,
    hard_mode,
};
use crate::dictionary::WordDictionary;
use rand::RngCore;

/// What happened to a submitted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The guess was scored and appended to the game
    Accepted(Feedback),
    /// The game had already finished; nothing changed
    AlreadyDecided,
}

/// Result of [`GameEngine::submit_guess`]
///
/// `stats` is `Some` only when this guess moved the game into a terminal
/// state. The caller must then commit `game` and `stats` together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub game: GameState,
    pub stats: Option<PlayerStatistics>,
    pub outcome: SubmissionOutcome,
}

impl Submission {
    /// Feedback for the accepted guess
    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        match &self.outcome {
            SubmissionOutcome::Accepted(feedback) => Some(feedback),
            SubmissionOutcome::AlreadyDecided => None,
        }
    }

    /// Whether this submission finished the game
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.stats.is_some()
    }
}

/// Stateless orchestrator over a dictionary
///
/// Holds no game state of its own, so one engine can serve any number of
/// games from any number of threads.
pub struct GameEngine<'a, D: WordDictionary + ?Sized> {
    dictionary: &'a D,
    hard_mode_rule: HardModeRule,
}

impl<'a, D: WordDictionary + ?Sized> GameEngine<'a, D> {
    /// Create an engine enforcing the default hard mode rule
    pub const fn new(dictionary: &'a D) -> Self {
        Self {
            dictionary,
            hard_mode_rule: HardModeRule::ExactPositions,
        }
    }

    /// Use `rule` for games with hard mode enabled
    #[must_use]
    pub fn with_hard_mode_rule(mut self, rule: HardModeRule) -> Self {
        self.hard_mode_rule = rule;
        self
    }

    #[must_use]
    pub const fn hard_mode_rule(&self) -> HardModeRule {
        self.hard_mode_rule
    }

    /// Start a game for `owner` with a chosen target
    ///
    /// # Errors
    /// Returns `EngineError::TargetLength` if `target` is not `word_length`
    /// letters long.
    pub fn create_game(
        &self,
        owner: PlayerId,
        word_length: WordLength,
        hard_mode: bool,
        target: Word,
    ) -> Result<GameState, EngineError> {
        if target.length() != word_length {
            return Err(EngineError::TargetLength {
                expected: word_length,
                actual: target.length(),
            });
        }

        Ok(GameState::new(GameId::new_random(), owner, target, hard_mode))
    }

    /// Start a game for `owner` with a random target from the dictionary
    ///
    /// # Errors
    /// Returns `EngineError::Dictionary` if no word of `word_length` exists.
    pub fn new_game<R: RngCore>(
        &self,
        owner: PlayerId,
        word_length: WordLength,
        hard_mode: bool,
        rng: &mut R,
    ) -> Result<GameState, EngineError> {
        let target = self.dictionary.random_word(word_length, rng)?;
        self.create_game(owner, word_length, hard_mode, target)
    }

    /// Validate and score one guess
    ///
    /// Checks run in order: finished game, length, characters, dictionary,
    /// hard mode. The first failing check decides the error. A finished game
    /// is not an error: the submission comes back `AlreadyDecided` with the
    /// game unchanged and no statistics.
    ///
    /// # Errors
    /// Returns `GuessError` describing the first failed check.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{GameStatus, PlayerId, PlayerStatistics, Word, WordLength};
    /// use wordle_engine::dictionary::WordList;
    /// use wordle_engine::engine::GameEngine;
    ///
    /// let dictionary = WordList::from_words(["crane", "slate"]);
    /// let engine = GameEngine::new(&dictionary);
    /// let game = engine
    ///     .create_game(PlayerId::new_random(), WordLength::MIN, false, Word::new("crane").unwrap())
    ///     .unwrap();
    ///
    /// let submission = engine
    ///     .submit_guess(&game, &PlayerStatistics::default(), " CRANE ")
    ///     .unwrap();
    /// assert_eq!(submission.game.status(), GameStatus::Won);
    /// assert_eq!(submission.stats.unwrap().games_won(), 1);
    /// ```
    pub fn submit_guess(
        &self,
        game: &GameState,
        stats: &PlayerStatistics,
        raw_guess: &str,
    ) -> Result<Submission, GuessError> {
        if game.is_terminal() {
            return Ok(Submission {
                game: game.clone(),
                stats: None,
                outcome: SubmissionOutcome::AlreadyDecided,
            });
        }

        let guess = self.parse_guess(game, raw_guess)?;

        if game.hard_mode()
            && let Some((previous_guess, previous_feedback)) = game.last_turn()
        {
            hard_mode::validate_with(
                self.hard_mode_rule,
                &guess,
                previous_guess,
                previous_feedback,
            )?;
        }

        let feedback = Feedback::evaluate(&guess, game.target());
        let mut next = game.clone();
        let status = next.record_guess(guess, feedback.clone());

        Ok(Submission {
            game: next,
            stats: status.outcome().map(|outcome| stats.apply(outcome)),
            outcome: SubmissionOutcome::Accepted(feedback),
        })
    }

    /// Normalize the raw guess and run the structural and dictionary checks
    fn parse_guess(&self, game: &GameState, raw_guess: &str) -> Result<Word, GuessError> {
        let normalized = raw_guess.trim().to_lowercase();
        let expected = game.word_length();
        let actual = normalized.chars().count();

        if actual != expected.get() {
            return Err(GuessError::InvalidLength { expected, actual });
        }

        let guess = Word::new(normalized).map_err(|_| GuessError::InvalidCharacters)?;

        if !self.dictionary.contains(expected, &guess) {
            return Err(GuessError::NotInDictionary(guess.to_string()));
        }

        Ok(guess)
    }
}
