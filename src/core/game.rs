//! Game state and its transition rules
//!
//! A game starts `InProgress` and ends `Won` or `Lost`. Only accepted guesses
//! move it forward; once terminal it never changes again.

use super::{Feedback, PlayerId, Word, WordLength};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Opaque game identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Fresh random identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Lifecycle status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// How the game ended, `None` while still in progress
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::InProgress => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Won => write!(f, "WON"),
            Self::Lost => write!(f, "LOST"),
        }
    }
}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Won,
    Lost,
}

/// One puzzle instance
///
/// Invariants:
/// - `guesses` and `feedback` have the same length and are append-only
/// - while in progress, `attempts_remaining == initial_attempts - guesses.len()`
/// - `Won` means the last feedback is all `Exact`
/// - `Lost` means no attempts remain and the last feedback is not all `Exact`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    id: GameId,
    owner: PlayerId,
    target: Word,
    word_length: WordLength,
    hard_mode: bool,
    attempts_remaining: u8,
    status: GameStatus,
    guesses: Vec<Word>,
    feedback: Vec<Feedback>,
}

impl GameState {
    pub(crate) fn new(id: GameId, owner: PlayerId, target: Word, hard_mode: bool) -> Self {
        let word_length = target.length();
        Self {
            id,
            owner,
            target,
            word_length,
            hard_mode,
            attempts_remaining: word_length.initial_attempts(),
            status: GameStatus::InProgress,
            guesses: Vec::new(),
            feedback: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    /// The secret word; callers must not reveal it while the game is in progress
    #[must_use]
    pub const fn target(&self) -> &Word {
        &self.target
    }

    #[must_use]
    pub const fn word_length(&self) -> WordLength {
        self.word_length
    }

    #[must_use]
    pub const fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    #[must_use]
    pub const fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    #[must_use]
    pub const fn initial_attempts(&self) -> u8 {
        self.word_length.initial_attempts()
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    #[must_use]
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    /// Whether no further guesses can be accepted
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal() || self.attempts_remaining == 0
    }

    /// Guesses paired with their feedback, oldest first
    pub fn turns(&self) -> impl Iterator<Item = (&Word, &Feedback)> {
        self.guesses.iter().zip(&self.feedback)
    }

    /// The most recent guess and its feedback
    #[must_use]
    pub fn last_turn(&self) -> Option<(&Word, &Feedback)> {
        self.guesses.last().zip(self.feedback.last())
    }

    /// Apply one accepted guess and return the new status
    ///
    /// A solved guess wins without spending an attempt; any other guess
    /// spends one and loses the game when none are left. The guess is
    /// recorded in both cases.
    pub(crate) fn record_guess(&mut self, guess: Word, feedback: Feedback) -> GameStatus {
        debug_assert!(!self.is_terminal(), "guess recorded on a finished game");
        debug_assert_eq!(guess.length(), self.word_length);

        if feedback.is_solved() {
            self.status = GameStatus::Won;
        } else {
            self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            if self.attempts_remaining == 0 {
                self.status = GameStatus::Lost;
            }
        }

        self.guesses.push(guess);
        self.feedback.push(feedback);
        self.status
    }
}

/// A stored game record that breaks one of the `GameState` invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameStateError {
    #[error("target has {actual} letters but the game expects {expected}")]
    TargetLength {
        expected: WordLength,
        actual: WordLength,
    },

    #[error("{guesses} guesses recorded with {feedback} feedback rows")]
    UnpairedHistory { guesses: usize, feedback: usize },

    #[error("turn {turn} has {actual} letters but the game expects {expected}")]
    TurnLength {
        turn: usize,
        expected: WordLength,
        actual: usize,
    },

    #[error("{status} game with {attempts} attempts left after {guesses} guesses")]
    Inconsistent {
        status: GameStatus,
        attempts: u8,
        guesses: usize,
    },
}

/// Stored form of `GameState`, checked before use
#[derive(Deserialize)]
struct RawGameState {
    id: GameId,
    owner: PlayerId,
    target: Word,
    word_length: WordLength,
    hard_mode: bool,
    attempts_remaining: u8,
    status: GameStatus,
    guesses: Vec<Word>,
    feedback: Vec<Feedback>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameStateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let expected = raw.word_length;
        if raw.target.length() != expected {
            return Err(GameStateError::TargetLength {
                expected,
                actual: raw.target.length(),
            });
        }
        if raw.guesses.len() != raw.feedback.len() {
            return Err(GameStateError::UnpairedHistory {
                guesses: raw.guesses.len(),
                feedback: raw.feedback.len(),
            });
        }

        for (index, (guess, feedback)) in raw.guesses.iter().zip(&raw.feedback).enumerate() {
            let actual = if guess.length() == expected {
                feedback.len()
            } else {
                guess.length().get()
            };
            if actual != expected.get() {
                return Err(GameStateError::TurnLength {
                    turn: index + 1,
                    expected,
                    actual,
                });
            }
        }

        // Only the final turn may be solved, and only a win ends on one
        let initial = usize::from(expected.initial_attempts());
        let misses = raw.feedback.iter().filter(|f| !f.is_solved()).count();
        let solved = raw.feedback.len() - misses;
        let ends_solved = raw.feedback.last().is_some_and(Feedback::is_solved);
        let consistent = usize::from(raw.attempts_remaining) + misses == initial
            && match raw.status {
                GameStatus::InProgress => solved == 0 && misses < initial,
                GameStatus::Won => solved == 1 && ends_solved,
                GameStatus::Lost => solved == 0 && misses == initial,
            };
        if !consistent {
            return Err(GameStateError::Inconsistent {
                status: raw.status,
                attempts: raw.attempts_remaining,
                guesses: raw.guesses.len(),
            });
        }

        Ok(Self {
            id: raw.id,
            owner: raw.owner,
            target: raw.target,
            word_length: raw.word_length,
            hard_mode: raw.hard_mode,
            attempts_remaining: raw.attempts_remaining,
            status: raw.status,
            guesses: raw.guesses,
            feedback: raw.feedback,
        })
    }
}
