//! Read models handed back to callers

use crate::core::{
    Feedback, GameId, GameState, GameStatus, PlayerId, PlayerStatistics, Word, WordLength,
};
use crate::engine::SubmissionOutcome;
use serde::Serialize;

/// A game as seen by its player
///
/// The target is withheld until the game is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub id: GameId,
    pub owner: PlayerId,
    pub word_length: WordLength,
    pub hard_mode: bool,
    pub attempts_remaining: u8,
    pub status: GameStatus,
    pub guesses: Vec<Word>,
    pub feedback: Vec<Feedback>,
    pub target: Option<Word>,
}

impl From<&GameState> for GameView {
    fn from(game: &GameState) -> Self {
        Self {
            id: game.id(),
            owner: game.owner(),
            word_length: game.word_length(),
            hard_mode: game.hard_mode(),
            attempts_remaining: game.attempts_remaining(),
            status: game.status(),
            guesses: game.guesses().to_vec(),
            feedback: game.feedback().to_vec(),
            target: game.is_terminal().then(|| game.target().clone()),
        }
    }
}

/// What a guess did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessReport {
    pub game: GameView,
    /// Feedback for this guess, `None` if the game was already decided
    pub feedback: Option<Feedback>,
    /// New statistics when this guess finished the game
    pub stats: Option<PlayerStatistics>,
}

impl GuessReport {
    pub(crate) fn new(
        game: &GameState,
        outcome: SubmissionOutcome,
        stats: Option<PlayerStatistics>,
    ) -> Self {
        let feedback = match outcome {
            SubmissionOutcome::Accepted(feedback) => Some(feedback),
            SubmissionOutcome::AlreadyDecided => None,
        };
        Self {
            game: GameView::from(game),
            feedback,
            stats,
        }
    }

    /// Whether the game had already finished before this guess
    #[must_use]
    pub const fn already_decided(&self) -> bool {
        self.feedback.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_hidden_until_game_ends() {
        let mut game = GameState::new(
            GameId::new_random(),
            PlayerId::new_random(),
            Word::new("crane").unwrap(),
            false,
        );
        assert_eq!(GameView::from(&game).target, None);

        let guess = Word::new("crane").unwrap();
        let feedback = Feedback::evaluate(&guess, game.target());
        game.record_guess(guess, feedback);

        let view = GameView::from(&game);
        assert_eq!(view.status, GameStatus::Won);
        assert_eq!(view.target.unwrap().text(), "crane");
    }

    #[test]
    fn view_serializes_status_and_feedback_as_strings() {
        let game = GameState::new(
            GameId::new_random(),
            PlayerId::new_random(),
            Word::new("crane").unwrap(),
            true,
        );
        let json = serde_json::to_value(GameView::from(&game)).unwrap();

        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["word_length"], 5);
        assert_eq!(json["attempts_remaining"], 6);
        assert!(json["target"].is_null());
    }
}
