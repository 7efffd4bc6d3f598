//! Per-player aggregate statistics

use super::Outcome;
use serde::{Deserialize, Serialize};

/// Aggregate record of a player's finished games
///
/// Only changes through [`PlayerStatistics::apply`], once per finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStatistics {
    games_played: u32,
    games_won: u32,
    current_streak: u32,
    longest_streak: u32,
}

impl PlayerStatistics {
    /// Fold one finished game into the statistics
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{Outcome, PlayerStatistics};
    ///
    /// let stats = PlayerStatistics::default()
    ///     .apply(Outcome::Won)
    ///     .apply(Outcome::Won)
    ///     .apply(Outcome::Lost);
    ///
    /// assert_eq!(stats.games_played(), 3);
    /// assert_eq!(stats.current_streak(), 0);
    /// assert_eq!(stats.longest_streak(), 2);
    /// ```
    #[must_use]
    pub fn apply(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => {
                let current_streak = self.current_streak + 1;
                Self {
                    games_played: self.games_played + 1,
                    games_won: self.games_won + 1,
                    current_streak,
                    longest_streak: self.longest_streak.max(current_streak),
                }
            }
            Outcome::Lost => Self {
                games_played: self.games_played + 1,
                current_streak: 0,
                ..self
            },
        }
    }

    #[must_use]
    pub const fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub const fn games_won(&self) -> u32 {
        self.games_won
    }

    #[must_use]
    pub const fn games_lost(&self) -> u32 {
        self.games_played - self.games_won
    }

    #[must_use]
    pub const fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub const fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    /// Fraction of games won, 0.0 before the first game
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_increments_counters_and_streak() {
        let stats = PlayerStatistics::default().apply(Outcome::Won);
        assert_eq!(stats.games_played(), 1);
        assert_eq!(stats.games_won(), 1);
        assert_eq!(stats.current_streak(), 1);
        assert_eq!(stats.longest_streak(), 1);
    }

    #[test]
    fn loss_resets_streak_but_keeps_longest() {
        let before = PlayerStatistics::default()
            .apply(Outcome::Won)
            .apply(Outcome::Won);
        let after = before.apply(Outcome::Lost);

        assert_eq!(after.games_played(), before.games_played() + 1);
        assert_eq!(after.games_won(), before.games_won());
        assert_eq!(after.current_streak(), 0);
        assert_eq!(after.longest_streak(), before.longest_streak());
    }

    #[test]
    fn longest_streak_tracks_running_maximum() {
        let mut stats = PlayerStatistics::default();
        for outcome in [
            Outcome::Won,
            Outcome::Won,
            Outcome::Won,
            Outcome::Lost,
            Outcome::Won,
        ] {
            stats = stats.apply(outcome);
            assert!(stats.longest_streak() >= stats.current_streak());
            assert!(stats.games_won() <= stats.games_played());
        }

        assert_eq!(stats.longest_streak(), 3);
        assert_eq!(stats.current_streak(), 1);
        assert_eq!(stats.games_lost(), 1);
    }

    #[test]
    fn win_rate() {
        assert!(PlayerStatistics::default().win_rate().abs() < f64::EPSILON);

        let stats = PlayerStatistics::default()
            .apply(Outcome::Won)
            .apply(Outcome::Lost);
        assert!((stats.win_rate() - 0.5).abs() < f64::EPSILON);
    }
}
