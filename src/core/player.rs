//! Player records

use super::{GameId, PlayerStatistics};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Fresh random identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A player, the game they are currently allowed to act on, and their statistics
///
/// `current_game` is the only authorization link between a player and a game:
/// a player may act on exactly the game it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub current_game: Option<GameId>,
    pub stats: PlayerStatistics,
}

impl Player {
    /// New player with no game and empty statistics
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            current_game: None,
            stats: PlayerStatistics::default(),
        }
    }

    /// Check whether this player may act on `game`
    #[must_use]
    pub fn owns(&self, game: GameId) -> bool {
        self.current_game == Some(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_owns_nothing() {
        let player = Player::new(PlayerId::new_random());
        assert_eq!(player.current_game, None);
        assert!(!player.owns(GameId::new_random()));
    }

    #[test]
    fn player_id_round_trips_through_text() {
        let id = PlayerId::new_random();
        assert_eq!(id.to_string().parse::<PlayerId>().unwrap(), id);
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }
}
