//! Player identification for two-player zero-sum games.
//!
//! `First` always moves first and carries sign `+1`; `Second` carries `-1`.
//! Canonical states are written from `First`'s point of view.

use serde::{Deserialize, Serialize};

/// One of the two sides of a zero-sum game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player who moves first (sign `+1`).
    First,
    /// The player who moves second (sign `-1`).
    Second,
}

impl Player {
    /// Sign used for board encodings: `+1` for `First`, `-1` for `Second`.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Player::First => 1,
            Player::Second => -1,
        }
    }

    /// The other player.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "Player 1"),
            Player::Second => write!(f, "Player 2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_opponent() {
        assert_eq!(Player::First.sign(), 1);
        assert_eq!(Player::Second.sign(), -1);
        assert_eq!(Player::First.opponent(), Player::Second);
        assert_eq!(Player::Second.opponent().opponent(), Player::Second);
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::First.to_string(), "Player 1");
        assert_eq!(Player::Second.to_string(), "Player 2");
    }
}
