//! Training examples produced by self-play.

use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::rules::GameResult;

/// A labeled position: canonical state, search policy and game outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample<S> {
    /// Canonical state (player to move is `Player::First`).
    pub state: S,

    /// Search policy target, length `action_size`.
    pub policy: Vec<f32>,

    /// Final outcome for the player to move in `state`: `+1`, `-1` or `0`.
    pub value: f32,
}

impl<S> TrainingExample<S> {
    /// Create a new example.
    pub fn new(state: S, policy: Vec<f32>, value: f32) -> Self {
        Self {
            state,
            policy,
            value,
        }
    }
}

/// An example recorded mid-game whose outcome is not known yet.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingExample<S> {
    /// Canonical state.
    pub state: S,

    /// Player to move when the position was recorded.
    pub player: Player,

    /// Search policy target.
    pub policy: Vec<f32>,
}

impl<S> PendingExample<S> {
    /// Create a new pending example.
    pub fn new(state: S, player: Player, policy: Vec<f32>) -> Self {
        Self {
            state,
            player,
            policy,
        }
    }

    /// Label with the final outcome.
    ///
    /// `result` is the outcome for `to_move`, the player to move when the
    /// game ended.
    pub fn resolve(self, result: GameResult, to_move: Player) -> TrainingExample<S> {
        let value = result.oriented(to_move, self.player).value() as f32;
        TrainingExample::new(self.state, self.policy, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_same_player_keeps_sign() {
        let pending = PendingExample::new(1u8, Player::First, vec![1.0]);
        let example = pending.resolve(GameResult::Win, Player::First);
        assert_eq!(example.value, 1.0);
    }

    #[test]
    fn test_resolve_other_player_flips_sign() {
        let pending = PendingExample::new(1u8, Player::Second, vec![1.0]);
        assert_eq!(pending.clone().resolve(GameResult::Win, Player::First).value, -1.0);
        assert_eq!(pending.resolve(GameResult::Loss, Player::First).value, 1.0);
    }

    #[test]
    fn test_resolve_draw_is_zero() {
        for player in [Player::First, Player::Second] {
            let pending = PendingExample::new(0u8, player, vec![]);
            assert_eq!(pending.resolve(GameResult::Draw, Player::First).value, 0.0);
        }
    }

    #[test]
    fn test_example_serialization() {
        let example = TrainingExample::new(vec![1i8, -1, 0], vec![0.5, 0.5], -1.0);
        let json = serde_json::to_string(&example).unwrap();
        let back: TrainingExample<Vec<i8>> = serde_json::from_str(&json).unwrap();
        assert_eq!(example, back);
    }
}
