//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - Which actions are legal
//! - How actions transform state
//! - Canonical form and board symmetries
//! - Win/loss/draw conditions

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::core::Player;

/// Symmetric variants of a `(state, policy)` pair.
///
/// Square boards have at most eight (rotations x reflections).
pub type Symmetries<S> = SmallVec<[(S, Vec<f32>); 8]>;

/// Result of a finished game from one player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Scalar value: `+1` win, `-1` loss, `0` draw.
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            GameResult::Win => 1.0,
            GameResult::Loss => -1.0,
            GameResult::Draw => 0.0,
        }
    }

    /// The same outcome seen from the opponent's side.
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }

    /// Outcome for `player`, given the outcome for `perspective`.
    #[inline]
    #[must_use]
    pub fn oriented(self, perspective: Player, player: Player) -> Self {
        if perspective == player {
            self
        } else {
            self.flipped()
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - Every method must be pure: same inputs, same outputs
/// - `legal_mask` must have at least one legal entry for non-terminal states
///   (the reserved pass slot covers "no move available")
/// - `terminal_value` returns `None` while the game continues
/// - `canonical(state, player)` rewrites `state` so that `player` becomes
///   `Player::First`; search and oracle only ever see canonical states
pub trait RulesEngine: Send + Sync {
    /// Game state. Immutable: transitions return new values.
    type State: Clone + Debug + Send + Sync;

    /// Hashable identity of a state, used as the search statistics key.
    type Key: Clone + Eq + Hash + Send;

    /// Number of actions, including the reserved pass action.
    fn action_size(&self) -> usize;

    /// State at the start of a game. `Player::First` moves first.
    fn initial_state(&self) -> Self::State;

    /// Legality mask of length `action_size` for `player` in `state`.
    fn legal_mask(&self, state: &Self::State, player: Player) -> Vec<bool>;

    /// Apply `action` for `player`, returning the new state and the next player.
    fn apply(&self, state: &Self::State, player: Player, action: usize) -> (Self::State, Player);

    /// Rewrite `state` from `player`'s perspective.
    fn canonical(&self, state: &Self::State, player: Player) -> Self::State;

    /// Terminal outcome for `player`, or `None` if the game continues.
    fn terminal_value(&self, state: &Self::State, player: Player) -> Option<GameResult>;

    /// Map a state to its statistics key.
    fn key(&self, state: &Self::State) -> Self::Key;

    /// Equivalent `(state, policy)` pairs under board symmetries.
    ///
    /// Default: identity only.
    fn symmetries(&self, state: &Self::State, policy: &[f32]) -> Symmetries<Self::State> {
        smallvec![(state.clone(), policy.to_vec())]
    }

    /// Heuristic material score for `player` (higher is better).
    ///
    /// Only used by greedy manual-play strategies.
    fn score(&self, _state: &Self::State, _player: Player) -> i32 {
        0
    }

    /// Human-readable rendering of a state.
    fn render(&self, state: &Self::State) -> String {
        format!("{state:?}")
    }

    // === Convenience Methods ===

    /// Indices of legal actions for `player`, in ascending order.
    fn legal_actions(&self, state: &Self::State, player: Player) -> Vec<usize> {
        self.legal_mask(state, player)
            .iter()
            .enumerate()
            .filter_map(|(a, &legal)| legal.then_some(a))
            .collect()
    }
}
