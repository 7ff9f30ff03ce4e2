//! Head-to-head games between two policies.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::core::Player;
use crate::error::{Error, Result};
use crate::rules::{GameResult, RulesEngine};

use super::players::Policy;

/// Tally of a match, attributed to policies rather than seats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Games won by the first policy.
    pub wins_a: u32,

    /// Games won by the second policy.
    pub wins_b: u32,

    /// Drawn games.
    pub draws: u32,
}

impl MatchResult {
    /// Games played.
    #[must_use]
    pub fn games(&self) -> u32 {
        self.wins_a + self.wins_b + self.draws
    }

    /// Games that were not drawn.
    #[must_use]
    pub fn decisive(&self) -> u32 {
        self.wins_a + self.wins_b
    }

    /// Share of decisive games won by the second policy, `None` if every
    /// game was drawn.
    #[must_use]
    pub fn win_rate_b(&self) -> Option<f64> {
        match self.decisive() {
            0 => None,
            decisive => Some(f64::from(self.wins_b) / f64::from(decisive)),
        }
    }

    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins_a += 1,
            GameResult::Loss => self.wins_b += 1,
            GameResult::Draw => self.draws += 1,
        }
    }
}

/// Plays games on one rules engine.
pub struct Arena<'a, E: RulesEngine> {
    engine: &'a E,
}

impl<'a, E: RulesEngine> Arena<'a, E> {
    /// Create an arena for `engine`.
    pub fn new(engine: &'a E) -> Self {
        Self { engine }
    }

    /// Play one game with `a` moving first. Returns the outcome for `a`.
    ///
    /// Each policy is shown the canonical state; an action outside the
    /// legal mask ends the game with `Error::IllegalAction`.
    pub fn play_game<A, B>(&self, a: &mut A, b: &mut B) -> Result<GameResult>
    where
        A: Policy<E::State> + ?Sized,
        B: Policy<E::State> + ?Sized,
    {
        let action_size = self.engine.action_size();
        let mut state = self.engine.initial_state();
        let mut player = Player::First;
        let mut plies = 0u32;

        loop {
            if let Some(result) = self.engine.terminal_value(&state, player) {
                let result = result.oriented(player, Player::First);
                debug!(plies, ?result, "arena game finished");
                return Ok(result);
            }

            let canonical = self.engine.canonical(&state, player);
            let action = match player {
                Player::First => a.select_action(&canonical)?,
                Player::Second => b.select_action(&canonical)?,
            };

            if action >= action_size {
                return Err(Error::ActionOutOfRange {
                    action,
                    size: action_size,
                });
            }
            if !self.engine.legal_mask(&canonical, Player::First)[action] {
                return Err(Error::IllegalAction { action, player });
            }

            trace!(%player, action, "arena move");
            let (next, next_player) = self.engine.apply(&state, player, action);
            state = next;
            player = next_player;
            plies += 1;
        }
    }

    /// Play `num_games / 2` games with `a` first, then as many with `b`
    /// first. An odd remainder is not played.
    pub fn play_match<A, B>(&self, a: &mut A, b: &mut B, num_games: u32) -> Result<MatchResult>
    where
        A: Policy<E::State> + ?Sized,
        B: Policy<E::State> + ?Sized,
    {
        let half = num_games / 2;
        let mut tally = MatchResult::default();

        for _ in 0..half {
            tally.record(self.play_game(a, b)?);
        }
        for _ in 0..half {
            tally.record(self.play_game(b, a)?.flipped());
        }

        info!(
            wins_a = tally.wins_a,
            wins_b = tally.wins_b,
            draws = tally.draws,
            "arena match finished"
        );
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::players::{GreedyPolicy, RandomPolicy};
    use crate::games::othello::OthelloGame;

    #[test]
    fn test_match_result_counts() {
        let result = MatchResult {
            wins_a: 3,
            wins_b: 5,
            draws: 2,
        };
        assert_eq!(result.games(), 10);
        assert_eq!(result.decisive(), 8);
        assert_eq!(result.win_rate_b(), Some(0.625));
        assert_eq!(MatchResult::default().win_rate_b(), None);
    }

    #[test]
    fn test_match_tallies_sum() {
        let game = OthelloGame::new(4);
        let arena = Arena::new(&game);
        let mut a = RandomPolicy::new(&game, 1);
        let mut b = GreedyPolicy::new(&game);

        let result = arena.play_match(&mut a, &mut b, 7).unwrap();
        assert_eq!(result.games(), 6);
    }

    #[test]
    fn test_illegal_action_is_error() {
        let game = OthelloGame::new(4);
        let arena = Arena::new(&game);
        // Cell 0 is not legal in the opening.
        let mut a = |_: &crate::games::othello::Board| -> Result<usize> { Ok(0) };
        let mut b = GreedyPolicy::new(&game);

        let err = arena.play_game(&mut a, &mut b).unwrap_err();
        assert!(matches!(
            err,
            Error::IllegalAction {
                action: 0,
                player: Player::First
            }
        ));
    }

    #[test]
    fn test_out_of_range_action_is_error() {
        let game = OthelloGame::new(4);
        let arena = Arena::new(&game);
        let mut a = |_: &crate::games::othello::Board| -> Result<usize> { Ok(99) };
        let mut b = GreedyPolicy::new(&game);

        assert!(matches!(
            arena.play_game(&mut a, &mut b),
            Err(Error::ActionOutOfRange { action: 99, size: 17 })
        ));
    }
}
