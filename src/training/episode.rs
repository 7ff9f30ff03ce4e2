//! Self-play episode generation.

use tracing::debug;

use crate::core::{GameRng, Player};
use crate::error::{Error, Result};
use crate::mcts::SearchEngine;
use crate::nn::Oracle;
use crate::rules::RulesEngine;

use super::example::{PendingExample, TrainingExample};

/// Temperature for a 1-based ply: exploratory before `temp_threshold`,
/// greedy from then on.
#[inline]
#[must_use]
pub fn temperature_for_ply(ply: u32, temp_threshold: u32) -> f64 {
    if ply < temp_threshold {
        1.0
    } else {
        0.0
    }
}

/// Play one self-play game and return its labeled examples.
///
/// Every decision is searched from the canonical position with `search`
/// (whose statistics accumulate over the episode); the chosen action is
/// drawn from the search policy with `rng`. Each position contributes one
/// example per board symmetry. A game that starts terminal yields nothing.
pub fn play_episode<E, O>(
    engine: &E,
    search: &mut SearchEngine<'_, E, O>,
    temp_threshold: u32,
    rng: &mut GameRng,
) -> Result<Vec<TrainingExample<E::State>>>
where
    E: RulesEngine,
    O: Oracle<E::State>,
{
    let mut state = engine.initial_state();
    let mut player = Player::First;
    let mut pending: Vec<PendingExample<E::State>> = Vec::new();
    let mut ply = 0u32;

    loop {
        if let Some(result) = engine.terminal_value(&state, player) {
            debug!(plies = ply, examples = pending.len(), ?result, "episode finished");
            return Ok(pending
                .into_iter()
                .map(|p| p.resolve(result, player))
                .collect());
        }

        ply += 1;
        let canonical = engine.canonical(&state, player);
        let temperature = temperature_for_ply(ply, temp_threshold);
        let policy = search.action_probabilities(&canonical, temperature)?;

        for (sym_state, sym_policy) in engine.symmetries(&canonical, &policy) {
            pending.push(PendingExample::new(sym_state, player, sym_policy));
        }

        let action = rng
            .choose_weighted(&policy)
            .ok_or(Error::EmptyDistribution)?;
        let (next, next_player) = engine.apply(&state, player, action);
        state = next;
        player = next_player;
    }
}
