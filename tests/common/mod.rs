//! Small rules engines and oracles shared by the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use othello_zero::arena::MatchResult;
use othello_zero::nn::{Oracle, Prediction};
use othello_zero::rules::{GameResult, RulesEngine};
use othello_zero::training::{CoachConfig, Evaluator, TrainingExample};
use othello_zero::{Error, Player, Result};

/// A single state that is already over; only "pass" is legal.
#[derive(Default)]
pub struct PassOnlyGame {
    pub applies: AtomicUsize,
}

impl RulesEngine for PassOnlyGame {
    type State = u8;
    type Key = u8;

    fn action_size(&self) -> usize {
        1
    }

    fn initial_state(&self) -> u8 {
        0
    }

    fn legal_mask(&self, _state: &u8, _player: Player) -> Vec<bool> {
        vec![true]
    }

    fn apply(&self, state: &u8, player: Player, _action: usize) -> (u8, Player) {
        self.applies.fetch_add(1, Ordering::SeqCst);
        (*state, player.opponent())
    }

    fn canonical(&self, state: &u8, _player: Player) -> u8 {
        *state
    }

    fn terminal_value(&self, _state: &u8, _player: Player) -> Option<GameResult> {
        Some(GameResult::Draw)
    }

    fn key(&self, state: &u8) -> u8 {
        *state
    }
}

/// Root `0` with two actions; action `a` leads to terminal state `a + 1`.
///
/// `outcomes[a]` is the result for the player who took action `a`.
pub struct TwoActionGame {
    pub outcomes: [GameResult; 2],
    pub terminal_checks: AtomicUsize,
}

impl TwoActionGame {
    pub fn new(outcomes: [GameResult; 2]) -> Self {
        Self {
            outcomes,
            terminal_checks: AtomicUsize::new(0),
        }
    }

    pub fn checks(&self) -> usize {
        self.terminal_checks.load(Ordering::SeqCst)
    }
}

impl RulesEngine for TwoActionGame {
    type State = u8;
    type Key = u8;

    fn action_size(&self) -> usize {
        2
    }

    fn initial_state(&self) -> u8 {
        0
    }

    fn legal_mask(&self, state: &u8, _player: Player) -> Vec<bool> {
        if *state == 0 {
            vec![true, true]
        } else {
            vec![false, false]
        }
    }

    fn apply(&self, _state: &u8, player: Player, action: usize) -> (u8, Player) {
        (action as u8 + 1, player.opponent())
    }

    fn canonical(&self, state: &u8, _player: Player) -> u8 {
        *state
    }

    fn terminal_value(&self, state: &u8, _player: Player) -> Option<GameResult> {
        self.terminal_checks.fetch_add(1, Ordering::SeqCst);
        match *state {
            0 => None,
            // The player to move did not take the action.
            s => Some(self.outcomes[usize::from(s) - 1].flipped()),
        }
    }

    fn key(&self, state: &u8) -> u8 {
        *state
    }
}

/// One forced move per ply; after `length` plies the player to move loses.
pub struct LineGame {
    pub length: u32,
}

impl RulesEngine for LineGame {
    type State = u32;
    type Key = u32;

    fn action_size(&self) -> usize {
        1
    }

    fn initial_state(&self) -> u32 {
        0
    }

    fn legal_mask(&self, _state: &u32, _player: Player) -> Vec<bool> {
        vec![true]
    }

    fn apply(&self, state: &u32, player: Player, _action: usize) -> (u32, Player) {
        (state + 1, player.opponent())
    }

    fn canonical(&self, state: &u32, _player: Player) -> u32 {
        *state
    }

    fn terminal_value(&self, state: &u32, _player: Player) -> Option<GameResult> {
        (*state >= self.length).then_some(GameResult::Loss)
    }

    fn key(&self, state: &u32) -> u32 {
        *state
    }
}

/// Oracle with fixed priors and value.
pub struct FixedOracle {
    pub priors: Vec<f32>,
    pub value: f32,
}

impl<S> Oracle<S> for FixedOracle {
    fn predict(&self, _state: &S) -> Result<Prediction> {
        Ok(Prediction::new(self.priors.clone(), self.value))
    }

    fn train(&mut self, _examples: &[TrainingExample<S>]) -> Result<()> {
        Ok(())
    }

    fn save_snapshot(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn load_snapshot(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Uniform oracle whose "parameters" are a version counter bumped by
/// every `train` call and persisted as text.
pub struct VersionOracle {
    pub action_size: usize,
    pub version: u32,
    pub trained_on: usize,
}

impl VersionOracle {
    pub fn new(action_size: usize) -> Self {
        Self {
            action_size,
            version: 0,
            trained_on: 0,
        }
    }
}

impl<S> Oracle<S> for VersionOracle {
    fn predict(&self, _state: &S) -> Result<Prediction> {
        let p = 1.0 / self.action_size as f32;
        Ok(Prediction::new(vec![p; self.action_size], 0.0))
    }

    fn train(&mut self, examples: &[TrainingExample<S>]) -> Result<()> {
        self.version += 1;
        self.trained_on = examples.len();
        Ok(())
    }

    fn save_snapshot(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.version.to_string())?;
        Ok(())
    }

    fn load_snapshot(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.version = text
            .trim()
            .parse()
            .map_err(|_| Error::Oracle(format!("bad version in {}", path.display())))?;
        Ok(())
    }
}

/// Evaluator returning a fixed tally.
pub struct FixedEvaluator(pub MatchResult);

impl<E, O> Evaluator<E, O> for FixedEvaluator
where
    E: RulesEngine,
    O: Oracle<E::State>,
{
    fn evaluate(
        &mut self,
        _engine: &E,
        _previous: &O,
        _candidate: &O,
        _config: &CoachConfig,
    ) -> Result<MatchResult> {
        Ok(self.0)
    }
}

pub fn tally(wins_a: u32, wins_b: u32, draws: u32) -> MatchResult {
    MatchResult {
        wins_a,
        wins_b,
        draws,
    }
}
