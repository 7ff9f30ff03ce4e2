//! Core MCTS search algorithm.
//!
//! PUCT search over canonical states. Each simulation descends by PUCT
//! until it reaches either a terminal state or a state never seen before;
//! the latter is expanded with one oracle call and its value is backed up
//! along the path with alternating sign.
//!
//! ## Sign convention
//!
//! `simulate(s)` returns the value of `s` for the player who moved *into*
//! `s`, i.e. the negation of the value for the player to move in `s`. The
//! caller stores it as `Q(parent, a)` unchanged and returns its negation
//! one level up.

use std::time::Instant;

use tracing::{trace, warn};

use crate::core::{GameRng, Player};
use crate::error::{Error, Result};
use crate::nn::Oracle;
use crate::rules::RulesEngine;

use super::config::SearchConfig;
use super::node::NodeStats;
use super::policy::{select_puct, visits_to_policy};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// One search context: statistics persist across calls until `reset`.
///
/// Self-play keeps one context per episode; the arena keeps one per
/// player per game.
pub struct SearchEngine<'a, E: RulesEngine, O: Oracle<E::State>> {
    /// The game rules engine.
    engine: &'a E,

    /// State evaluator.
    oracle: &'a O,

    /// Search configuration.
    config: SearchConfig,

    /// Statistics keyed by canonical state.
    tree: SearchTree<E::Key>,

    /// RNG for temperature-0 tie breaks.
    rng: GameRng,

    /// Search statistics.
    stats: SearchStats,
}

impl<'a, E, O> SearchEngine<'a, E, O>
where
    E: RulesEngine,
    O: Oracle<E::State>,
{
    /// Create a new search context.
    pub fn new(engine: &'a E, oracle: &'a O, config: SearchConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            engine,
            oracle,
            config,
            tree: SearchTree::new(),
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Run `num_simulations` simulations from the canonical `root` and
    /// return a distribution over actions derived from root visit counts.
    ///
    /// At `temperature == 0` the result is one-hot on a most-visited action
    /// (random tie-break). If no action was ever visited (terminal root, or
    /// too few simulations to leave the root), the legal actions stand in
    /// as equally visited: uniform, or one-hot on a random legal action at
    /// `temperature == 0`.
    pub fn action_probabilities(
        &mut self,
        root: &E::State,
        temperature: f64,
    ) -> Result<Vec<f32>> {
        let start = Instant::now();
        for _ in 0..self.config.num_simulations {
            self.simulate(root)?;
        }
        self.stats.time_us += start.elapsed().as_micros() as u64;

        let key = self.engine.key(root);
        let counts = self.tree.visit_counts(&key, self.engine.action_size());
        trace!(?counts, "root visit counts");

        if counts.iter().all(|&c| c == 0) {
            return self.unvisited_policy(root, temperature);
        }
        Ok(visits_to_policy(&counts, temperature, &mut self.rng))
    }

    /// Run one simulation from the canonical `state`.
    ///
    /// Returns the value for the player who moved into `state` (see the
    /// module docs).
    pub fn simulate(&mut self, state: &E::State) -> Result<f64> {
        self.stats.simulations += 1;
        self.descend(state)
    }

    fn descend(&mut self, state: &E::State) -> Result<f64> {
        let key = self.engine.key(state);

        let terminal = match self.tree.terminal(&key) {
            Some(cached) => cached,
            None => {
                let result = self.engine.terminal_value(state, Player::First);
                self.tree.set_terminal(key.clone(), result);
                result
            }
        };
        if let Some(result) = terminal {
            self.stats.terminal_hits += 1;
            return Ok(-result.value());
        }

        let c_puct = self.config.c_puct;
        let action = match self.tree.get(&key).map(|node| select_puct(node, c_puct)) {
            None => return self.expand(key, state),
            Some(selected) => selected.ok_or(Error::NoLegalActions)?,
        };

        let (next, next_player) = self.engine.apply(state, Player::First, action);
        let next = self.engine.canonical(&next, next_player);
        let value = self.descend(&next)?;

        if let Some(node) = self.tree.get_mut(&key) {
            node.record(action, value);
        }
        Ok(-value)
    }

    /// Expand a leaf with one oracle call and return its negated value.
    fn expand(&mut self, key: E::Key, state: &E::State) -> Result<f64> {
        let prediction = self.oracle.predict(state)?;
        self.stats.oracle_calls += 1;

        let action_size = self.engine.action_size();
        if prediction.priors.len() != action_size {
            return Err(Error::PriorLength {
                expected: action_size,
                actual: prediction.priors.len(),
            });
        }

        let valid = self.engine.legal_mask(state, Player::First);
        let mut priors: Vec<f32> = prediction
            .priors
            .iter()
            .zip(&valid)
            .map(|(&p, &legal)| if legal { p } else { 0.0 })
            .collect();

        let total: f32 = priors.iter().sum();
        if total > 0.0 {
            for p in &mut priors {
                *p /= total;
            }
        } else {
            let legal = valid.iter().filter(|&&v| v).count();
            if legal == 0 {
                return Err(Error::NoLegalActions);
            }
            warn!(
                legal,
                "oracle put no prior mass on legal actions, falling back to uniform"
            );
            self.stats.prior_fallbacks += 1;
            let uniform = 1.0 / legal as f32;
            for (p, &legal) in priors.iter_mut().zip(&valid) {
                *p = if legal { uniform } else { 0.0 };
            }
        }

        self.tree.insert(key, NodeStats::new(priors, valid));
        Ok(-f64::from(prediction.value))
    }

    fn unvisited_policy(&mut self, state: &E::State, temperature: f64) -> Result<Vec<f32>> {
        let legal = self.engine.legal_actions(state, Player::First);
        if legal.is_empty() {
            return Err(Error::NoLegalActions);
        }

        let mut probs = vec![0.0f32; self.engine.action_size()];
        if temperature <= 0.0 {
            if let Some(&action) = self.rng.choose(&legal) {
                probs[action] = 1.0;
            }
        } else {
            let p = 1.0 / legal.len() as f32;
            for &action in &legal {
                probs[action] = p;
            }
        }
        Ok(probs)
    }

    /// Get the statistics store.
    #[must_use]
    pub fn tree(&self) -> &SearchTree<E::Key> {
        &self.tree
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the rules engine.
    #[must_use]
    pub fn engine(&self) -> &'a E {
        self.engine
    }

    /// Drop all statistics, keeping configuration and RNG stream.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.stats.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::othello::OthelloGame;
    use crate::nn::{Prediction, UniformOracle};
    use crate::training::TrainingExample;
    use std::path::Path;

    /// Puts all prior mass on a single fixed action.
    struct SpikeOracle {
        action_size: usize,
        spike: usize,
    }

    impl<S> Oracle<S> for SpikeOracle {
        fn predict(&self, _state: &S) -> Result<Prediction> {
            let mut priors = vec![0.0; self.action_size];
            priors[self.spike] = 1.0;
            Ok(Prediction::new(priors, 0.0))
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

    #[test]
    fn test_root_counts_sum() {
        let game = OthelloGame::new(4);
        let oracle = UniformOracle::new(game.action_size());
        let config = SearchConfig::default().with_simulations(40);
        let mut search = SearchEngine::new(&game, &oracle, config);

        let root = game.initial_state();
        search.action_probabilities(&root, 1.0).unwrap();

        // The first simulation only expands the root.
        let counts = search.tree().visit_counts(&root, game.action_size());
        assert_eq!(counts.iter().sum::<u32>(), 39);
        assert_eq!(search.stats().simulations, 40);
    }

    #[test]
    fn test_probabilities_sum_to_one_on_legal() {
        let game = OthelloGame::new(4);
        let oracle = UniformOracle::new(game.action_size());
        let mut search = SearchEngine::new(&game, &oracle, SearchConfig::default());

        let root = game.initial_state();
        let probs = search.action_probabilities(&root, 1.0).unwrap();
        let mask = game.legal_mask(&root, Player::First);

        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        for (p, legal) in probs.iter().zip(mask) {
            if !legal {
                assert_eq!(*p, 0.0);
            }
        }
    }

    #[test]
    fn test_masked_prior_is_renormalized() {
        let game = OthelloGame::new(4);
        let oracle = UniformOracle::new(game.action_size());
        let mut search = SearchEngine::new(&game, &oracle, SearchConfig::default());

        let root = game.initial_state();
        search.simulate(&root).unwrap();

        let node = search.tree().get(&root).unwrap();
        assert!((node.priors.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        for (p, legal) in node.priors.iter().zip(&node.valid) {
            assert_eq!(*p > 0.0, *legal);
        }
    }

    #[test]
    fn test_illegal_prior_mass_falls_back_to_uniform() {
        let game = OthelloGame::new(4);
        // Cell 0 is never legal from the opening position.
        let oracle = SpikeOracle {
            action_size: game.action_size(),
            spike: 0,
        };
        let mut search = SearchEngine::new(&game, &oracle, SearchConfig::default());

        let root = game.initial_state();
        search.simulate(&root).unwrap();

        let node = search.tree().get(&root).unwrap();
        let legal = node.valid.iter().filter(|&&v| v).count();
        for (p, valid) in node.priors.iter().zip(&node.valid) {
            if *valid {
                assert!((p - 1.0 / legal as f32).abs() < 1e-6);
            } else {
                assert_eq!(*p, 0.0);
            }
        }
        assert!(search.stats().prior_fallbacks >= 1);
    }

    #[test]
    fn test_prior_length_mismatch_is_error() {
        let game = OthelloGame::new(4);
        let oracle = UniformOracle::new(3);
        let mut search = SearchEngine::new(&game, &oracle, SearchConfig::default());

        let err = search.simulate(&game.initial_state()).unwrap_err();
        assert!(matches!(err, Error::PriorLength { expected: 17, actual: 3 }));
    }

    #[test]
    fn test_reset_clears_tree() {
        let game = OthelloGame::new(4);
        let oracle = UniformOracle::new(game.action_size());
        let mut search = SearchEngine::new(&game, &oracle, SearchConfig::default());

        search.action_probabilities(&game.initial_state(), 1.0).unwrap();
        assert!(!search.tree().is_empty());

        search.reset();
        assert!(search.tree().is_empty());
        assert_eq!(search.stats().simulations, 0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let game = OthelloGame::new(4);
        let oracle = UniformOracle::new(game.action_size());
        let root = game.initial_state();

        let run = |seed| {
            let config = SearchConfig::default().with_seed(seed);
            let mut search = SearchEngine::new(&game, &oracle, config);
            search.action_probabilities(&root, 0.0).unwrap()
        };

        assert_eq!(run(3), run(3));
    }
}
