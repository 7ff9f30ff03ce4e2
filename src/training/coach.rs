//! Iteration-level training loop.
//!
//! Each iteration runs four phases:
//!
//! 1. **Self-play**: `num_episodes` episodes in parallel against the current
//!    oracle, capped at `max_queue_len` examples
//! 2. **Pool & train**: push the batch onto the history window, persist it,
//!    snapshot the oracle to `temp`, train on the shuffled pool
//! 3. **Evaluate**: previous (`temp`) vs candidate through an `Evaluator`
//! 4. **Accept/reject**: keep the candidate as `best` or roll back to `temp`

use std::collections::VecDeque;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::arena::{Arena, MatchResult, SearchPolicy};
use crate::core::GameRng;
use crate::error::{Error, Result};
use crate::mcts::{SearchEngine, SearchStats};
use crate::nn::Oracle;
use crate::rules::RulesEngine;

use super::checkpoint::{examples_path, CheckpointId, CheckpointStore};
use super::config::CoachConfig;
use super::episode::play_episode;
use super::example::TrainingExample;
use super::history::TrainingHistory;

/// Compares the previous oracle against the freshly trained candidate.
///
/// The returned tally has the previous oracle as `a` and the candidate as
/// `b`.
pub trait Evaluator<E: RulesEngine, O: Oracle<E::State>>: Send {
    /// Play the previous oracle against the candidate.
    fn evaluate(
        &mut self,
        engine: &E,
        previous: &O,
        candidate: &O,
        config: &CoachConfig,
    ) -> Result<MatchResult>;
}

/// Default evaluator: an arena match between two deterministic search players.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArenaEvaluator;

impl<E: RulesEngine, O: Oracle<E::State>> Evaluator<E, O> for ArenaEvaluator {
    fn evaluate(
        &mut self,
        engine: &E,
        previous: &O,
        candidate: &O,
        config: &CoachConfig,
    ) -> Result<MatchResult> {
        let mut previous = SearchPolicy::new(engine, previous, config.search.clone());
        let mut candidate = SearchPolicy::new(engine, candidate, config.search.clone());
        Arena::new(engine).play_match(&mut previous, &mut candidate, config.arena_games)
    }
}

/// Whether a candidate with this evaluation tally replaces the previous oracle.
///
/// An all-draw evaluation is a rejection.
#[must_use]
pub fn accepts_candidate(result: &MatchResult, threshold: f64) -> bool {
    result.win_rate_b().is_some_and(|rate| rate >= threshold)
}

/// Outcome of one training iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// 1-based iteration number.
    pub iteration: u32,

    /// Examples produced by this iteration's self-play (0 if skipped).
    pub examples: usize,

    /// Evaluation tally (previous = `a`, candidate = `b`).
    pub result: MatchResult,

    /// Whether the candidate was kept.
    pub accepted: bool,
}

/// Drives self-play, training and gating for one oracle.
pub struct Coach<E: RulesEngine, O: Oracle<E::State>> {
    engine: E,

    /// Oracle being trained.
    oracle: O,

    /// Scratch oracle holding the pre-training snapshot during evaluation.
    previous: O,

    config: CoachConfig,
    store: CheckpointStore,
    history: TrainingHistory<E::State>,
    evaluator: Box<dyn Evaluator<E, O>>,
    rng: GameRng,

    /// Set by `resume` when a saved history covers the first iteration.
    skip_first_self_play: bool,
}

impl<E, O> Coach<E, O>
where
    E: RulesEngine + 'static,
    E::State: Serialize + serde::de::DeserializeOwned,
    O: Oracle<E::State> + 'static,
{
    /// Create a coach. `previous` is a second oracle of the same kind, used
    /// only to hold snapshots for evaluation.
    pub fn new(engine: E, oracle: O, previous: O, config: CoachConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine,
            oracle,
            previous,
            store: CheckpointStore::new(&config.checkpoint_dir),
            history: TrainingHistory::new(config.history_window),
            evaluator: Box::new(ArenaEvaluator),
            rng: GameRng::new(config.seed),
            skip_first_self_play: false,
            config,
        })
    }

    /// Replace the evaluator.
    pub fn with_evaluator<V: Evaluator<E, O> + 'static>(mut self, evaluator: V) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Load the oracle from `model_path` and, if present, the example
    /// history saved next to it.
    ///
    /// With a history, the first self-play phase of the next `learn` is
    /// skipped. Without one, `confirm` decides whether to continue from an
    /// empty history; declining returns `Error::ResumeAborted`.
    pub fn resume<F>(&mut self, model_path: &Path, confirm: F) -> Result<()>
    where
        F: FnOnce(&Path) -> bool,
    {
        self.oracle.load_snapshot(model_path)?;
        info!(path = %model_path.display(), "loaded oracle checkpoint");

        let examples = examples_path(model_path);
        if examples.is_file() {
            let mut history = TrainingHistory::load(&examples)?;
            history.set_window(self.config.history_window);
            info!(
                path = %examples.display(),
                batches = history.len(),
                examples = history.total_examples(),
                "loaded training history"
            );
            self.history = history;
            self.skip_first_self_play = true;
        } else {
            warn!(path = %examples.display(), "training history not found");
            if !confirm(&examples) {
                return Err(Error::ResumeAborted(examples));
            }
        }
        Ok(())
    }

    /// Run `num_iterations` iterations.
    pub fn learn(&mut self) -> Result<Vec<IterationReport>> {
        let mut reports = Vec::with_capacity(self.config.num_iterations as usize);
        for iteration in 1..=self.config.num_iterations {
            reports.push(self.run_iteration(iteration)?);
        }
        Ok(reports)
    }

    /// Run one iteration (1-based).
    pub fn run_iteration(&mut self, iteration: u32) -> Result<IterationReport> {
        info!(iteration, "starting iteration");
        self.store.ensure_dir()?;

        let mut examples = 0;
        if self.skip_first_self_play && iteration == 1 {
            info!("using loaded history instead of self-play");
        } else {
            let batch = self.self_play()?;
            examples = batch.len();
            self.history.push(batch);
        }

        self.history.save(&self.store.history_path(iteration))?;
        let pool = self.history.shuffled_pool(&mut self.rng);

        let temp = self.store.path(CheckpointId::Temp);
        self.oracle.save_snapshot(&temp)?;
        self.previous.load_snapshot(&temp)?;
        self.oracle.train(&pool)?;

        let result = self.evaluator.evaluate(
            &self.engine,
            &self.previous,
            &self.oracle,
            &self.config,
        )?;
        info!(
            new = result.wins_b,
            prev = result.wins_a,
            draws = result.draws,
            "evaluation finished"
        );

        let accepted = accepts_candidate(&result, self.config.update_threshold);
        if accepted {
            info!(iteration, "accepting new oracle");
            self.oracle
                .save_snapshot(&self.store.path(CheckpointId::Iteration(iteration)))?;
            self.oracle.save_snapshot(&self.store.path(CheckpointId::Best))?;
        } else {
            info!(iteration, "rejecting new oracle");
            self.oracle.load_snapshot(&temp)?;
        }

        Ok(IterationReport {
            iteration,
            examples,
            result,
            accepted,
        })
    }

    /// Play `num_episodes` episodes in parallel. Episode RNGs are forked
    /// up front so the batch does not depend on scheduling.
    fn self_play(&mut self) -> Result<Vec<TrainingExample<E::State>>> {
        let rngs: Vec<GameRng> = (0..self.config.num_episodes)
            .map(|_| self.rng.fork())
            .collect();

        let engine = &self.engine;
        let oracle = &self.oracle;
        let search_config = &self.config.search;
        let temp_threshold = self.config.temp_threshold;

        let episodes = rngs
            .into_par_iter()
            .map(|mut rng| -> Result<_> {
                let config = search_config.clone().with_seed(rng.next_u64());
                let mut search = SearchEngine::new(engine, oracle, config);
                let examples = play_episode(engine, &mut search, temp_threshold, &mut rng)?;
                Ok((examples, search.stats().clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut stats = SearchStats::new();
        let max = self.config.max_queue_len;
        let mut queue = VecDeque::with_capacity(max.min(4096));
        for (examples, episode_stats) in episodes {
            stats.merge(&episode_stats);
            for example in examples {
                if queue.len() == max {
                    queue.pop_front();
                }
                queue.push_back(example);
            }
        }

        info!(
            episodes = self.config.num_episodes,
            examples = queue.len(),
            simulations = stats.simulations,
            prior_fallbacks = stats.prior_fallbacks,
            "self-play finished"
        );
        Ok(queue.into())
    }

    /// The oracle being trained.
    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The current example history.
    #[must_use]
    pub fn history(&self) -> &TrainingHistory<E::State> {
        &self.history
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Checkpoint locations.
    #[must_use]
    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    /// The rules engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }
}
