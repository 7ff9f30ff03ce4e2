//! Coach configuration.
//!
//! Loaded from TOML (every field optional, missing ones take the defaults
//! below) or built in code with the `with_*` methods. Always validated
//! before a `Coach` is constructed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::mcts::SearchConfig;

/// Parameters of the self-play training loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Board side length (even, at least 4).
    pub board_size: usize,

    /// Iterations run by `learn`.
    pub num_iterations: u32,

    /// Self-play episodes per iteration.
    pub num_episodes: u32,

    /// Plies played at temperature 1 before switching to greedy.
    pub temp_threshold: u32,

    /// Maximum examples kept from one iteration's self-play.
    pub max_queue_len: usize,

    /// Iterations of examples kept for training.
    pub history_window: usize,

    /// Arena games per evaluation.
    pub arena_games: u32,

    /// Minimum candidate share of decisive games to accept it.
    pub update_threshold: f64,

    /// Where checkpoints and example histories are written.
    pub checkpoint_dir: PathBuf,

    /// Seed for episode seeds and pool shuffling.
    pub seed: u64,

    /// Search parameters used in self-play and the arena.
    pub search: SearchConfig,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            board_size: 6,
            num_iterations: 100,
            num_episodes: 10,
            temp_threshold: 15,
            max_queue_len: 2000,
            history_window: 20,
            arena_games: 40,
            update_threshold: 0.6,
            checkpoint_dir: PathBuf::from("./temp"),
            seed: 42,
            search: SearchConfig::default(),
        }
    }
}

impl CoachConfig {
    /// Set the board size.
    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    /// Set the number of iterations.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.num_iterations = iterations;
        self
    }

    /// Set self-play episodes per iteration.
    pub fn with_episodes(mut self, episodes: u32) -> Self {
        self.num_episodes = episodes;
        self
    }

    /// Set the temperature threshold.
    pub fn with_temp_threshold(mut self, plies: u32) -> Self {
        self.temp_threshold = plies;
        self
    }

    /// Set the per-iteration example cap.
    pub fn with_max_queue_len(mut self, len: usize) -> Self {
        self.max_queue_len = len;
        self
    }

    /// Set the history window.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Set arena games per evaluation.
    pub fn with_arena_games(mut self, games: u32) -> Self {
        self.arena_games = games;
        self
    }

    /// Set the acceptance threshold.
    pub fn with_update_threshold(mut self, threshold: f64) -> Self {
        self.update_threshold = threshold;
        self
    }

    /// Set the checkpoint directory.
    pub fn with_checkpoint_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.checkpoint_dir = dir.into();
        self
    }

    /// Set the coach seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set search parameters.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Reject configurations the loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.board_size < 4 || self.board_size % 2 != 0 {
            return Err(Error::InvalidConfig(format!(
                "board_size must be even and >= 4, got {}",
                self.board_size
            )));
        }
        if self.num_episodes == 0 {
            return Err(Error::InvalidConfig(
                "num_episodes must be at least 1".to_string(),
            ));
        }
        if self.max_queue_len == 0 {
            return Err(Error::InvalidConfig(
                "max_queue_len must be at least 1".to_string(),
            ));
        }
        if self.history_window == 0 {
            return Err(Error::InvalidConfig(
                "history_window must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.update_threshold) {
            return Err(Error::InvalidConfig(format!(
                "update_threshold must be in [0, 1], got {}",
                self.update_threshold
            )));
        }
        self.search.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded coach config");
        Ok(config)
    }
}
