//! Configuration bindings for Python.

use std::path::PathBuf;

use pyo3::prelude::*;

use crate::mcts::SearchConfig;
use crate::training::CoachConfig;

/// Python wrapper for CoachConfig.
#[pyclass(name = "CoachConfig")]
#[derive(Clone)]
pub struct PyCoachConfig(pub CoachConfig);

#[pymethods]
impl PyCoachConfig {
    /// Create a coach configuration. Omitted arguments take the library
    /// defaults.
    #[new]
    #[pyo3(signature = (
        board_size = 6,
        num_iterations = 100,
        num_episodes = 10,
        temp_threshold = 15,
        max_queue_len = 2000,
        history_window = 20,
        arena_games = 40,
        update_threshold = 0.6,
        checkpoint_dir = PathBuf::from("./temp"),
        seed = 42,
        num_simulations = 15,
        c_puct = 1.0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        board_size: usize,
        num_iterations: u32,
        num_episodes: u32,
        temp_threshold: u32,
        max_queue_len: usize,
        history_window: usize,
        arena_games: u32,
        update_threshold: f64,
        checkpoint_dir: PathBuf,
        seed: u64,
        num_simulations: u32,
        c_puct: f64,
    ) -> PyResult<Self> {
        let config = CoachConfig::default()
            .with_board_size(board_size)
            .with_iterations(num_iterations)
            .with_episodes(num_episodes)
            .with_temp_threshold(temp_threshold)
            .with_max_queue_len(max_queue_len)
            .with_history_window(history_window)
            .with_arena_games(arena_games)
            .with_update_threshold(update_threshold)
            .with_checkpoint_dir(checkpoint_dir)
            .with_seed(seed)
            .with_search(
                SearchConfig::default()
                    .with_simulations(num_simulations)
                    .with_c_puct(c_puct)
                    .with_seed(seed),
            );
        config.validate()?;
        Ok(Self(config))
    }

    /// Load a configuration from a TOML file.
    #[staticmethod]
    fn from_toml(path: PathBuf) -> PyResult<Self> {
        Ok(Self(CoachConfig::load(&path)?))
    }

    #[getter]
    fn board_size(&self) -> usize {
        self.0.board_size
    }

    #[getter]
    fn num_iterations(&self) -> u32 {
        self.0.num_iterations
    }

    #[getter]
    fn num_episodes(&self) -> u32 {
        self.0.num_episodes
    }

    #[getter]
    fn checkpoint_dir(&self) -> PathBuf {
        self.0.checkpoint_dir.clone()
    }

    #[getter]
    fn num_simulations(&self) -> u32 {
        self.0.search.num_simulations
    }

    fn __repr__(&self) -> String {
        format!(
            "CoachConfig(board={}, iters={}, eps={}, sims={})",
            self.0.board_size,
            self.0.num_iterations,
            self.0.num_episodes,
            self.0.search.num_simulations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(board_size: usize) -> PyResult<PyCoachConfig> {
        PyCoachConfig::new(
            board_size,
            100,
            10,
            15,
            2000,
            20,
            40,
            0.6,
            PathBuf::from("./temp"),
            42,
            15,
            1.0,
        )
    }

    #[test]
    fn test_new_validates() {
        assert!(build(6).is_ok());
        assert!(build(5).is_err());
    }
}
