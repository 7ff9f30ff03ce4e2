//! Oracle trait: the state evaluator consumed by search.
//!
//! An oracle maps a canonical state to a prior over actions and a scalar
//! value in `[-1, 1]` from the perspective of the player to move. How it
//! learns from examples is its own business; the core only relies on this
//! contract.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::training::TrainingExample;

/// Oracle output for one state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Prior probabilities, one per action (length `action_size`).
    pub priors: Vec<f32>,

    /// Value estimate for the player to move, in `[-1, 1]`.
    pub value: f32,
}

impl Prediction {
    /// Create a new prediction.
    pub fn new(priors: Vec<f32>, value: f32) -> Self {
        Self { priors, value }
    }
}

/// Combined policy-value oracle.
///
/// `predict` is called read-only from many self-play tasks at once, hence
/// `Send + Sync`. `train` and the snapshot loaders take `&mut self` and are
/// never interleaved with inference.
pub trait Oracle<S>: Send + Sync {
    /// Predict priors and value for a canonical state.
    fn predict(&self, state: &S) -> Result<Prediction>;

    /// Fit the oracle to a shuffled pool of examples.
    fn train(&mut self, examples: &[TrainingExample<S>]) -> Result<()>;

    /// Persist the current parameters to `path`.
    fn save_snapshot(&self, path: &Path) -> Result<()>;

    /// Replace the current parameters with the snapshot at `path`.
    fn load_snapshot(&mut self, path: &Path) -> Result<()>;
}

/// Uniform priors and zero value (baseline for testing).
///
/// Training is a no-op; snapshots are empty files.
#[derive(Clone, Debug, Default)]
pub struct UniformOracle {
    action_size: usize,
}

impl UniformOracle {
    /// Create a new uniform oracle.
    pub fn new(action_size: usize) -> Self {
        Self { action_size }
    }
}

impl<S> Oracle<S> for UniformOracle {
    fn predict(&self, _state: &S) -> Result<Prediction> {
        let priors = if self.action_size == 0 {
            vec![]
        } else {
            vec![1.0 / self.action_size as f32; self.action_size]
        };
        Ok(Prediction::new(priors, 0.0))
    }

    fn train(&mut self, _examples: &[TrainingExample<S>]) -> Result<()> {
        Ok(())
    }

    fn save_snapshot(&self, path: &Path) -> Result<()> {
        std::fs::write(path, [])?;
        Ok(())
    }

    fn load_snapshot(&mut self, path: &Path) -> Result<()> {
        std::fs::metadata(path)?;
        Ok(())
    }
}
