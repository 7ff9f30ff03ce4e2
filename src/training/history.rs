//! Bounded window of per-iteration example batches.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::GameRng;
use crate::error::Result;

use super::example::TrainingExample;

/// Example batches from the most recent iterations, oldest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory<S> {
    /// Maximum number of batches kept.
    window: usize,

    batches: VecDeque<Vec<TrainingExample<S>>>,
}

impl<S> TrainingHistory<S> {
    /// Create an empty history keeping at most `window` batches.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            batches: VecDeque::with_capacity(window.saturating_add(1).min(64)),
        }
    }

    /// Append one iteration's batch, dropping the oldest batches past the
    /// window.
    pub fn push(&mut self, batch: Vec<TrainingExample<S>>) {
        self.batches.push_back(batch);
        self.evict();
    }

    /// Change the window size, evicting immediately if it shrank.
    pub fn set_window(&mut self, window: usize) {
        self.window = window;
        self.evict();
    }

    fn evict(&mut self) {
        while self.batches.len() > self.window {
            if let Some(dropped) = self.batches.pop_front() {
                warn!(
                    window = self.window,
                    dropped = dropped.len(),
                    "training history full, dropping oldest batch"
                );
            }
        }
    }

    /// Maximum number of batches kept.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of batches held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether no batch is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total examples across all batches.
    #[must_use]
    pub fn total_examples(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    /// Iterate over batches, oldest first.
    pub fn batches(&self) -> impl Iterator<Item = &Vec<TrainingExample<S>>> {
        self.batches.iter()
    }
}

impl<S: Clone> TrainingHistory<S> {
    /// All examples in batch order.
    #[must_use]
    pub fn flatten(&self) -> Vec<TrainingExample<S>> {
        self.batches.iter().flatten().cloned().collect()
    }

    /// All examples, shuffled with `rng`.
    pub fn shuffled_pool(&self, rng: &mut GameRng) -> Vec<TrainingExample<S>> {
        let mut pool = self.flatten();
        rng.shuffle(&mut pool);
        pool
    }
}

impl<S: Serialize + DeserializeOwned> TrainingHistory<S> {
    /// Write the history to `path` (bincode).
    pub fn save(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        debug!(
            path = %path.display(),
            batches = self.len(),
            examples = self.total_examples(),
            "saved training history"
        );
        Ok(())
    }

    /// Read a history written by `save`.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
