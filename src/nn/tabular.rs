//! Lookup-table oracle.
//!
//! Stores, per canonical state, the mean target policy and mean target
//! value of every training example seen for that state. Unseen states get a
//! uniform prior and a neutral value. Useful on small boards and as a
//! dependency-free stand-in for a neural network.

use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::training::TrainingExample;

use super::traits::{Oracle, Prediction};

/// Running means for one state.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Entry {
    policy: Vec<f32>,
    value: f32,
    count: u32,
}

impl Entry {
    fn new(action_size: usize) -> Self {
        Self {
            policy: vec![0.0; action_size],
            value: 0.0,
            count: 0,
        }
    }

    fn absorb(&mut self, policy: &[f32], value: f32) {
        self.count += 1;
        let n = self.count as f32;
        for (mean, &p) in self.policy.iter_mut().zip(policy) {
            *mean += (p - *mean) / n;
        }
        self.value += (value - self.value) / n;
    }
}

/// Oracle backed by a hash table keyed on canonical state.
#[derive(Clone, Debug)]
pub struct TabularOracle<S: Eq + Hash> {
    action_size: usize,
    table: FxHashMap<S, Entry>,
}

impl<S: Eq + Hash> TabularOracle<S> {
    /// Create an empty table for the given action space.
    pub fn new(action_size: usize) -> Self {
        Self {
            action_size,
            table: FxHashMap::default(),
        }
    }

    /// Number of distinct states with learned targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether nothing has been learned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn uniform(&self) -> Prediction {
        let p = if self.action_size == 0 {
            0.0
        } else {
            1.0 / self.action_size as f32
        };
        Prediction::new(vec![p; self.action_size], 0.0)
    }
}

impl<S> Oracle<S> for TabularOracle<S>
where
    S: Clone + Eq + Hash + Serialize + DeserializeOwned + Send + Sync,
{
    fn predict(&self, state: &S) -> Result<Prediction> {
        Ok(match self.table.get(state) {
            Some(entry) => Prediction::new(entry.policy.clone(), entry.value),
            None => self.uniform(),
        })
    }

    /// Refit the table from scratch on the given pool.
    fn train(&mut self, examples: &[TrainingExample<S>]) -> Result<()> {
        let mut table: FxHashMap<S, Entry> = FxHashMap::default();
        for example in examples {
            if example.policy.len() != self.action_size {
                return Err(Error::PriorLength {
                    expected: self.action_size,
                    actual: example.policy.len(),
                });
            }
            table
                .entry(example.state.clone())
                .or_insert_with(|| Entry::new(self.action_size))
                .absorb(&example.policy, example.value);
        }

        debug!(
            examples = examples.len(),
            states = table.len(),
            "tabular oracle refit"
        );
        self.table = table;
        Ok(())
    }

    fn save_snapshot(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, &(self.action_size, &self.table))?;
        Ok(())
    }

    fn load_snapshot(&mut self, path: &Path) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        let (action_size, table): (usize, FxHashMap<S, Entry>) =
            bincode::deserialize_from(reader)?;
        if action_size != self.action_size {
            return Err(Error::Oracle(format!(
                "snapshot {} has action size {action_size}, expected {}",
                path.display(),
                self.action_size
            )));
        }
        self.table = table;
        Ok(())
    }
}
