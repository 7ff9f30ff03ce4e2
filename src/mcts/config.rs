//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// PUCT exploration constant.
    /// Higher values weight the prior-driven exploration bonus more.
    pub c_puct: f64,

    /// Simulations run per `action_probabilities` call.
    pub num_simulations: u32,

    /// Seed for tie-breaking at temperature 0.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            c_puct: 1.0,
            num_simulations: 15,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Set the exploration constant.
    pub fn with_c_puct(mut self, c: f64) -> Self {
        self.c_puct = c;
        self
    }

    /// Set the number of simulations per decision.
    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.num_simulations = simulations;
        self
    }

    /// Set the tie-break seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.c_puct.is_finite() || self.c_puct < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "c_puct must be finite and >= 0, got {}",
                self.c_puct
            )));
        }
        if self.num_simulations == 0 {
            return Err(Error::InvalidConfig(
                "num_simulations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
