//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Simulations performed.
    pub simulations: u32,

    /// States expanded through the oracle.
    pub oracle_calls: u32,

    /// Simulations that ended on a terminal state.
    pub terminal_hits: u32,

    /// Expansions where the oracle put no mass on legal actions.
    pub prior_fallbacks: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add another context's counters into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.simulations += other.simulations;
        self.oracle_calls += other.oracle_calls;
        self.terminal_hits += other.terminal_hits;
        self.prior_fallbacks += other.prior_fallbacks;
        self.time_us += other.time_us;
    }

    /// Calculate simulations per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.simulations, 0);
        assert_eq!(stats.oracle_calls, 0);
    }

    #[test]
    fn test_stats_simulations_per_second() {
        let mut stats = SearchStats::new();
        stats.simulations = 1000;
        stats.time_us = 1_000_000; // 1 second

        assert_eq!(stats.simulations_per_second(), 1000.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.simulations = 100;
        stats.prior_fallbacks = 3;

        stats.reset();

        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn test_stats_merge() {
        let mut total = SearchStats::new();
        let part = SearchStats {
            simulations: 10,
            oracle_calls: 4,
            terminal_hits: 2,
            prior_fallbacks: 1,
            time_us: 50,
        };
        total.merge(&part);
        total.merge(&part);

        assert_eq!(total.simulations, 20);
        assert_eq!(total.oracle_calls, 8);
        assert_eq!(total.time_us, 100);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = SearchStats::new();
        stats.simulations = 42;

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: SearchStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats, deserialized);
    }
}
