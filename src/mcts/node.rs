//! Per-state and per-edge search statistics.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Statistics for one `(state, action)` pair.
///
/// An edge only exists once it has been traversed, so `q` is always the mean
/// of at least one backed-up value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeStats {
    /// Times this action was taken from the state (N_sa).
    pub visits: u32,

    /// Running mean of backed-up values (Q_sa), in `[-1, 1]`.
    pub q: f64,
}

impl EdgeStats {
    /// Edge after its first backed-up value.
    pub fn first(value: f64) -> Self {
        Self { visits: 1, q: value }
    }

    /// Fold a new value into the running mean.
    pub fn update(&mut self, value: f64) {
        let n = f64::from(self.visits);
        self.q = (n * self.q + value) / (n + 1.0);
        self.visits += 1;
    }
}

/// Statistics for one expanded state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeStats {
    /// Simulations that passed through this state (N_s).
    pub visits: u32,

    /// Masked, renormalized prior (P_s). Zero on illegal actions.
    pub priors: Vec<f32>,

    /// Legality mask (Valid_s). Fixed at expansion.
    pub valid: Vec<bool>,

    /// Traversed edges keyed by action.
    pub edges: FxHashMap<usize, EdgeStats>,
}

impl NodeStats {
    /// Freshly expanded node with no visits.
    pub fn new(priors: Vec<f32>, valid: Vec<bool>) -> Self {
        Self {
            visits: 0,
            priors,
            valid,
            edges: FxHashMap::default(),
        }
    }

    /// Statistics of the edge for `action`, if it has been traversed.
    #[must_use]
    pub fn edge(&self, action: usize) -> Option<&EdgeStats> {
        self.edges.get(&action)
    }

    /// Visit count of `action` (0 if never traversed).
    #[must_use]
    pub fn edge_visits(&self, action: usize) -> u32 {
        self.edges.get(&action).map_or(0, |e| e.visits)
    }

    /// Back up `value` through `action`: update Q_sa, N_sa and N_s together.
    pub fn record(&mut self, action: usize, value: f64) {
        self.edges
            .entry(action)
            .and_modify(|edge| edge.update(value))
            .or_insert_with(|| EdgeStats::first(value));
        self.visits += 1;
    }

    /// Indices of legal actions.
    pub fn legal_actions(&self) -> impl Iterator<Item = usize> + '_ {
        self.valid
            .iter()
            .enumerate()
            .filter_map(|(a, &legal)| legal.then_some(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_running_mean() {
        let mut edge = EdgeStats::first(1.0);
        edge.update(-1.0);
        edge.update(1.0);
        edge.update(1.0);

        assert_eq!(edge.visits, 4);
        assert!((edge.q - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_node_record() {
        let mut node = NodeStats::new(vec![0.5, 0.5, 0.0], vec![true, true, false]);
        assert_eq!(node.visits, 0);
        assert!(node.edge(0).is_none());

        node.record(0, 1.0);
        node.record(0, 0.0);
        node.record(1, -1.0);

        assert_eq!(node.visits, 3);
        assert_eq!(node.edge_visits(0), 2);
        assert_eq!(node.edge_visits(1), 1);
        assert_eq!(node.edge_visits(2), 0);
        assert!((node.edge(0).unwrap().q - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_edge_visits_never_exceed_node_visits() {
        let mut node = NodeStats::new(vec![1.0 / 3.0; 3], vec![true; 3]);
        for i in 0..30 {
            node.record(i % 3, 0.1);
        }
        let total: u32 = (0..3).map(|a| node.edge_visits(a)).sum();
        assert!(total <= node.visits);
    }

    #[test]
    fn test_legal_actions() {
        let node = NodeStats::new(vec![0.5, 0.0, 0.5], vec![true, false, true]);
        assert_eq!(node.legal_actions().collect::<Vec<_>>(), vec![0, 2]);
    }
}
