//! Hash-keyed search statistics.
//!
//! Search over a game graph rather than a tree: the same canonical state
//! reached by two move orders shares one `NodeStats` entry. Terminal status
//! is cached separately, so states that are visited but never expanded
//! (terminal ones) still avoid repeated rules-engine checks.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::rules::GameResult;

use super::node::NodeStats;

/// Statistics store for one search context.
#[derive(Clone, Debug)]
pub struct SearchTree<K: Eq + Hash> {
    /// Expanded states.
    nodes: FxHashMap<K, NodeStats>,

    /// Terminal status per state (`None` = non-terminal), cached on first
    /// visit.
    terminal: FxHashMap<K, Option<GameResult>>,
}

impl<K: Eq + Hash> Default for SearchTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> SearchTree<K> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            terminal: FxHashMap::default(),
        }
    }

    /// Whether `key` has been expanded.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Get an expanded node.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&NodeStats> {
        self.nodes.get(key)
    }

    /// Get an expanded node mutably.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut NodeStats> {
        self.nodes.get_mut(key)
    }

    /// Record a freshly expanded node.
    pub fn insert(&mut self, key: K, node: NodeStats) {
        self.nodes.insert(key, node);
    }

    /// Cached terminal status: `None` if never checked.
    #[inline]
    #[must_use]
    pub fn terminal(&self, key: &K) -> Option<Option<GameResult>> {
        self.terminal.get(key).copied()
    }

    /// Cache the terminal status of `key`.
    pub fn set_terminal(&mut self, key: K, result: Option<GameResult>) {
        self.terminal.insert(key, result);
    }

    /// Visit count per action at `key`, zeros if never expanded.
    #[must_use]
    pub fn visit_counts(&self, key: &K, action_size: usize) -> Vec<u32> {
        match self.nodes.get(key) {
            Some(node) => (0..action_size).map(|a| node.edge_visits(a)).collect(),
            None => vec![0; action_size],
        }
    }

    /// Number of expanded states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing has been expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the store.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            edge_count: self.nodes.values().map(|n| n.edges.len()).sum(),
            terminal_count: self.terminal.values().filter(|t| t.is_some()).count(),
            cached_count: self.terminal.len(),
        }
    }

    /// Drop all statistics.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.terminal.clear();
    }
}

/// Statistics about a search store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Expanded states.
    pub node_count: usize,

    /// Traversed `(state, action)` pairs.
    pub edge_count: usize,

    /// Cached states that are terminal.
    pub terminal_count: usize,

    /// States with cached terminal status.
    pub cached_count: usize,
}
