//! Monte Carlo Tree Search guided by an oracle.
//!
//! ## Overview
//!
//! - **PUCT selection**: priors from the oracle, Q from backed-up values
//! - **Hash-keyed statistics**: transpositions share one entry
//! - **Terminal cache**: each state is checked against the rules once
//! - **Temperature**: visit counts become a move distribution
//!
//! ## Usage
//!
//! ```rust
//! use othello_zero::games::othello::OthelloGame;
//! use othello_zero::mcts::{SearchConfig, SearchEngine};
//! use othello_zero::nn::UniformOracle;
//! use othello_zero::rules::RulesEngine;
//!
//! let game = OthelloGame::new(4);
//! let oracle = UniformOracle::new(game.action_size());
//! let mut search = SearchEngine::new(&game, &oracle, SearchConfig::default());
//!
//! let probs = search
//!     .action_probabilities(&game.initial_state(), 1.0)
//!     .unwrap();
//! assert_eq!(probs.len(), game.action_size());
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::SearchConfig;
pub use node::{EdgeStats, NodeStats};
pub use policy::{puct_score, select_puct, visits_to_policy};
pub use search::SearchEngine;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
