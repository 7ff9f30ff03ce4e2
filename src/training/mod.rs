//! Self-play training loop.
//!
//! ## Overview
//!
//! - **Episodes**: `play_episode` turns one self-play game into labeled
//!   examples, one per board symmetry
//! - **History**: `TrainingHistory` keeps the last `history_window`
//!   iterations of examples and persists them with bincode
//! - **Checkpoints**: `CheckpointStore` names oracle snapshots
//! - **Coach**: `Coach` runs self-play, training and gated evaluation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use othello_zero::games::othello::OthelloGame;
//! use othello_zero::nn::TabularOracle;
//! use othello_zero::rules::RulesEngine;
//! use othello_zero::training::{Coach, CoachConfig};
//!
//! let config = CoachConfig::default().with_board_size(4).with_iterations(2);
//! let game = OthelloGame::new(config.board_size);
//! let oracle = TabularOracle::new(game.action_size());
//! let previous = TabularOracle::new(game.action_size());
//!
//! let mut coach = Coach::new(game, oracle, previous, config).unwrap();
//! for report in coach.learn().unwrap() {
//!     println!("{}: accepted={}", report.iteration, report.accepted);
//! }
//! ```

pub mod checkpoint;
pub mod coach;
pub mod config;
pub mod episode;
pub mod example;
pub mod history;

pub use checkpoint::{examples_path, CheckpointId, CheckpointStore};
pub use coach::{accepts_candidate, ArenaEvaluator, Coach, Evaluator, IterationReport};
pub use config::CoachConfig;
pub use episode::{play_episode, temperature_for_ply};
pub use example::{PendingExample, TrainingExample};
pub use history::TrainingHistory;
