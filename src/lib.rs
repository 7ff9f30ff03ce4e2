//! # othello-zero
//!
//! AlphaZero-style self-play training core for two-player, zero-sum,
//! perfect-information board games, with Othello as the bundled game.
//!
//! ## Design Principles
//!
//! 1. **Narrow seams**: the game is a `RulesEngine`, the evaluator is an
//!    `Oracle`. Search, self-play and gating only see those traits.
//!
//! 2. **Canonical states**: search and oracle always see the position from
//!    the side to move, so one value convention covers both players.
//!
//! 3. **Explicit configuration**: every knob lives in a validated struct
//!    passed to a constructor. No global state.
//!
//! ## Modules
//!
//! - `core`: players and deterministic RNG
//! - `rules`: `RulesEngine` trait and game results
//! - `games`: Othello rules
//! - `nn`: `Oracle` trait, tabular and uniform oracles
//! - `mcts`: PUCT search over hash-keyed statistics
//! - `arena`: head-to-head play and move-selection policies
//! - `training`: self-play episodes, history, checkpoints and the coach
//! - `python`: PyO3 bindings (feature `python`)

pub mod arena;
pub mod core;
pub mod error;
pub mod games;
pub mod mcts;
pub mod nn;
pub mod rules;
pub mod training;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{GameRng, Player};

pub use crate::error::{Error, Result};

pub use crate::rules::{GameResult, RulesEngine, Symmetries};

pub use crate::games::othello::{Board, OthelloGame};

pub use crate::nn::{Oracle, Prediction, TabularOracle, UniformOracle};

pub use crate::mcts::{SearchConfig, SearchEngine, SearchStats, SearchTree};

pub use crate::arena::{
    Arena, GreedyPolicy, HumanPolicy, MatchResult, Policy, RandomPolicy, SearchPolicy,
};

pub use crate::training::{
    play_episode, CheckpointId, CheckpointStore, Coach, CoachConfig, Evaluator,
    IterationReport, TrainingExample, TrainingHistory,
};
