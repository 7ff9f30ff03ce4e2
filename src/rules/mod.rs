//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each game state
//! - How actions transform state
//! - Canonical form, symmetries and terminal outcomes
//!
//! Search, self-play and the arena call into `RulesEngine` but never
//! interpret game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine, Symmetries};
