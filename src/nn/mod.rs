//! State-evaluation oracles.
//!
//! ## Overview
//!
//! - **Trait**: `Oracle` (predict, train, snapshot save/load)
//! - **Tabular**: `TabularOracle` learns mean targets per canonical state
//! - **Baseline**: `UniformOracle` for testing
//!
//! Neural oracles live outside the crate and plug in through the same trait
//! (see the `python` feature).

pub mod tabular;
pub mod traits;

pub use tabular::TabularOracle;
pub use traits::{Oracle, Prediction, UniformOracle};
