//! Policy-vs-policy evaluation.
//!
//! The coach uses `Arena::play_match` with two `SearchPolicy` players to
//! gate candidate oracles; the CLI uses the same arena for manual play.

#[allow(clippy::module_inception)]
pub mod arena;
pub mod players;

pub use arena::{Arena, MatchResult};
pub use players::{GreedyPolicy, HumanPolicy, Policy, RandomPolicy, SearchPolicy};
