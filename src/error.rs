//! Crate-wide error type.
//!
//! Contract violations by collaborators (oracle, policies, rule engine) are
//! fatal for the current episode or game and surface here. Recoverable
//! anomalies such as degenerate priors never reach this type.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::Player;

#[derive(Error, Debug)]
pub enum Error {
    #[error("oracle returned {actual} priors, expected {expected}")]
    PriorLength { expected: usize, actual: usize },

    #[error("illegal action {action} chosen for {player}")]
    IllegalAction { action: usize, player: Player },

    #[error("action {action} out of range for action space of size {size}")]
    ActionOutOfRange { action: usize, size: usize },

    #[error("rule engine reported no legal actions for a non-terminal state")]
    NoLegalActions,

    #[error("cannot sample from a distribution with no mass")]
    EmptyDistribution,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("resume aborted: example history {0} not found")]
    ResumeAborted(PathBuf),

    #[error("oracle failure: {0}")]
    Oracle(String),
}

pub type Result<T> = std::result::Result<T, Error>;
