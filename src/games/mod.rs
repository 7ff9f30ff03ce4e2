//! Concrete game implementations.

pub mod othello;
