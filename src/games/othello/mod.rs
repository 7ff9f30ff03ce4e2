//! Othello (Reversi) on a configurable even-sized square board.
//!
//! - Players alternate placing discs that capture straight lines of
//!   opponent discs in any of the eight directions
//! - A player with no capturing placement must pass
//! - The game ends when neither player can place; most discs wins
//!
//! Canonical form negates the board so the player to move always owns `+1`.

mod board;
mod game;

pub use board::Board;
pub use game::OthelloGame;
