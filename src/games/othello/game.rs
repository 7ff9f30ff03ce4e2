//! Othello rules.

use smallvec::SmallVec;

use crate::core::Player;
use crate::rules::{GameResult, RulesEngine, Symmetries};

use super::board::{fliplr, rot90, Board};

/// Othello on an `n x n` board.
///
/// Actions `0..n*n` place a disc on the cell with that row-major index;
/// action `n*n` is the pass, legal only when no placement is.
#[derive(Clone, Debug)]
pub struct OthelloGame {
    n: usize,
}

impl OthelloGame {
    /// Create a game on an `n x n` board.
    ///
    /// # Panics
    ///
    /// Panics unless `n` is even and at least 4.
    pub fn new(n: usize) -> Self {
        assert!(n >= 4 && n % 2 == 0, "Board size must be even and >= 4");
        Self { n }
    }

    /// Board side length.
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.n
    }

    /// Index of the pass action.
    #[must_use]
    pub fn pass_action(&self) -> usize {
        self.n * self.n
    }
}

impl RulesEngine for OthelloGame {
    type State = Board;
    type Key = Board;

    fn action_size(&self) -> usize {
        self.n * self.n + 1
    }

    fn initial_state(&self) -> Board {
        Board::new(self.n)
    }

    fn legal_mask(&self, state: &Board, player: Player) -> Vec<bool> {
        let mut mask = vec![false; self.action_size()];
        let moves = state.legal_moves(player.sign());
        if moves.is_empty() {
            mask[self.pass_action()] = true;
        }
        for cell in moves {
            mask[cell] = true;
        }
        mask
    }

    fn apply(&self, state: &Board, player: Player, action: usize) -> (Board, Player) {
        if action == self.pass_action() {
            return (state.clone(), player.opponent());
        }
        (state.play(action, player.sign()), player.opponent())
    }

    fn canonical(&self, state: &Board, player: Player) -> Board {
        match player {
            Player::First => state.clone(),
            Player::Second => state.negated(),
        }
    }

    fn terminal_value(&self, state: &Board, player: Player) -> Option<GameResult> {
        if state.has_legal_move(1) || state.has_legal_move(-1) {
            return None;
        }
        let diff = state.diff(player.sign());
        Some(match diff.cmp(&0) {
            std::cmp::Ordering::Greater => GameResult::Win,
            std::cmp::Ordering::Less => GameResult::Loss,
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }

    fn key(&self, state: &Board) -> Board {
        state.clone()
    }

    fn symmetries(&self, state: &Board, policy: &[f32]) -> Symmetries<Board> {
        debug_assert_eq!(policy.len(), self.action_size());
        let n = self.n;
        let pass = policy[self.pass_action()];
        let mut out = SmallVec::new();

        let mut cells = state.cells().to_vec();
        let mut pi = policy[..n * n].to_vec();
        for _ in 0..4 {
            cells = rot90(n, &cells);
            pi = rot90(n, &pi);

            for mirror in [true, false] {
                let (c, p) = if mirror {
                    (fliplr(n, &cells), fliplr(n, &pi))
                } else {
                    (cells.clone(), pi.clone())
                };
                let mut full = p;
                full.push(pass);
                if let Some(board) = Board::from_cells(n, c) {
                    out.push((board, full));
                }
            }
        }

        out
    }

    fn score(&self, state: &Board, player: Player) -> i32 {
        state.diff(player.sign())
    }

    fn render(&self, state: &Board) -> String {
        state.to_string()
    }
}
