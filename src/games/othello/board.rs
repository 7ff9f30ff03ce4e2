//! Othello board representation and move mechanics.

use serde::{Deserialize, Serialize};

/// The eight compass directions as `(row, col)` deltas.
const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

/// An `n x n` Othello board.
///
/// Cells are stored row-major: `+1` for the first player's discs, `-1` for
/// the second player's, `0` for empty. Boards are immutable from the
/// outside; moves return a new board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    n: usize,
    cells: Vec<i8>,
}

impl Board {
    /// Starting position: four discs in the centre.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let mut cells = vec![0; n * n];
        let mid = n / 2;
        cells[(mid - 1) * n + (mid - 1)] = 1;
        cells[mid * n + mid] = 1;
        cells[(mid - 1) * n + mid] = -1;
        cells[mid * n + (mid - 1)] = -1;
        Self { n, cells }
    }

    /// Build a board from raw cells (row-major, length `n * n`).
    ///
    /// Returns `None` if the length is wrong or a cell is not in `{-1, 0, 1}`.
    #[must_use]
    pub fn from_cells(n: usize, cells: Vec<i8>) -> Option<Self> {
        if cells.len() != n * n || cells.iter().any(|c| !(-1..=1).contains(c)) {
            return None;
        }
        Some(Self { n, cells })
    }

    /// Side length.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Raw cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Cell value at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.cells[row * self.n + col]
    }

    /// Number of discs of the given sign.
    #[must_use]
    pub fn count(&self, sign: i8) -> usize {
        self.cells.iter().filter(|&&c| c == sign).count()
    }

    /// Disc difference from `sign`'s point of view.
    #[must_use]
    pub fn diff(&self, sign: i8) -> i32 {
        self.cells.iter().map(|&c| i32::from(c * sign)).sum()
    }

    /// Cells where `sign` may legally place a disc, ascending.
    #[must_use]
    pub fn legal_moves(&self, sign: i8) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&cell| self.cells[cell] == 0 && self.flips_any(cell, sign))
            .collect()
    }

    /// Whether `sign` has at least one legal placement.
    #[must_use]
    pub fn has_legal_move(&self, sign: i8) -> bool {
        (0..self.cells.len()).any(|cell| self.cells[cell] == 0 && self.flips_any(cell, sign))
    }

    /// Place a disc for `sign` at `cell` and flip captured lines.
    ///
    /// The caller is responsible for legality.
    #[must_use]
    pub fn play(&self, cell: usize, sign: i8) -> Self {
        let mut next = self.clone();
        let (row, col) = (cell / self.n, cell % self.n);

        for &(dr, dc) in &DIRECTIONS {
            let run = self.capture_run(row, col, dr, dc, sign);
            for step in 1..=run {
                let r = (row as isize + dr * step as isize) as usize;
                let c = (col as isize + dc * step as isize) as usize;
                next.cells[r * self.n + c] = sign;
            }
        }

        next.cells[cell] = sign;
        next
    }

    /// Same position with every disc colour swapped.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            n: self.n,
            cells: self.cells.iter().map(|&c| -c).collect(),
        }
    }

    fn flips_any(&self, cell: usize, sign: i8) -> bool {
        let (row, col) = (cell / self.n, cell % self.n);
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.capture_run(row, col, dr, dc, sign) > 0)
    }

    /// Number of opponent discs captured in one direction (0 if none).
    fn capture_run(&self, row: usize, col: usize, dr: isize, dc: isize, sign: i8) -> usize {
        let n = self.n as isize;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        let mut run = 0;

        while r >= 0 && r < n && c >= 0 && c < n {
            let value = self.cells[(r * n + c) as usize];
            if value == -sign {
                run += 1;
            } else if value == sign {
                return run;
            } else {
                return 0;
            }
            r += dr;
            c += dc;
        }

        0
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.n {
            write!(f, "{col:>2}")?;
        }
        writeln!(f)?;
        for row in 0..self.n {
            write!(f, "{row:>2}:")?;
            for col in 0..self.n {
                let symbol = match self.get(row, col) {
                    1 => 'X',
                    -1 => 'O',
                    _ => '.',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Rotate a row-major `n x n` grid 90 degrees counter-clockwise.
pub(crate) fn rot90<T: Copy>(n: usize, grid: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(grid.len());
    for i in 0..n {
        for j in 0..n {
            out.push(grid[j * n + (n - 1 - i)]);
        }
    }
    out
}

/// Mirror a row-major `n x n` grid left to right.
pub(crate) fn fliplr<T: Copy>(n: usize, grid: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(grid.len());
    for i in 0..n {
        for j in 0..n {
            out.push(grid[i * n + (n - 1 - j)]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let board = Board::new(6);
        assert_eq!(board.count(1), 2);
        assert_eq!(board.count(-1), 2);
        assert_eq!(board.get(2, 2), 1);
        assert_eq!(board.get(3, 3), 1);
        assert_eq!(board.get(2, 3), -1);
        assert_eq!(board.get(3, 2), -1);
        assert_eq!(board.diff(1), 0);
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::new(4);
        // Centre: (1,1)=X (2,2)=X (1,2)=O (2,1)=O
        assert_eq!(board.legal_moves(1), vec![2, 7, 8, 13]);
        assert_eq!(board.legal_moves(-1), vec![1, 4, 11, 14]);
    }

    #[test]
    fn test_play_flips_line() {
        let board = Board::new(4);
        // X at (0,2) captures O at (1,2).
        let next = board.play(2, 1);
        assert_eq!(next.get(0, 2), 1);
        assert_eq!(next.get(1, 2), 1);
        assert_eq!(next.count(1), 4);
        assert_eq!(next.count(-1), 1);
        // Original untouched.
        assert_eq!(board.count(1), 2);
    }

    #[test]
    fn test_negated() {
        let board = Board::new(4).negated();
        assert_eq!(board.get(1, 1), -1);
        assert_eq!(board.get(1, 2), 1);
    }

    #[test]
    fn test_from_cells_validation() {
        assert!(Board::from_cells(2, vec![0, 1, -1, 0]).is_some());
        assert!(Board::from_cells(2, vec![0, 1, -1]).is_none());
        assert!(Board::from_cells(2, vec![0, 2, -1, 0]).is_none());
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = Board::from_cells(2, vec![1, 1, -1, -1]).unwrap();
        assert!(!board.has_legal_move(1));
        assert!(!board.has_legal_move(-1));
    }

    #[test]
    fn test_rot90_four_times_is_identity() {
        let grid: Vec<u8> = (0..9).collect();
        let mut out = grid.clone();
        for _ in 0..4 {
            out = rot90(3, &out);
        }
        assert_eq!(out, grid);
    }

    #[test]
    fn test_rot90_counter_clockwise() {
        // 1 2
        // 3 4  -> 2 4 / 1 3
        assert_eq!(rot90(2, &[1, 2, 3, 4]), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_fliplr() {
        assert_eq!(fliplr(2, &[1, 2, 3, 4]), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_display() {
        let text = Board::new(4).to_string();
        assert!(text.contains('X'));
        assert!(text.contains('O'));
        assert_eq!(text.lines().count(), 5);
    }
}
