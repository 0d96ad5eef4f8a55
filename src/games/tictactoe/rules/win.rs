//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use super::draw::is_full;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three board indices that win when owned by a single mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([usize; 3]);

impl Line {
    /// The indices of this line, ascending.
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    /// True if `pos` lies on this line.
    pub fn contains(&self, pos: usize) -> bool {
        self.0.contains(&pos)
    }
}

impl From<[Position; 3]> for Line {
    fn from([a, b, c]: [Position; 3]) -> Self {
        Line([a.to_index(), b.to_index(), c.to_index()])
    }
}

/// Every winning line, in canonical scan order.
pub const LINES: [Line; 8] = [
    // Rows
    Line([0, 1, 2]),
    Line([3, 4, 5]),
    Line([6, 7, 8]),
    // Columns
    Line([0, 3, 6]),
    Line([1, 4, 7]),
    Line([2, 5, 8]),
    // Diagonals
    Line([0, 4, 8]),
    Line([2, 4, 6]),
];

/// Evaluated state of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No line is complete and at least one square is empty.
    InProgress,
    /// `mark` owns every square of `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The first complete line in scan order.
        line: Line,
    },
    /// Every square is occupied and no line is complete.
    Draw,
}

impl GameOutcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameOutcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning line, if any.
    pub fn line(&self) -> Option<Line> {
        match self {
            GameOutcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Checks if there is a winner on the board.
///
/// Lines are scanned in [`LINES`] order and the first complete one is
/// returned, even when a (test-only) board completes several.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Mark, Line)> {
    for line in LINES {
        let [a, b, c] = line.cells();
        let sq = board.get(a);
        if let Some(Square::Occupied(mark)) = sq
            && sq == board.get(b)
            && sq == board.get(c)
        {
            return Some((mark, line));
        }
    }

    None
}

/// Classifies the board as won, drawn or still in progress.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameOutcome {
    match check_winner(board) {
        Some((mark, line)) => GameOutcome::Win { mark, line },
        None if is_full(board) => GameOutcome::Draw,
        None => GameOutcome::InProgress,
    }
}
