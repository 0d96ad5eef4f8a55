//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// Opaque identifier of the mark a player places.
///
/// Inside a session this is an index into the icon palette; the
/// engine itself only ever compares marks for equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("#{_0}")]
pub struct Mark(pub u8);

impl Mark {
    /// Returns the raw identifier as a palette index.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// Which of the two players holds the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Seat {
    /// Player 1 (always moves first).
    #[display("Player 1")]
    First,
    /// Player 2 (the computer in single-player mode).
    #[display("Player 2")]
    Second,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Reasons a placement on the board can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Index is not in `0..9`.
    #[display("Position {_0} is out of bounds (must be 0-8)")]
    OutOfBounds(#[error(not(source))] usize),
    /// Square already holds a mark.
    #[display("Square {_0} is already occupied")]
    Occupied(#[error(not(source))] usize),
}

/// 3x3 tic-tac-toe board.
///
/// Squares only ever go from empty to occupied; the single way back is
/// [`Board::clear`], which empties all of them at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw mark identifiers, `None` meaning empty.
    ///
    /// Useful for describing positions literally, e.g. in tests or
    /// when restoring a snapshot.
    pub fn from_marks(cells: [Option<u8>; BOARD_SIZE]) -> Self {
        Self {
            squares: cells.map(|cell| match cell {
                Some(id) => Square::Occupied(Mark(id)),
                None => Square::Empty,
            }),
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty. Out-of-range positions are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Places a mark on an empty square.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: usize, mark: Mark) -> Result<(), BoardError> {
        match self.squares.get_mut(pos) {
            None => Err(BoardError::OutOfBounds(pos)),
            Some(Square::Occupied(_)) => Err(BoardError::Occupied(pos)),
            Some(square) => {
                *square = Square::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Returns a copy of this board with `mark` placed at `pos`.
    ///
    /// Used for one-ply lookahead; the original board is untouched.
    pub fn with_mark(&self, pos: usize, mark: Mark) -> Result<Self, BoardError> {
        let mut next = *self;
        next.place(pos, mark)?;
        Ok(next)
    }

    /// Empties every square.
    pub fn clear(&mut self) {
        self.squares = [Square::Empty; BOARD_SIZE];
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Counts occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares
            .iter()
            .filter(|s| matches!(s, Square::Occupied(_)))
            .count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// `label` renders an occupied square; empty squares show their
    /// 1-based position number.
    pub fn display_with(&self, label: impl Fn(Mark) -> String) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => label(mark),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied(), 0);
        assert!((0..BOARD_SIZE).all(|pos| board.is_empty(pos)));
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = Board::new();
        board.place(4, Mark(0)).unwrap();
        assert_eq!(board.place(4, Mark(1)), Err(BoardError::Occupied(4)));
        assert_eq!(board.get(4), Some(Square::Occupied(Mark(0))));
    }

    #[test]
    fn test_place_rejects_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.place(9, Mark(0)), Err(BoardError::OutOfBounds(9)));
        assert!(!board.is_empty(9));
    }

    #[test]
    fn test_with_mark_leaves_original() {
        let board = Board::new();
        let next = board.with_mark(0, Mark(3)).unwrap();
        assert!(board.is_empty(0));
        assert_eq!(next.get(0), Some(Square::Occupied(Mark(3))));
    }

    #[test]
    fn test_clear_empties_all() {
        let mut board = Board::from_marks([Some(0), Some(1), Some(0), None, None, None, None, None, Some(1)]);
        board.clear();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_with_labels() {
        let board = Board::from_marks([Some(0), None, None, None, Some(1), None, None, None, None]);
        let text = board.display_with(|m| if m == Mark(0) { "X".into() } else { "O".into() });
        assert_eq!(text, "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_seat_opponent() {
        assert_eq!(Seat::First.opponent(), Seat::Second);
        assert_eq!(Seat::Second.opponent(), Seat::First);
    }
}
