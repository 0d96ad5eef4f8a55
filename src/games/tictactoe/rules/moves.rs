//! Move enumeration.

use super::super::Board;
use tracing::instrument;

/// Lists the indices of every empty square, ascending.
///
/// Safe on any board, terminal ones included; a full board yields
/// an empty list.
#[instrument(skip(board))]
pub fn available_moves(board: &Board) -> Vec<usize> {
    board
        .squares()
        .iter()
        .enumerate()
        .filter(|(_, square)| square.mark().is_none())
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_offers_everything() {
        assert_eq!(available_moves(&Board::new()), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_only_empty_positions() {
        let board = Board::from_marks([
            Some(0), None, Some(1),
            None, Some(0), None,
            Some(1), None, Some(0),
        ]);
        assert_eq!(available_moves(&board), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_full_board_offers_nothing() {
        let board = Board::from_marks([
            Some(0), Some(1), Some(0),
            Some(1), Some(0), Some(1),
            Some(0), Some(1), Some(0),
        ]);
        assert!(available_moves(&board).is_empty());
    }
}
