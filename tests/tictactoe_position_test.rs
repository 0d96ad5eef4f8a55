//! Tests for tic-tac-toe position enum.

use strictly_tictactoe::{Board, Mark, Position};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_valid_moves_empty_board() {
    let board = Board::new();
    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 9); // All positions valid on empty board
}

#[test]
fn test_valid_moves_filters_occupied() {
    let mut board = Board::new();
    board.place(0, Mark(0)).unwrap();
    board.place(4, Mark(1)).unwrap();

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7); // 2 occupied, 7 free
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}

#[test]
fn test_corners_and_edges_partition_the_rim() {
    let corners = Position::ALL.iter().filter(|p| p.is_corner()).count();
    let edges = Position::ALL.iter().filter(|p| p.is_edge()).count();
    assert_eq!((corners, edges), (4, 4));
    assert!(!Position::Center.is_corner() && !Position::Center.is_edge());
}

#[test]
fn test_labels() {
    assert_eq!(Position::MiddleRight.to_string(), "Middle-right");
    assert_eq!(Position::from_label_or_number("center"), Some(Position::Center));
}
