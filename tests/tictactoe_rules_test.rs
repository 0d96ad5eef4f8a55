//! Tests for board evaluation and move enumeration.

use strictly_tictactoe::{
    available_moves, check_winner, evaluate, is_draw, Board, GameOutcome, Mark, Square, LINES,
};

/// Every assignment of {empty, mark 0, mark 1} to the nine squares.
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3u32.pow(9)).map(|mut code| {
        let mut cells = [None; 9];
        for cell in cells.iter_mut() {
            *cell = match code % 3 {
                0 => None,
                d => Some((d - 1) as u8),
            };
            code /= 3;
        }
        Board::from_marks(cells)
    })
}

fn has_complete_line(board: &Board) -> bool {
    LINES.iter().any(|line| {
        let [a, b, c] = line.cells();
        let sq = board.get(a).and_then(Square::mark);
        sq.is_some() && sq == board.get(b).and_then(Square::mark) && sq == board.get(c).and_then(Square::mark)
    })
}

#[test]
fn test_top_row_win_for_any_mark() {
    for id in [0u8, 1, 7, 255] {
        let board = Board::from_marks([Some(id), Some(id), Some(id), None, None, None, None, None, None]);
        assert_eq!(
            evaluate(&board),
            GameOutcome::Win {
                mark: Mark(id),
                line: LINES[0]
            }
        );
    }
}

#[test]
fn test_vertical_and_diagonal_wins() {
    let column = Board::from_marks([Some(1), None, None, Some(1), None, None, Some(1), None, None]);
    assert_eq!(evaluate(&column).line().map(|l| l.cells()), Some([0, 3, 6]));

    let diagonal = Board::from_marks([Some(0), None, None, None, Some(0), None, None, None, Some(0)]);
    assert_eq!(evaluate(&diagonal).line().map(|l| l.cells()), Some([0, 4, 8]));
}

#[test]
fn test_empty_board_in_progress() {
    assert_eq!(evaluate(&Board::new()), GameOutcome::InProgress);
    assert_eq!(check_winner(&Board::new()), None);
}

#[test]
fn test_evaluate_over_every_board() {
    for board in all_boards() {
        let outcome = evaluate(&board);
        let full = available_moves(&board).is_empty();
        match (has_complete_line(&board), full) {
            (false, false) => assert_eq!(outcome, GameOutcome::InProgress, "{board:?}"),
            (false, true) => {
                assert_eq!(outcome, GameOutcome::Draw, "{board:?}");
                assert!(is_draw(&board));
            }
            (true, _) => {
                let GameOutcome::Win { mark, line } = outcome else {
                    panic!("expected win for {board:?}");
                };
                assert!(line.cells().iter().all(|&i| board.get(i) == Some(Square::Occupied(mark))));
                // First complete line in scan order is the one reported.
                let first = LINES
                    .iter()
                    .find(|l| {
                        let [a, b, c] = l.cells();
                        let sq = board.get(a).and_then(Square::mark);
                        sq.is_some()
                            && sq == board.get(b).and_then(Square::mark)
                            && sq == board.get(c).and_then(Square::mark)
                    })
                    .copied();
                assert_eq!(Some(line), first);
            }
        }
    }
}

#[test]
fn test_available_moves_over_every_board() {
    for board in all_boards() {
        let moves = available_moves(&board);
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
        for i in 0..9 {
            assert_eq!(moves.contains(&i), board.is_empty(i));
        }
    }
}

#[test]
fn test_available_moves_extremes() {
    assert_eq!(available_moves(&Board::new()), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    let full = Board::from_marks([
        Some(0), Some(1), Some(0),
        Some(1), Some(0), Some(1),
        Some(0), Some(1), Some(0),
    ]);
    assert!(available_moves(&full).is_empty());
}
