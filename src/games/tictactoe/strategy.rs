//! Computer move selection.
//!
//! Two difficulties are offered. `Easy` picks uniformly among the open
//! squares. `Hard` is a one-ply heuristic: take a winning square, else
//! block the opponent's winning square, else play the most valuable open
//! square (center, corners, edges). It does not look for forks and can be
//! beaten by a forcing sequence.

use super::position::Position;
use super::rules::{available_moves, check_winner};
use super::types::{Board, Mark};
use crate::rng::{choose, RandomSource};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, instrument};

/// Computer opponent strength.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random open square.
    #[default]
    Easy,
    /// Win, block, then positional preference.
    Hard,
}

/// True if placing `mark` at `position` completes a line for `mark`.
///
/// Occupied or out-of-range positions are never winning moves.
pub fn is_winning_move(board: &Board, position: usize, mark: Mark) -> bool {
    board
        .with_mark(position, mark)
        .ok()
        .and_then(|next| check_winner(&next))
        .is_some_and(|(winner, _)| winner == mark)
}

/// First open square, in ascending order, that wins immediately for `mark`.
#[instrument(skip(board))]
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    available_moves(board)
        .into_iter()
        .find(|&pos| is_winning_move(board, pos, mark))
}

/// First open square in [`Position::PREFERENCE`] order.
///
/// Falls back to the first available square; `None` on a full board.
#[instrument(skip(board))]
pub fn find_strategic_move(board: &Board) -> Option<usize> {
    Position::PREFERENCE
        .iter()
        .map(|pos| pos.to_index())
        .find(|&pos| board.is_empty(pos))
        .or_else(|| available_moves(board).first().copied())
}

/// Chooses the computer's next square.
///
/// Returns `None` only when the board has no open square; callers are
/// expected to check for a terminal board first.
#[instrument(skip(board, rng))]
pub fn choose_move(
    board: &Board,
    computer: Mark,
    opponent: Mark,
    difficulty: Difficulty,
    rng: &mut (impl RandomSource + ?Sized),
) -> Option<usize> {
    let choice = match difficulty {
        Difficulty::Easy => choose(rng, &available_moves(board)).copied(),
        Difficulty::Hard => find_winning_move(board, computer)
            .or_else(|| find_winning_move(board, opponent))
            .or_else(|| find_strategic_move(board)),
    };
    debug!(?choice, "Computer move chosen");
    choice
}
