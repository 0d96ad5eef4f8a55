//! Tic-tac-toe engine: board, rules, icons and the computer strategy.

pub mod icons;
pub mod position;
pub mod rules;
pub mod strategy;
pub mod types;

pub use icons::{Icon, IconPalette, DEFAULT_RANDOM_ICONS};
pub use position::Position;
pub use rules::{available_moves, check_winner, evaluate, is_draw, is_full, GameOutcome, Line, LINES};
pub use strategy::{choose_move, find_strategic_move, find_winning_move, is_winning_move, Difficulty};
pub use types::{Board, BoardError, Mark, Seat, Square, BOARD_SIZE};
