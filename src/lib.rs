//! Strictly Tic-Tac-Toe - tic-tac-toe engine with a computer opponent
//!
//! A 3x3 game played with icon marks, either by two humans or against
//! the computer.
//!
//! # Architecture
//!
//! - **Games**: board model, win/draw rules, move enumeration and the
//!   computer strategy (`Easy` random, `Hard` one-ply heuristic)
//! - **Session**: setup/play state machine owning all game state
//! - **Driver**: runs the delayed computer move on a tokio timer
//! - **Console**: line-based terminal frontend
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{evaluate, Board, GameOutcome, Mark};
//!
//! let board = Board::from_marks([Some(0), Some(0), Some(0), None, None, None, None, None, None]);
//! match evaluate(&board) {
//!     GameOutcome::Win { mark, line } => {
//!         assert_eq!(mark, Mark(0));
//!         assert_eq!(line.cells(), [0, 1, 2]);
//!     }
//!     other => panic!("expected a win, got {other:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod driver;
mod games;
mod rng;
mod session;

pub mod console;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, DEFAULT_COMPUTER_DELAY_MS};

// Crate-level exports - Randomness
pub use rng::{choose, shuffle, RandomSource, SequenceRng, SessionRng};

// Crate-level exports - Session control
pub use driver::SessionDriver;
pub use session::{
    Ack, GameMode, GameSession, PendingMove, Rejection, SessionEvent, SessionPhase, SessionSnapshot,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    available_moves, check_winner, choose_move, evaluate, find_strategic_move, find_winning_move,
    is_draw, is_full, is_winning_move, Board, BoardError, Difficulty, GameOutcome, Icon,
    IconPalette, Line, Mark, Position, Seat, Square, BOARD_SIZE, DEFAULT_RANDOM_ICONS, LINES,
};
