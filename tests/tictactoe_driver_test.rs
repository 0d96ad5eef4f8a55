//! Tests for the timer-driven computer move.

use std::time::Duration;
use strictly_tictactoe::{
    Ack, Board, Difficulty, GameConfig, GameMode, GameSession, Mark, Rejection, Seat, SequenceRng,
    SessionDriver, SessionEvent, SessionPhase, Square,
};
use tokio::sync::mpsc;

const DELAY: Duration = Duration::from_millis(500);

fn single_player_driver() -> SessionDriver {
    let session = GameSession::with_rng(&GameConfig::default(), Box::new(SequenceRng::default()));
    let driver = SessionDriver::new(session, DELAY);
    driver.start_game(GameMode::Single, Some(Difficulty::Hard));
    driver.select_mark(Mark(0));
    driver
}

#[tokio::test(start_paused = true)]
async fn test_computer_moves_after_delay() {
    let driver = single_player_driver();
    assert!(matches!(driver.apply_move(0), Ack::ComputerScheduled(_)));
    assert!(driver.snapshot().thinking);

    tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
    let waiting = driver.snapshot();
    assert!(waiting.thinking);
    assert!(waiting.board.is_empty(4));

    tokio::time::sleep(Duration::from_millis(2)).await;
    let done = driver.snapshot();
    assert!(!done.thinking);
    assert_eq!(done.board.get(4), Some(Square::Occupied(Mark(1))));
    assert_eq!(done.to_move, Seat::First);
}

#[tokio::test(start_paused = true)]
async fn test_input_blocked_while_thinking() {
    let driver = single_player_driver();
    driver.apply_move(0);

    assert_eq!(driver.apply_move(1), Ack::Rejected(Rejection::ComputerThinking));
    assert_eq!(driver.reset_board(), Ack::Rejected(Rejection::ComputerThinking));

    tokio::time::sleep(DELAY * 2).await;
    assert!(driver.apply_move(1).is_accepted());
}

#[tokio::test(start_paused = true)]
async fn test_mode_change_discards_pending_move() {
    let driver = single_player_driver();
    driver.apply_move(0);
    assert_eq!(driver.change_mode(), Ack::Accepted);

    tokio::time::sleep(DELAY * 2).await;
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::SelectingMode);
    assert_eq!(snapshot.board, Board::new());
    assert!(!snapshot.thinking);
}

#[tokio::test(start_paused = true)]
async fn test_events_bracket_the_computer_move() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = GameSession::with_rng(&GameConfig::default(), Box::new(SequenceRng::default()))
        .with_events(tx);
    let driver = SessionDriver::new(session, DELAY);
    driver.start_game(GameMode::Single, Some(Difficulty::Hard));
    driver.select_mark(Mark(0));
    while rx.try_recv().is_ok() {}

    driver.apply_move(0);
    tokio::time::sleep(DELAY * 2).await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    let started = events
        .iter()
        .position(|e| *e == SessionEvent::ThinkingChanged(true))
        .expect("thinking started");
    let stopped = events
        .iter()
        .position(|e| *e == SessionEvent::ThinkingChanged(false))
        .expect("thinking stopped");
    assert!(started < stopped);
    assert!(events[started..stopped]
        .iter()
        .any(|e| matches!(e, SessionEvent::BoardChanged(board) if !board.is_empty(4))));
}
