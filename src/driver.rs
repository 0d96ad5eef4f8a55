//! Timer-backed wrapper around [`GameSession`].
//!
//! The driver shares the session behind a mutex so that the delayed
//! computer move, which lands from a spawned tokio task, is serialized
//! with whatever input the frontend feeds in meanwhile.

use crate::config::GameConfig;
use crate::games::tictactoe::{Difficulty, Mark};
use crate::session::{Ack, GameMode, GameSession, PendingMove, SessionEvent, SessionSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Shared handle that runs a session and its computer-move timer.
#[derive(Debug, Clone)]
pub struct SessionDriver {
    session: Arc<Mutex<GameSession>>,
    delay: Duration,
}

impl SessionDriver {
    /// Wraps a session; computer moves land `delay` after being scheduled.
    pub fn new(session: GameSession, delay: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            delay,
        }
    }

    /// Builds a session from `config` with an event channel attached.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = GameSession::new(config).with_events(tx);
        info!(delay_ms = config.computer_delay_ms(), "Session driver ready");
        (Self::new(session, config.computer_delay()), rx)
    }

    fn lock(&self) -> MutexGuard<'_, GameSession> {
        lock_session(&self.session)
    }

    /// Runs `f` against the session under the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        f(&self.lock())
    }

    /// Copies the observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// See [`GameSession::start_game`].
    pub fn start_game(&self, mode: GameMode, difficulty: Option<Difficulty>) -> Ack {
        self.lock().start_game(mode, difficulty)
    }

    /// See [`GameSession::choose_mode`].
    pub fn choose_mode(&self, mode: GameMode) -> Ack {
        self.lock().choose_mode(mode)
    }

    /// See [`GameSession::choose_difficulty`].
    pub fn choose_difficulty(&self, difficulty: Difficulty) -> Ack {
        self.lock().choose_difficulty(difficulty)
    }

    /// See [`GameSession::select_mark`].
    pub fn select_mark(&self, mark: Mark) -> Ack {
        self.lock().select_mark(mark)
    }

    /// Applies a human move and, if the computer is now due, starts its timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn apply_move(&self, index: usize) -> Ack {
        let ack = self.lock().apply_move(index);
        if let Ack::ComputerScheduled(pending) = ack {
            self.spawn_computer_move(pending);
        }
        ack
    }

    /// See [`GameSession::reset_board`].
    pub fn reset_board(&self) -> Ack {
        self.lock().reset_board()
    }

    /// See [`GameSession::change_mode`].
    pub fn change_mode(&self) -> Ack {
        self.lock().change_mode()
    }

    #[instrument(skip(self))]
    fn spawn_computer_move(&self, pending: PendingMove) {
        let session = Arc::clone(&self.session);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let ack = lock_session(&session).complete_computer_move(pending);
            debug!(?pending, ?ack, "Computer move fired");
        });
    }
}

fn lock_session(session: &Mutex<GameSession>) -> MutexGuard<'_, GameSession> {
    // Session mutations are plain field writes, so a poisoned lock still
    // guards a usable session.
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
