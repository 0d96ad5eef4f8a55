//! Game session controller.
//!
//! A [`GameSession`] owns everything a running game needs: setup phase,
//! mode, difficulty, marks, board, turn, outcome and the computer's
//! "thinking" flag. All mutation goes through its operations, which never
//! fail loudly: an operation that does not apply in the current state is
//! answered with [`Ack::Rejected`] and leaves the session untouched.
//!
//! The computer's move is two-step. A human move that hands the turn to
//! the computer returns [`Ack::ComputerScheduled`] with a [`PendingMove`];
//! whoever owns the clock (see [`crate::SessionDriver`]) calls
//! [`GameSession::complete_computer_move`] once the delay has passed.
//! Resets and mode changes advance the session epoch, so a pending move
//! issued before them is recognised as stale and ignored.

use crate::config::GameConfig;
use crate::games::tictactoe::{
    choose_move, evaluate, Board, Difficulty, GameOutcome, Icon, IconPalette, Line, Mark, Seat,
    BOARD_SIZE,
};
use crate::rng::{choose, RandomSource, SessionRng};
use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Single player against the computer, or two humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// Human (player 1) against the computer (player 2).
    Single,
    /// Two humans sharing the board.
    Multi,
}

/// Where the session is in its setup/play cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SessionPhase {
    /// Waiting for a game mode.
    #[display("selecting mode")]
    SelectingMode,
    /// Single-player: waiting for the computer's difficulty.
    #[display("selecting difficulty")]
    SelectingDifficulty,
    /// Waiting for player 1's mark.
    #[display("selecting player 1 mark")]
    SelectingMarkP1,
    /// Two-player: waiting for player 2's mark.
    #[display("selecting player 2 mark")]
    SelectingMarkP2,
    /// Marks assigned; moves are accepted.
    #[display("playing")]
    Playing,
}

/// Why an operation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// The operation does not apply in this phase.
    #[display("not available while {_0}")]
    WrongPhase(SessionPhase),
    /// Board index outside `0..9`.
    #[display("position {_0} is off the board")]
    OutOfBounds(usize),
    /// Target square already holds a mark.
    #[display("square {_0} is already occupied")]
    SquareOccupied(usize),
    /// The game has been won or drawn.
    #[display("game is already over")]
    GameOver,
    /// Single-player and the computer is to move.
    #[display("it is the computer's turn")]
    ComputerTurn,
    /// A computer move is pending.
    #[display("computer is thinking")]
    ComputerThinking,
    /// Mark is not part of the current palette.
    #[display("mark {_0} is not in the palette")]
    UnknownMark(Mark),
    /// Player 1 already holds this mark.
    #[display("mark {_0} is already taken")]
    MarkTaken(Mark),
    /// The pending move was issued before a reset or mode change.
    #[display("pending move is stale")]
    StaleMove,
}

/// A computer move waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct PendingMove {
    /// Session epoch at scheduling time.
    pub ticket: u64,
    /// Square the computer chose.
    pub position: usize,
}

/// Acknowledgement of a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// Applied.
    Accepted,
    /// Applied, and the computer now owes a move.
    ComputerScheduled(PendingMove),
    /// Ignored; the session is unchanged.
    Rejected(Rejection),
}

impl Ack {
    /// True unless rejected.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Ack::Rejected(_))
    }
}

/// Changes the presentation layer may react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Setup/play phase changed.
    PhaseChanged(SessionPhase),
    /// A square was filled or the board was cleared.
    BoardChanged(Board),
    /// The turn passed to another seat.
    TurnChanged(Seat),
    /// The evaluated outcome changed.
    OutcomeChanged(GameOutcome),
    /// A line was completed; time to celebrate.
    Celebrate {
        /// Winning mark.
        mark: Mark,
        /// Line to highlight.
        line: Line,
    },
    /// The computer started or stopped thinking.
    ThinkingChanged(bool),
}

/// Serializable view of a session for polling frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: SessionPhase,
    /// Selected mode.
    pub mode: Option<GameMode>,
    /// Selected difficulty (single-player only).
    pub difficulty: Option<Difficulty>,
    /// Icons available this game.
    pub palette: Vec<Icon>,
    /// Marks of player 1 and player 2.
    pub marks: [Option<Mark>; 2],
    /// Board contents.
    pub board: Board,
    /// Seat to move.
    pub to_move: Seat,
    /// Evaluated outcome.
    pub outcome: GameOutcome,
    /// Computer move pending.
    pub thinking: bool,
    /// Human-readable status line.
    pub status: String,
}

fn seat_index(seat: Seat) -> usize {
    match seat {
        Seat::First => 0,
        Seat::Second => 1,
    }
}

/// The game session state machine.
#[derive(Debug)]
pub struct GameSession {
    phase: SessionPhase,
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    palette: IconPalette,
    marks: [Option<Mark>; 2],
    board: Board,
    to_move: Seat,
    outcome: GameOutcome,
    thinking: bool,
    pending: Option<PendingMove>,
    epoch: u64,
    random_icons: usize,
    rng: Box<dyn RandomSource>,
    events: Option<UnboundedSender<SessionEvent>>,
}

impl GameSession {
    /// Creates a session in mode selection, seeding its RNG from `config`.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => SessionRng::new(*seed),
            None => SessionRng::from_random(),
        };
        info!(seed = rng.seed(), "Creating game session");
        Self::with_rng(config, Box::new(rng))
    }

    /// Creates a session drawing all randomness from `rng`.
    pub fn with_rng(config: &GameConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            phase: SessionPhase::SelectingMode,
            mode: None,
            difficulty: None,
            palette: IconPalette::classic(),
            marks: [None, None],
            board: Board::new(),
            to_move: Seat::First,
            outcome: GameOutcome::InProgress,
            thinking: false,
            pending: None,
            epoch: 0,
            random_icons: *config.random_icons(),
            rng,
            events: None,
        }
    }

    /// Attaches a channel that receives every [`SessionEvent`].
    pub fn with_events(mut self, events: UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Setup
    // ─────────────────────────────────────────────────────────────

    /// Starts a fresh game in `mode` from any phase.
    ///
    /// Draws a new palette and forgets the old marks. Single-player without
    /// a difficulty stops at difficulty selection; otherwise the session
    /// moves straight to player 1's mark. Difficulty is ignored for
    /// two-player games.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn start_game(&mut self, mode: GameMode, difficulty: Option<Difficulty>) -> Ack {
        self.epoch += 1;
        self.palette = IconPalette::generate(self.rng.as_mut(), self.random_icons);
        self.marks = [None, None];
        self.mode = Some(mode);
        self.difficulty = match mode {
            GameMode::Single => difficulty,
            GameMode::Multi => None,
        };
        self.clear_board();

        let next = match (mode, self.difficulty) {
            (GameMode::Single, None) => SessionPhase::SelectingDifficulty,
            _ => SessionPhase::SelectingMarkP1,
        };
        info!(%mode, difficulty = ?self.difficulty, "Starting new game");
        self.set_phase(next);
        Ack::Accepted
    }

    /// Picks the mode from the mode-selection screen.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn choose_mode(&mut self, mode: GameMode) -> Ack {
        if self.phase != SessionPhase::SelectingMode {
            return self.reject(Rejection::WrongPhase(self.phase));
        }
        self.start_game(mode, None)
    }

    /// Picks the computer's difficulty.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) -> Ack {
        if self.phase != SessionPhase::SelectingDifficulty {
            return self.reject(Rejection::WrongPhase(self.phase));
        }
        info!(%difficulty, "Difficulty selected");
        self.difficulty = Some(difficulty);
        self.set_phase(SessionPhase::SelectingMarkP1);
        Ack::Accepted
    }

    /// Assigns a mark to the player currently choosing.
    ///
    /// In single-player the computer immediately receives a random
    /// different mark from the palette.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn select_mark(&mut self, mark: Mark) -> Ack {
        if !self.palette.contains(mark) {
            return self.reject(Rejection::UnknownMark(mark));
        }

        match self.phase {
            SessionPhase::SelectingMarkP1 => {
                if self.mode == Some(GameMode::Single) {
                    let others: Vec<Mark> = self.palette.marks().filter(|&m| m != mark).collect();
                    let Some(&computer) = choose(self.rng.as_mut(), &others) else {
                        warn!("Palette has no mark left for the computer");
                        return self.reject(Rejection::UnknownMark(mark));
                    };
                    self.marks = [Some(mark), Some(computer)];
                    info!(player = %mark, %computer, "Marks assigned");
                    self.start_playing();
                } else {
                    self.marks = [Some(mark), None];
                    debug!(player = %mark, "Player 1 mark assigned");
                    self.set_phase(SessionPhase::SelectingMarkP2);
                }
                Ack::Accepted
            }
            SessionPhase::SelectingMarkP2 => {
                if self.marks[0] == Some(mark) {
                    return self.reject(Rejection::MarkTaken(mark));
                }
                self.marks[1] = Some(mark);
                info!(player = %mark, "Player 2 mark assigned");
                self.start_playing();
                Ack::Accepted
            }
            phase => self.reject(Rejection::WrongPhase(phase)),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Play
    // ─────────────────────────────────────────────────────────────

    /// Places the current human player's mark at `index`.
    #[instrument(skip(self), fields(phase = %self.phase, to_move = %self.to_move))]
    pub fn apply_move(&mut self, index: usize) -> Ack {
        if self.phase != SessionPhase::Playing {
            return self.reject(Rejection::WrongPhase(self.phase));
        }
        if self.thinking {
            return self.reject(Rejection::ComputerThinking);
        }
        if self.outcome.is_terminal() {
            return self.reject(Rejection::GameOver);
        }
        if self.is_computer(self.to_move) {
            return self.reject(Rejection::ComputerTurn);
        }
        if index >= BOARD_SIZE {
            return self.reject(Rejection::OutOfBounds(index));
        }
        if !self.board.is_empty(index) {
            return self.reject(Rejection::SquareOccupied(index));
        }
        let Some(mark) = self.player_mark(self.to_move) else {
            return self.reject(Rejection::WrongPhase(self.phase));
        };

        self.place(index, mark);
        match self.schedule_computer() {
            Some(pending) => Ack::ComputerScheduled(pending),
            None => Ack::Accepted,
        }
    }

    /// Lands a previously scheduled computer move.
    ///
    /// The move is dropped if the session has been reset or changed mode
    /// since it was scheduled, or if the board no longer admits it.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn complete_computer_move(&mut self, pending: PendingMove) -> Ack {
        if self.pending != Some(pending) || pending.ticket != self.epoch {
            return self.reject(Rejection::StaleMove);
        }
        self.pending = None;

        let still_valid = self.phase == SessionPhase::Playing
            && !self.outcome.is_terminal()
            && self.is_computer(self.to_move)
            && self.board.is_empty(pending.position);
        let ack = match self.player_mark(Seat::Second) {
            Some(mark) if still_valid => {
                info!(position = pending.position, "Computer plays");
                self.place(pending.position, mark);
                Ack::Accepted
            }
            _ => {
                warn!(position = pending.position, "Pending computer move no longer applies");
                Ack::Rejected(Rejection::StaleMove)
            }
        };
        self.set_thinking(false);
        ack
    }

    /// Clears the board and gives player 1 the first move.
    ///
    /// Mode, difficulty and marks are kept.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset_board(&mut self) -> Ack {
        if self.phase != SessionPhase::Playing {
            return self.reject(Rejection::WrongPhase(self.phase));
        }
        if self.thinking {
            return self.reject(Rejection::ComputerThinking);
        }
        self.epoch += 1;
        self.clear_board();
        info!("Board reset");
        Ack::Accepted
    }

    /// Returns to mode selection, forgetting mode, difficulty and marks.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn change_mode(&mut self) -> Ack {
        self.epoch += 1;
        self.mode = None;
        self.difficulty = None;
        self.marks = [None, None];
        self.clear_board();
        info!("Returning to mode selection");
        self.set_phase(SessionPhase::SelectingMode);
        Ack::Accepted
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Selected mode, if any.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Selected difficulty, if any.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Evaluated outcome of the board.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Seat to move next.
    pub fn to_move(&self) -> Seat {
        self.to_move
    }

    /// Mark of the seat to move, once assigned.
    pub fn current_mark(&self) -> Option<Mark> {
        self.player_mark(self.to_move)
    }

    /// Mark held by `seat`, once assigned.
    pub fn player_mark(&self, seat: Seat) -> Option<Mark> {
        self.marks[seat_index(seat)]
    }

    /// Marks of player 1 and player 2.
    pub fn marks(&self) -> [Option<Mark>; 2] {
        self.marks
    }

    /// True while a computer move is pending.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// The computer move awaiting its delay, if any.
    pub fn pending_move(&self) -> Option<PendingMove> {
        self.pending
    }

    /// Icons in play.
    pub fn palette(&self) -> &IconPalette {
        &self.palette
    }

    /// Line to highlight after a win.
    pub fn winning_line(&self) -> Option<Line> {
        self.outcome.line()
    }

    /// One-line description of the game state.
    pub fn status(&self) -> String {
        match self.outcome {
            GameOutcome::Win { mark, .. } => format!("Winner: {}", self.palette.name(mark)),
            GameOutcome::Draw => "It's a draw!".to_string(),
            GameOutcome::InProgress => match (self.marks, self.current_mark()) {
                ([Some(_), Some(_)], Some(mark)) => {
                    format!("Next player: {}", self.palette.name(mark))
                }
                _ => "Game starting...".to_string(),
            },
        }
    }

    /// Copies the observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            mode: self.mode,
            difficulty: self.difficulty,
            palette: self.palette.icons().to_vec(),
            marks: self.marks,
            board: self.board,
            to_move: self.to_move,
            outcome: self.outcome,
            thinking: self.thinking,
            status: self.status(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn is_computer(&self, seat: Seat) -> bool {
        self.mode == Some(GameMode::Single) && seat == Seat::Second
    }

    fn place(&mut self, index: usize, mark: Mark) {
        if let Err(e) = self.board.place(index, mark) {
            // Callers check the square first; reaching this is a bug.
            warn!(error = %e, "Placement refused by board");
            return;
        }
        self.emit(SessionEvent::BoardChanged(self.board));
        self.to_move = self.to_move.opponent();
        self.emit(SessionEvent::TurnChanged(self.to_move));
        self.refresh_outcome();
    }

    fn schedule_computer(&mut self) -> Option<PendingMove> {
        if !self.is_computer(self.to_move) || self.outcome.is_terminal() || self.thinking {
            return None;
        }
        let computer = self.player_mark(Seat::Second)?;
        let human = self.player_mark(Seat::First)?;
        let difficulty = self.difficulty.unwrap_or_default();

        let position = choose_move(&self.board, computer, human, difficulty, self.rng.as_mut())?;
        let pending = PendingMove::new(self.epoch, position);
        debug!(?pending, "Computer move scheduled");
        self.pending = Some(pending);
        self.set_thinking(true);
        Some(pending)
    }

    fn refresh_outcome(&mut self) {
        let outcome = evaluate(&self.board);
        if outcome == self.outcome {
            return;
        }
        self.outcome = outcome;
        info!(?outcome, "Outcome changed");
        self.emit(SessionEvent::OutcomeChanged(outcome));
        if let GameOutcome::Win { mark, line } = outcome {
            self.emit(SessionEvent::Celebrate { mark, line });
        }
    }

    fn clear_board(&mut self) {
        self.pending = None;
        self.set_thinking(false);
        if self.board != Board::new() {
            self.board.clear();
            self.emit(SessionEvent::BoardChanged(self.board));
        }
        if self.to_move != Seat::First {
            self.to_move = Seat::First;
            self.emit(SessionEvent::TurnChanged(self.to_move));
        }
        self.refresh_outcome();
    }

    fn start_playing(&mut self) {
        self.clear_board();
        self.set_phase(SessionPhase::Playing);
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            debug!(from = %self.phase, to = %phase, "Phase transition");
            self.phase = phase;
            self.emit(SessionEvent::PhaseChanged(phase));
        }
    }

    fn set_thinking(&mut self, thinking: bool) {
        if self.thinking != thinking {
            self.thinking = thinking;
            self.emit(SessionEvent::ThinkingChanged(thinking));
        }
    }

    fn reject(&self, rejection: Rejection) -> Ack {
        debug!(%rejection, "Operation ignored");
        Ack::Rejected(rejection)
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(events) = &self.events
            && events.send(event).is_err()
        {
            debug!("Event receiver dropped");
        }
    }
}
