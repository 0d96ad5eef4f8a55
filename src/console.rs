//! Line-based console frontend.

use crate::driver::SessionDriver;
use crate::games::tictactoe::{Difficulty, Mark, BOARD_SIZE};
use crate::session::{Ack, GameMode, SessionEvent, SessionPhase, SessionSnapshot};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument};

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick a mode on the mode screen.
    ChooseMode(GameMode),
    /// Pick a difficulty.
    ChooseDifficulty(Difficulty),
    /// Pick a mark by palette position.
    SelectMark(Mark),
    /// Place a mark at a board index.
    Move(usize),
    /// Clear the board.
    Reset,
    /// Back to mode selection.
    ChangeMode,
    /// Leave.
    Quit,
}

/// Interprets `input` in the context of `phase`.
///
/// Numbers are 1-based on every screen.
pub fn parse_command(phase: SessionPhase, input: &str) -> Option<Command> {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "q" | "quit" => return Some(Command::Quit),
        "m" | "mode" => return Some(Command::ChangeMode),
        _ => {}
    }

    let number = input.parse::<usize>().ok().filter(|&n| n >= 1);
    match phase {
        SessionPhase::SelectingMode => match (input.as_str(), number) {
            (_, Some(1)) => Some(Command::ChooseMode(GameMode::Single)),
            (_, Some(2)) => Some(Command::ChooseMode(GameMode::Multi)),
            (text, _) => text.parse().ok().map(Command::ChooseMode),
        },
        SessionPhase::SelectingDifficulty => match (input.as_str(), number) {
            (_, Some(1)) => Some(Command::ChooseDifficulty(Difficulty::Easy)),
            (_, Some(2)) => Some(Command::ChooseDifficulty(Difficulty::Hard)),
            (text, _) => text.parse().ok().map(Command::ChooseDifficulty),
        },
        SessionPhase::SelectingMarkP1 | SessionPhase::SelectingMarkP2 => number
            .and_then(|n| u8::try_from(n - 1).ok())
            .map(|id| Command::SelectMark(Mark(id))),
        SessionPhase::Playing => match input.as_str() {
            "r" | "reset" => Some(Command::Reset),
            _ => number.filter(|&n| n <= BOARD_SIZE).map(|n| Command::Move(n - 1)),
        },
    }
}

/// Renders the screen for the current phase.
pub fn render(snapshot: &SessionSnapshot) -> String {
    let name = |mark: Mark| {
        snapshot
            .palette
            .get(mark.index())
            .map(|icon| icon.to_string())
            .unwrap_or_else(|| mark.to_string())
    };

    match snapshot.phase {
        SessionPhase::SelectingMode => "Tic Tac Toe\n  1. Single Player\n  2. Two Players".to_string(),
        SessionPhase::SelectingDifficulty => {
            "Select Difficulty\n  1. Easy Mode\n  2. Hard Mode".to_string()
        }
        SessionPhase::SelectingMarkP1 | SessionPhase::SelectingMarkP2 => {
            let player = if snapshot.phase == SessionPhase::SelectingMarkP1 { 1 } else { 2 };
            let mut out = format!("Player {player}, select your icon");
            for (i, icon) in snapshot.palette.iter().enumerate() {
                let taken = snapshot.marks[0].is_some_and(|m| m.index() == i);
                out.push_str(&format!(
                    "\n  {}. {}{}",
                    i + 1,
                    icon,
                    if taken { " (taken)" } else { "" }
                ));
            }
            out
        }
        SessionPhase::Playing => {
            let mut out = snapshot.board.display_with(name);
            out.push_str("\n\n");
            out.push_str(&snapshot.status);
            if snapshot.thinking {
                out.push_str("\nComputer is thinking...");
            }
            out.push_str("\n[1-9] move  [r] reset  [m] change mode  [q] quit");
            out
        }
    }
}

/// Plays on stdin/stdout until the user quits or input ends.
#[instrument(skip_all)]
pub async fn run(driver: SessionDriver, mut events: UnboundedReceiver<SessionEvent>) -> Result<()> {
    info!("Starting console frontend");

    let renderer = driver.clone();
    let render_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::ThinkingChanged(false) => {
                    println!("\n{}", render(&renderer.snapshot()));
                }
                SessionEvent::Celebrate { line, .. } => {
                    println!("\n*** Three in a row: {:?} ***", line.cells().map(|i| i + 1));
                }
                other => debug!(?other, "Event"),
            }
        }
    });

    println!("{}", render(&driver.snapshot()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let phase = driver.snapshot().phase;
        let Some(command) = parse_command(phase, &line) else {
            println!("Unrecognised input: {}", line.trim());
            continue;
        };

        let ack = match command {
            Command::Quit => break,
            Command::ChooseMode(mode) => driver.choose_mode(mode),
            Command::ChooseDifficulty(difficulty) => driver.choose_difficulty(difficulty),
            Command::SelectMark(mark) => driver.select_mark(mark),
            Command::Move(index) => driver.apply_move(index),
            Command::Reset => driver.reset_board(),
            Command::ChangeMode => driver.change_mode(),
        };
        if let Ack::Rejected(reason) = ack {
            println!("Ignored: {reason}");
        }
        println!("\n{}", render(&driver.snapshot()));
    }

    render_task.abort();
    info!("Console frontend finished");
    Ok(())
}
