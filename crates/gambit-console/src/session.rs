//! Line-oriented game session over any reader and writer.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use gambit_core::{Color, Move, Square};
use gambit_engine::{Engine, GameState};

use crate::command::{Command, HELP, parse_command};
use crate::error::ConsoleError;

/// A console game: reads commands from `input`, drives an [`Engine`], and
/// writes replies to `output`.
pub struct Session<R, W> {
    engine: Engine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: Engine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Consume the session, returning the engine and the output sink.
    pub fn into_parts(self) -> (Engine, W) {
        (self.engine, self.output)
    }

    /// Run until `quit` or end of input. The move log is saved on the way out.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if reading input or writing output fails.
    /// A failed save on exit is returned as [`ConsoleError::Log`].
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "gambit: type `help` for commands")?;
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("input closed");
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received console command");

            let command = match parse_command(trimmed) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "error: {err}")?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            if let Err(err) = self.execute(command) {
                if !err.is_recoverable() {
                    return Err(err);
                }
                warn!(%err, "command failed");
                writeln!(self.output, "error: {err}")?;
            }
        }

        self.save()?;
        self.output.flush()?;
        Ok(())
    }

    /// Run one parsed command.
    pub fn execute(&mut self, command: Command) -> Result<(), ConsoleError> {
        match command {
            Command::Moves(sq) => self.handle_moves(sq),
            Command::Move { from, to } => self.handle_move(from, to),
            Command::Board => self.handle_board(),
            Command::History => self.handle_history(),
            Command::Status => self.handle_status(),
            Command::Hover(sq) => {
                self.engine.set_hovered(sq);
                match sq {
                    Some(sq) => writeln!(self.output, "hovering {sq}")?,
                    None => writeln!(self.output, "hover cleared")?,
                }
                Ok(())
            }
            Command::Save => self.save(),
            Command::Reset => {
                self.engine.reset();
                writeln!(self.output, "new game, white to move")?;
                Ok(())
            }
            Command::Help => {
                for line in HELP {
                    writeln!(self.output, "{line}")?;
                }
                Ok(())
            }
            Command::Quit => Ok(()),
            Command::Unknown(word) => {
                writeln!(self.output, "unknown command: {word} (try `help`)")?;
                Ok(())
            }
        }
    }

    fn handle_moves(&mut self, sq: Square) -> Result<(), ConsoleError> {
        let Some((_, moves)) = self.engine.select(sq) else {
            writeln!(self.output, "{sq}: empty square")?;
            return Ok(());
        };
        if moves.is_empty() {
            writeln!(self.output, "{sq}: no legal moves")?;
            return Ok(());
        }
        let targets: Vec<String> = moves.iter().map(|m| m.to().to_string()).collect();
        writeln!(self.output, "{sq}: {}", targets.join(" "))?;
        Ok(())
    }

    fn handle_move(&mut self, from: Square, to: Square) -> Result<(), ConsoleError> {
        if !self.engine.is_active() {
            writeln!(self.output, "game is over; `reset` to play again")?;
            return Ok(());
        }

        let requested = Move::new(from, to);
        let played = match self.engine.select(from) {
            Some((piece, _)) => self.engine.make_move(piece, &requested),
            None => false,
        };
        if !played {
            writeln!(self.output, "illegal move: {requested}")?;
            return Ok(());
        }

        if let Some(record) = self.engine.move_log().last() {
            writeln!(self.output, "{} played {}", record.player, record.notation)?;
        }
        if self.engine.state() == GameState::GameOver {
            let winner = winner(&self.engine);
            info!(?winner, "game finished");
            match winner {
                Some(color) => writeln!(self.output, "game over: {color} wins")?,
                None => writeln!(self.output, "game over")?,
            }
        } else if self.engine.in_check() {
            let from: Vec<String> = self.engine.checkers().iter().map(ToString::to_string).collect();
            writeln!(
                self.output,
                "{} is in check from {}",
                self.engine.next_player(),
                from.join(" ")
            )?;
        }
        Ok(())
    }

    fn handle_board(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", self.engine.board().pretty())?;
        if let Some(sq) = self.engine.hovered_sqr() {
            writeln!(self.output, "hovering {sq}")?;
        }
        Ok(())
    }

    fn handle_history(&mut self) -> Result<(), ConsoleError> {
        let log = self.engine.move_log();
        let recent = self.engine.history();
        if recent.is_empty() {
            writeln!(self.output, "no moves yet")?;
            return Ok(());
        }
        let first = log.len() - recent.len() + 1;
        for (i, record) in recent.iter().enumerate() {
            writeln!(self.output, "{}. {}", first + i, record.notation)?;
        }
        Ok(())
    }

    fn handle_status(&mut self) -> Result<(), ConsoleError> {
        let engine = &self.engine;
        if engine.state() == GameState::GameOver {
            match winner(engine) {
                Some(color) => writeln!(self.output, "game over: {color} wins")?,
                None => writeln!(self.output, "game over")?,
            }
            return Ok(());
        }

        let side = engine.next_player();
        let note = if engine.is_checkmate() {
            ", checkmated"
        } else if engine.is_stalemate() {
            ", stalemated"
        } else if engine.in_check() {
            ", in check"
        } else {
            ""
        };
        writeln!(self.output, "{side} to move{note}")?;
        Ok(())
    }

    fn save(&mut self) -> Result<(), ConsoleError> {
        let written = self.engine.save_log()?;
        if written > 0 {
            writeln!(
                self.output,
                "saved {written} moves to {}",
                self.engine.config().log_path.display()
            )?;
        }
        Ok(())
    }
}

/// The side whose king is still on the board once the game is over.
fn winner(engine: &Engine) -> Option<Color> {
    let board = engine.board();
    match (
        board.king_square(Color::White).is_some(),
        board.king_square(Color::Black).is_some(),
    ) {
        (true, false) => Some(Color::White),
        (false, true) => Some(Color::Black),
        _ => None,
    }
}
