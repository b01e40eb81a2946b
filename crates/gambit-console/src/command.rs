//! Console command parsing.

use gambit_core::Square;

use crate::error::ConsoleError;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `moves <square>` -- list the legal moves of the piece on a square.
    Moves(Square),
    /// `move <from><to>`, `move <from> <to>`, or a bare `e2e4`.
    Move { from: Square, to: Square },
    /// `board` -- print the board.
    Board,
    /// `history` -- print the recent move history.
    History,
    /// `status` -- side to move, check and game state.
    Status,
    /// `hover [square]` -- set or clear the hovered square.
    Hover(Option<Square>),
    /// `save` -- append unsaved moves to the log file.
    Save,
    /// `reset` -- start a new game.
    Reset,
    /// `help` -- list commands.
    Help,
    /// `quit` -- save the log and exit.
    Quit,
    /// Unrecognized command.
    Unknown(String),
}

/// Usage lines shown by `help`.
pub const HELP: &[&str] = &[
    "moves <square>      legal moves of the piece on <square>",
    "move <from><to>     play a move, e.g. `move e2e4` or just `e2e4`",
    "board               print the board",
    "history             recent moves",
    "status              side to move and game state",
    "hover [square]      set or clear the hovered square",
    "save                append new moves to the log file",
    "reset               start a new game",
    "help                this list",
    "quit                save and exit",
];

/// Parse a single line of console input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ConsoleError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "moves" => match tokens[1..] {
            [sq] => Ok(Command::Moves(parse_square(sq)?)),
            _ => Err(malformed("moves", "moves <square>")),
        },
        "move" => parse_move(&tokens[1..]),
        "board" => Ok(Command::Board),
        "history" => Ok(Command::History),
        "status" => Ok(Command::Status),
        "hover" => match tokens[1..] {
            [] => Ok(Command::Hover(None)),
            [sq] => Ok(Command::Hover(Some(parse_square(sq)?))),
            _ => Err(malformed("hover", "hover [square]")),
        },
        "save" => Ok(Command::Save),
        "reset" => Ok(Command::Reset),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        word if tokens.len() == 1 && word.len() == 4 && word.is_ascii() => match parse_move(&tokens) {
            Ok(cmd) => Ok(cmd),
            Err(_) => Ok(Command::Unknown(word.to_string())),
        },
        word => Ok(Command::Unknown(word.to_string())),
    }
}

/// Parse `e2e4` or `e2 e4`.
fn parse_move(tokens: &[&str]) -> Result<Command, ConsoleError> {
    let (from, to) = match *tokens {
        [joined] if joined.len() == 4 && joined.is_ascii() => (&joined[..2], &joined[2..]),
        [from, to] => (from, to),
        _ => return Err(malformed("move", "move <from><to>")),
    };
    Ok(Command::Move {
        from: parse_square(from)?,
        to: parse_square(to)?,
    })
}

fn parse_square(text: &str) -> Result<Square, ConsoleError> {
    Square::from_algebraic(text).ok_or_else(|| ConsoleError::UnknownSquare {
        text: text.to_string(),
    })
}

fn malformed(command: &'static str, usage: &'static str) -> ConsoleError {
    ConsoleError::MalformedCommand { command, usage }
}
