//! Error types for board queries, move execution and FEN parsing.

use thiserror::Error;

use crate::square::Square;

/// Errors raised by the board itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A coordinate outside `[0, 8)` was presented to the board.
    #[error("coordinate ({row}, {col}) is off the board")]
    OutOfRange { row: i32, col: i32 },

    /// A move was executed from a square with no piece on it.
    #[error("no piece on {square}")]
    EmptySquare { square: Square },

    /// A side has no king, or more than one.
    #[error("{color} has {count} kings on the board")]
    KingCount { color: &'static str, count: u32 },

    #[error("a pawn stands on the first or last row")]
    PawnOnLastRow,
}

/// Why a FEN string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN needs 2 to 6 fields, got {found}")]
    FieldCount { found: usize },

    #[error("placement has {found} rows, needs 8")]
    RowCount { found: usize },

    /// `row` is zero-based from the top (rank 8).
    #[error("row {row} covers {length} squares, needs 8")]
    RowLength { row: usize, length: usize },

    #[error("unknown piece letter '{character}'")]
    UnknownPiece { character: char },

    #[error("side to move must be \"w\" or \"b\", got \"{found}\"")]
    SideToMove { found: String },

    #[error("unknown castling letter '{character}'")]
    Castling { character: char },

    /// Not `-`, or not the square behind an enemy pawn that could have just
    /// advanced two.
    #[error("bad en passant target \"{found}\"")]
    EnPassant { found: String },

    #[error("bad {field} \"{found}\"")]
    Counter { field: &'static str, found: String },

    #[error("position is not playable: {source}")]
    Board {
        #[from]
        source: BoardError,
    },
}
