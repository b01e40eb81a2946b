//! Chess piece kinds.

use std::fmt;

/// What a piece is, independent of its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// (kind, FEN letter, log name, material weight)
const TABLE: [(PieceKind, char, &str, f64); 6] = [
    (PieceKind::Pawn, 'p', "pawn", 1.0),
    (PieceKind::Knight, 'n', "knight", 3.0),
    (PieceKind::Bishop, 'b', "bishop", 3.001),
    (PieceKind::Rook, 'r', "rook", 5.0),
    (PieceKind::Queen, 'q', "queen", 9.0),
    (PieceKind::King, 'k', "king", 10_000.0),
];

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    const fn row(self) -> (PieceKind, char, &'static str, f64) {
        TABLE[self as usize]
    }

    /// Lowercase FEN letter.
    pub const fn fen_char(self) -> char {
        self.row().1
    }

    /// Case-insensitive inverse of [`fen_char`](Self::fen_char).
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        let c = c.to_ascii_lowercase();
        TABLE.iter().find(|row| row.1 == c).map(|row| row.0)
    }

    /// Prefix used in move notation. Pawns have none.
    pub const fn notation_letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    /// Unsigned material weight. The king's value is a sentinel that dwarfs
    /// any possible sum of the other pieces.
    pub const fn base_value(self) -> f64 {
        self.row().3
    }

    /// Lowercase name as written to the move log.
    pub const fn name(self) -> &'static str {
        self.row().2
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
