//! Colored chess pieces and their per-game state.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// Slot index of a piece in a [`Board`](crate::Board)'s piece arena.
///
/// Ids stay valid for the lifetime of the board and of every snapshot taken
/// from it, including after the piece has been captured.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    /// Return the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    /// Has this piece ever moved. Gates castling and the pawn double step.
    pub(crate) moved: bool,
    /// Pawns only: set for the single turn after a two-square advance.
    pub(crate) en_passant: bool,
}

impl Piece {
    /// Create an unmoved piece.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            moved: false,
            en_passant: false,
        }
    }

    /// Parse a FEN character into an unmoved piece.
    ///
    /// Uppercase letters produce White pieces; lowercase letters produce Black pieces.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub const fn en_passant(&self) -> bool {
        self.en_passant
    }

    /// Return `true` if this is a pawn that can be captured en passant right now.
    #[inline]
    pub const fn is_en_passant_target(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn) && self.en_passant
    }

    /// Signed material value: positive for White, negative for Black.
    pub fn value(&self) -> f64 {
        match self.color {
            Color::White => self.kind.base_value(),
            Color::Black => -self.kind.base_value(),
        }
    }

    /// Return the FEN character for this piece.
    ///
    /// Uppercase for White pieces, lowercase for Black pieces.
    #[inline]
    pub fn fen_char(&self) -> char {
        let base = self.kind.fen_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    /// Return the same piece with `moved` set, for setting up positions.
    #[inline]
    pub const fn with_moved(mut self, moved: bool) -> Piece {
        self.moved = moved;
        self
    }

    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        let kind_char = self.kind.fen_char().to_ascii_uppercase();
        write!(f, "{color_prefix}{kind_char}")?;
        if self.moved {
            write!(f, "*")?;
        }
        if self.en_passant {
            write!(f, "ep")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;
    use crate::color::Color;
    use crate::piece_kind::PieceKind;

    #[test]
    fn value_sign_follows_color() {
        let wq = Piece::new(PieceKind::Queen, Color::White);
        let bq = Piece::new(PieceKind::Queen, Color::Black);
        assert_eq!(wq.value(), 9.0);
        assert_eq!(bq.value(), -9.0);
        assert_eq!(Piece::new(PieceKind::King, Color::Black).value(), -10_000.0);
    }

    #[test]
    fn fen_char_case_sensitivity() {
        let p = Piece::from_fen_char('P').unwrap();
        assert_eq!((p.kind(), p.color()), (PieceKind::Pawn, Color::White));
        let k = Piece::from_fen_char('k').unwrap();
        assert_eq!((k.kind(), k.color()), (PieceKind::King, Color::Black));
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char(' '), None);
    }

    #[test]
    fn new_pieces_are_fresh() {
        let p = Piece::new(PieceKind::Pawn, Color::White);
        assert!(!p.moved());
        assert!(!p.en_passant());
        assert!(!p.is_en_passant_target());
        assert!(p.with_moved(true).moved());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Piece::new(PieceKind::Knight, Color::White)), "WN");
        assert_eq!(
            format!("{:?}", Piece::new(PieceKind::Rook, Color::Black).with_moved(true)),
            "BR*"
        );
    }
}
