//! Move representation.

use std::fmt;

use crate::color::Color;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The category of a chess move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Quiet move or ordinary capture.
    Normal,
    /// Pawn two-square advance. Leaves the pawn capturable en passant for one turn.
    DoublePush,
    /// Pawn capture onto an empty square; the victim stands beside the mover.
    EnPassant,
    /// King moves two files toward a rook, which lands on the square the king crossed.
    Castle {
        rook_from: Square,
        rook_to: Square,
    },
    /// Pawn reaches the last rank and becomes a queen.
    Promotion,
}

/// Snapshot of the piece a move removes from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capture {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    /// Where the victim stood. Differs from the move's destination for en passant.
    pub square: Square,
}

/// A move between two squares.
///
/// Squares are plain coordinates; a move never refers into a live board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
    capture: Option<Capture>,
}

impl Move {
    /// Create a normal move with no capture.
    ///
    /// This is the shape a UI builds from a drag gesture; legality checks only
    /// compare the squares.
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            kind: MoveKind::Normal,
            capture: None,
        }
    }

    /// Create a move of the given kind.
    pub const fn with_kind(from: Square, to: Square, kind: MoveKind) -> Move {
        Move {
            from,
            to,
            kind,
            capture: None,
        }
    }

    /// Attach a captured-piece snapshot.
    pub const fn capturing(mut self, capture: Capture) -> Move {
        self.capture = Some(capture);
        self
    }

    /// Create a castling move from the king's and rook's squares.
    pub const fn new_castle(king_from: Square, king_to: Square, rook_from: Square, rook_to: Square) -> Move {
        Move::with_kind(king_from, king_to, MoveKind::Castle { rook_from, rook_to })
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn capture(&self) -> Option<Capture> {
        self.capture
    }

    /// Return `true` if both moves connect the same two squares.
    #[inline]
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion)
    }

    /// Coordinate notation for a move made by a piece of `kind`, e.g. `Ng1-f3` or `e2-e4`.
    pub fn notation(&self, kind: PieceKind) -> String {
        format!("{}{}-{}", kind.notation_letter(), self.from, self.to)
    }

    /// Return the UCI-style string (`e2e4`).
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} kind={:?}", self, self.kind)?;
        if let Some(capture) = self.capture {
            write!(f, " x{}@{}", capture.kind.fen_char(), capture.square)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Capture, Move, MoveKind};
    use crate::color::Color;
    use crate::piece::PieceId;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn notation_per_kind() {
        let mv = Move::new(Square::E2, Square::E4);
        assert_eq!(mv.notation(PieceKind::Pawn), "e2-e4");
        let mv = Move::new(Square::G1, Square::F3);
        assert_eq!(mv.notation(PieceKind::Knight), "Ng1-f3");
        let mv = Move::new(Square::A8, Square::H1);
        assert_eq!(mv.notation(PieceKind::Queen), "Qa8-h1");
    }

    #[test]
    fn same_squares_ignores_kind_and_capture() {
        let victim = Capture {
            piece: PieceId(3),
            kind: PieceKind::Pawn,
            color: Color::Black,
            square: Square::D5,
        };
        let canonical = Move::with_kind(Square::E5, Square::D6, MoveKind::EnPassant).capturing(victim);
        let requested = Move::new(Square::E5, Square::D6);
        assert!(canonical.same_squares(&requested));
        assert_ne!(canonical, requested);
        assert!(canonical.is_en_passant());
        assert!(canonical.is_capture());
    }

    #[test]
    fn castle_carries_rook_squares() {
        let mv = Move::new_castle(Square::E1, Square::C1, Square::A1, Square::D1);
        assert!(mv.is_castle());
        assert_eq!(
            mv.kind(),
            MoveKind::Castle {
                rook_from: Square::A1,
                rook_to: Square::D1
            }
        );
        assert_eq!(mv.notation(PieceKind::King), "Ke1-c1");
    }

    #[test]
    fn uci_and_display() {
        let mv = Move::new(Square::E2, Square::E4);
        assert_eq!(mv.to_uci(), "e2e4");
        assert_eq!(format!("{mv}"), "e2e4");
        assert!(format!("{mv:?}").contains("Normal"));
    }

    #[test]
    fn equality_and_hash() {
        let mv1 = Move::new(Square::E2, Square::E4);
        let mv2 = Move::new(Square::E2, Square::E4);
        let mv3 = Move::new(Square::D2, Square::D4);

        let mut set = HashSet::new();
        set.insert(mv1);
        set.insert(mv2);
        assert_eq!(set.len(), 1);
        set.insert(mv3);
        assert_eq!(set.len(), 2);
    }
}
