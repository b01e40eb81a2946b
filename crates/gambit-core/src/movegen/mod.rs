//! Pseudo-legal move generation per piece kind, plus the legality filter.

mod king;
mod knights;
mod legality;
mod mode;
mod pawns;
mod sliders;

use crate::board::Board;
use crate::chess_move::{Capture, Move, MoveKind};
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knight;
use self::mode::{GenMode, Pseudo};
use self::pawns::gen_pawn;
use self::sliders::{BISHOP_DIRS, QUEEN_DIRS, ROOK_DIRS, gen_slider};

pub use self::legality::{
    filter_legal, is_checkmate, is_stalemate, king_attacked, legal_moves, legal_moves_from,
    square_attacked,
};

/// Buffer of generated moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Create an empty move list.
    pub fn new() -> MoveList {
        MoveList { moves: Vec::new() }
    }

    /// Push a move onto the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Return the number of moves in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Return `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Drop every move, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Return a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Return the move connecting `from` and `to`, if present.
    pub fn find(&self, from: Square, to: Square) -> Option<&Move> {
        self.moves.iter().find(|m| m.from() == from && m.to() == to)
    }

    /// Append every move from `other`.
    pub fn extend_from(&mut self, other: &MoveList) {
        self.moves.extend_from_slice(&other.moves);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

/// Snapshot of whatever piece stands on `sq`.
pub(crate) fn capture_on(board: &Board, sq: Square) -> Option<Capture> {
    let id = board.occupant_id(sq)?;
    let piece = board.piece(id);
    Some(Capture {
        piece: id,
        kind: piece.kind(),
        color: piece.color(),
        square: sq,
    })
}

/// A move onto `dst`, recording the piece it captures there (if any).
fn step_to(board: &Board, src: Square, dst: Square, kind: MoveKind) -> Move {
    let mv = Move::with_kind(src, dst, kind);
    match capture_on(board, dst) {
        Some(capture) => mv.capturing(capture),
        None => mv,
    }
}

/// Generate pseudo-legal moves for the piece on `src`.
///
/// The moves ignore whether they leave the mover's own king attacked; see
/// [`filter_legal`]. An empty square yields an empty list.
pub fn pseudo_legal_moves(board: &Board, src: Square) -> MoveList {
    let mut list = MoveList::new();
    gen_piece::<Pseudo>(board, src, &mut list);
    list
}

pub(crate) fn gen_piece<M: GenMode>(board: &Board, src: Square, list: &mut MoveList) {
    let Some(piece) = board.occupant(src) else {
        return;
    };
    let us = piece.color();
    match piece.kind() {
        PieceKind::Pawn => gen_pawn::<M>(board, src, piece, list),
        PieceKind::Knight => gen_knight(board, src, us, list),
        PieceKind::Bishop => gen_slider(board, src, us, &BISHOP_DIRS, list),
        PieceKind::Rook => gen_slider(board, src, us, &ROOK_DIRS, list),
        PieceKind::Queen => gen_slider(board, src, us, &QUEEN_DIRS, list),
        PieceKind::King => gen_king::<M>(board, src, piece, list),
    }
}
