//! King move and castling generation.

use crate::board::Board;
use crate::chess_move::Move;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::MoveList;
use super::knights::gen_steps;
use super::mode::GenMode;

/// The eight adjacent squares as `(row, col)` deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Castling targets per corner: `(rook column, king lands, rook lands)`.
const CASTLES: [(u8, u8, u8); 2] = [(0, 2, 3), (7, 6, 5)];

/// Generate pseudo-legal king moves (adjacent steps + castling).
///
/// Castling is emitted as a single composite move when the king and the
/// corner rook are both unmoved, every square strictly between them is
/// empty, and both landing squares are free once the pair has lifted off.
/// The king always lands on column 2 or 6 and the rook on column 3 or 5,
/// wherever on the back row the king started.
/// Whether the king passes through an attacked square is decided by the
/// legality filter, not here.
pub(super) fn gen_king<M: GenMode>(board: &Board, src: Square, king: &Piece, list: &mut MoveList) {
    let us = king.color();
    gen_steps(board, src, us, &KING_OFFSETS, list);

    if M::ATTACKS_ONLY || king.moved() {
        return;
    }

    for (corner, king_col, rook_col) in CASTLES {
        if src.col() == king_col || src.col() == corner {
            continue;
        }
        let row = src.row();
        let (Some(rook_sq), Some(king_to), Some(rook_to)) = (
            Square::new(row, corner),
            Square::new(row, king_col),
            Square::new(row, rook_col),
        ) else {
            continue;
        };
        let rook_ready = board
            .occupant(rook_sq)
            .is_some_and(|r| r.kind() == PieceKind::Rook && r.color() == us && !r.moved());
        if !rook_ready {
            continue;
        }

        let lo = src.col().min(corner).min(king_col).min(rook_col);
        let hi = src.col().max(corner).max(king_col).max(rook_col);
        let room = (lo..=hi)
            .filter_map(|col| Square::new(row, col))
            .filter(|&sq| sq != src && sq != rook_sq)
            .all(|sq| board.is_empty(sq));
        if room {
            list.push(Move::new_castle(src, king_to, rook_sq, rook_to));
        }
    }
}
