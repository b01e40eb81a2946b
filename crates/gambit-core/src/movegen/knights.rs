//! Knight move generation.

use crate::board::Board;
use crate::chess_move::MoveKind;
use crate::color::Color;
use crate::square::Square;

use super::{MoveList, step_to};

/// The eight L-shaped jumps as `(row, col)` deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
];

/// Generate pseudo-legal moves for the knight on `src`.
pub(super) fn gen_knight(board: &Board, src: Square, us: Color, list: &mut MoveList) {
    gen_steps(board, src, us, &KNIGHT_OFFSETS, list);
}

/// Emit a move for every offset that lands on the board and not on a friendly piece.
pub(super) fn gen_steps(board: &Board, src: Square, us: Color, offsets: &[(i8, i8)], list: &mut MoveList) {
    for &(dr, dc) in offsets {
        if let Some(dst) = src.offset(dr, dc)
            && board.is_empty_or_enemy(us, dst)
        {
            list.push(step_to(board, src, dst, MoveKind::Normal));
        }
    }
}
