//! Sliding piece (bishop, rook, queen) move generation.

use crate::board::Board;
use crate::chess_move::MoveKind;
use crate::color::Color;
use crate::square::Square;

use super::{MoveList, step_to};

pub(crate) const BISHOP_DIRS: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

pub(crate) const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub(crate) const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
];

/// Ray-cast from `src` along each direction.
///
/// Empty squares are quiet moves and the walk continues; an enemy piece is a
/// capture and ends the ray; a friendly piece or the board edge ends it
/// without a move.
pub(super) fn gen_slider(board: &Board, src: Square, us: Color, dirs: &[(i8, i8)], list: &mut MoveList) {
    for &(dr, dc) in dirs {
        let mut cursor = src.offset(dr, dc);
        while let Some(dst) = cursor {
            if board.is_empty(dst) {
                list.push(step_to(board, src, dst, MoveKind::Normal));
            } else {
                if board.has_enemy_of(us, dst) {
                    list.push(step_to(board, src, dst, MoveKind::Normal));
                }
                break;
            }
            cursor = dst.offset(dr, dc);
        }
    }
}
