//! Pawn move generation.

use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::piece::Piece;
use crate::square::Square;

use super::mode::GenMode;
use super::{MoveList, capture_on, step_to};

/// Generate pseudo-legal pawn moves: pushes, the double step, diagonal
/// captures and en passant. Moves onto the last rank are promotions.
pub(super) fn gen_pawn<M: GenMode>(board: &Board, src: Square, pawn: &Piece, list: &mut MoveList) {
    let us = pawn.color();
    let dir = us.forward();
    let last_row = us.flip().home_row();
    let advance_kind = |dst: Square| {
        if dst.row() == last_row {
            MoveKind::Promotion
        } else {
            MoveKind::Normal
        }
    };

    if M::ATTACKS_ONLY {
        // Diagonals are attacked whether or not anything stands there.
        for dc in [-1, 1] {
            if let Some(dst) = src.offset(dir, dc) {
                list.push(step_to(board, src, dst, advance_kind(dst)));
            }
        }
        return;
    }

    // Pushes: one square, then a second only for an unmoved pawn with both squares clear
    if let Some(one) = src.offset(dir, 0)
        && board.is_empty(one)
    {
        list.push(Move::with_kind(src, one, advance_kind(one)));
        if !pawn.moved()
            && let Some(two) = src.offset(2 * dir, 0)
            && board.is_empty(two)
        {
            list.push(Move::with_kind(src, two, MoveKind::DoublePush));
        }
    }

    for dc in [-1, 1] {
        let Some(dst) = src.offset(dir, dc) else {
            continue;
        };

        if board.has_enemy_of(us, dst) {
            list.push(step_to(board, src, dst, advance_kind(dst)));
            continue;
        }

        // En passant: from our fifth rank, onto the empty square behind an
        // enemy pawn that has just advanced two.
        if src.row() != us.en_passant_row() || !board.is_empty(dst) {
            continue;
        }
        if let Some(beside) = src.offset(0, dc)
            && let Some(victim) = board.occupant(beside)
            && victim.color() != us
            && victim.is_en_passant_target()
            && let Some(capture) = capture_on(board, beside)
        {
            list.push(Move::with_kind(src, dst, MoveKind::EnPassant).capturing(capture));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::chess_move::{Move, MoveKind};
    use crate::color::Color;
    use crate::movegen::pseudo_legal_moves;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn kings() -> Board {
        let mut board = Board::empty();
        board.place(Square::A1, Piece::new(PieceKind::King, Color::White));
        board.place(Square::H8, Piece::new(PieceKind::King, Color::Black));
        board
    }

    #[test]
    fn unmoved_pawn_offers_two_pushes() {
        let board = Board::starting_position();
        let moves = pseudo_legal_moves(&board, Square::E2);
        assert_eq!(moves.len(), 2);
        assert!(moves.find(Square::E2, Square::E3).is_some());
        let double = moves.find(Square::E2, Square::E4).unwrap();
        assert_eq!(double.kind(), MoveKind::DoublePush);
    }

    #[test]
    fn moved_pawn_offers_at_most_one_push() {
        let mut board = kings();
        board.place(Square::E2, Piece::new(PieceKind::Pawn, Color::White).with_moved(true));
        let moves = pseudo_legal_moves(&board, Square::E2);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to(), Square::E3);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut board = kings();
        board.place(Square::E2, Piece::new(PieceKind::Pawn, Color::White));
        board.place(Square::E3, Piece::new(PieceKind::Knight, Color::Black));
        assert!(pseudo_legal_moves(&board, Square::E2).is_empty());

        // Second square blocked: single push only.
        let mut board = kings();
        board.place(Square::E2, Piece::new(PieceKind::Pawn, Color::White));
        board.place(Square::E4, Piece::new(PieceKind::Knight, Color::Black));
        let moves = pseudo_legal_moves(&board, Square::E2);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn diagonal_captures_only_onto_enemies() {
        let mut board = kings();
        board.place(Square::D4, Piece::new(PieceKind::Pawn, Color::White).with_moved(true));
        board.place(Square::C5, Piece::new(PieceKind::Rook, Color::Black));
        board.place(Square::E5, Piece::new(PieceKind::Rook, Color::White));
        let moves = pseudo_legal_moves(&board, Square::D4);
        let capture = moves.find(Square::D4, Square::C5).unwrap();
        assert_eq!(capture.capture().map(|c| c.kind), Some(PieceKind::Rook));
        assert!(moves.find(Square::D4, Square::E5).is_none());
        assert!(moves.find(Square::D4, Square::D5).is_some());
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let board = Board::starting_position();
        let moves = pseudo_legal_moves(&board, Square::D7);
        assert!(moves.find(Square::D7, Square::D6).is_some());
        assert!(moves.find(Square::D7, Square::D5).is_some());
    }

    #[test]
    fn en_passant_requires_flag_and_fifth_rank() {
        let mut board = kings();
        board.place(Square::E5, Piece::new(PieceKind::Pawn, Color::White).with_moved(true));
        board.place(Square::D7, Piece::new(PieceKind::Pawn, Color::Black));
        board.execute(&Move::new(Square::D7, Square::D5), false).unwrap();

        let moves = pseudo_legal_moves(&board, Square::E5);
        let ep = moves.find(Square::E5, Square::D6).unwrap();
        assert!(ep.is_en_passant());
        assert_eq!(ep.capture().map(|c| c.square), Some(Square::D5));

        // The same geometry without the flag yields nothing sideways.
        let mut stale = kings();
        stale.place(Square::E5, Piece::new(PieceKind::Pawn, Color::White).with_moved(true));
        stale.place(Square::D5, Piece::new(PieceKind::Pawn, Color::Black).with_moved(true));
        let moves = pseudo_legal_moves(&stale, Square::E5);
        assert!(moves.find(Square::E5, Square::D6).is_none());
    }

    #[test]
    fn push_to_last_rank_is_promotion() {
        let mut board = kings();
        board.place(Square::B7, Piece::new(PieceKind::Pawn, Color::White).with_moved(true));
        board.place(Square::C8, Piece::new(PieceKind::Knight, Color::Black));
        let moves = pseudo_legal_moves(&board, Square::B7);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.is_promotion()));
    }
}
