//! Check detection and the pseudo-legal to legal filter.

use tracing::warn;

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

use super::mode::Attacks;
use super::{MoveList, gen_piece, pseudo_legal_moves};

/// Keep the candidates that do not leave `us`'s king attacked.
///
/// Each candidate is played on a private snapshot with
/// [`Board::execute`] in simulation mode, tested, then undone, so `board`
/// itself is never touched. Castling additionally requires that the king is
/// not in check and does not cross an attacked square.
pub fn filter_legal(board: &Board, us: Color, candidates: &MoveList) -> MoveList {
    let mut scratch = board.snapshot();
    candidates
        .iter()
        .filter(|mv| survives(&mut scratch, us, mv))
        .copied()
        .collect()
}

fn survives(scratch: &mut Board, us: Color, mv: &Move) -> bool {
    if mv.is_castle() {
        if king_attacked(scratch, us) {
            return false;
        }
        let (from, to) = (mv.from().col(), mv.to().col());
        let crossed = (from.min(to) + 1..from.max(to))
            .filter_map(|col| Square::new(mv.from().row(), col))
            .any(|sq| square_attacked(scratch, sq, us.flip()));
        if crossed {
            return false;
        }
    }

    let Ok(undo) = scratch.execute(mv, true) else {
        return false;
    };
    let safe = !king_attacked(scratch, us);
    scratch.undo(undo);
    safe
}

/// Return `true` if `color`'s king stands on a square attacked by the other side.
///
/// A board without that king reports `false` and logs a warning: the caller
/// has lost track of an invariant, and there is nothing to attack.
pub fn king_attacked(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king_sq) => square_attacked(board, king_sq, color.flip()),
        None => {
            warn!(%color, "no king on board while testing for check");
            false
        }
    }
}

/// Return `true` if any piece of `by` attacks `sq`.
///
/// Uses the pieces' own generators in attack mode, which never consider
/// castling and so cannot recurse back into check detection.
pub fn square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    let mut probe = MoveList::new();
    board.pieces_of(by).any(|(src, _)| {
        probe.clear();
        gen_piece::<Attacks>(board, src, &mut probe);
        probe.iter().any(|m| m.to() == sq)
    })
}

/// Legal moves for the piece on `src`. Empty if the square is vacant.
pub fn legal_moves_from(board: &Board, src: Square) -> MoveList {
    match board.occupant(src) {
        Some(piece) => filter_legal(board, piece.color(), &pseudo_legal_moves(board, src)),
        None => MoveList::new(),
    }
}

/// Every legal move for `color`, in board order.
pub fn legal_moves(board: &Board, color: Color) -> MoveList {
    let mut all = MoveList::new();
    for (src, _) in board.pieces_of(color) {
        all.extend_from(&pseudo_legal_moves(board, src));
    }
    filter_legal(board, color, &all)
}

/// `color` is in check and has no legal move.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    king_attacked(board, color) && legal_moves(board, color).is_empty()
}

/// `color` is not in check but has no legal move.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !king_attacked(board, color) && legal_moves(board, color).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Setup;
    use crate::piece_kind::PieceKind;

    fn setup(fen: &str) -> Setup {
        fen.parse().unwrap()
    }

    #[test]
    fn starting_position_has_20_moves() {
        let board = Board::starting_position();
        assert_eq!(legal_moves(&board, Color::White).len(), 20);
        assert_eq!(legal_moves(&board, Color::Black).len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // Black queen on e8 pins the White bishop on e2 to the king on e1.
        let s = setup("4q2k/8/8/8/8/8/4B3/4K3 w - - 0 1");
        let bishop_moves = pseudo_legal_moves(&s.board, Square::E2);
        assert!(!bishop_moves.is_empty());
        assert!(legal_moves_from(&s.board, Square::E2).is_empty());
    }

    #[test]
    fn pinned_rook_may_slide_along_the_pin() {
        let s = setup("4q2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let moves = legal_moves_from(&s.board, Square::E2);
        // e3..e7 plus the capture on e8; nothing sideways.
        assert_eq!(moves.len(), 6);
        assert!(moves.iter().all(|m| m.to().col() == 4));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let s = setup("7k/8/8/8/8/8/r7/4K3 w - - 0 1");
        let moves = legal_moves_from(&s.board, Square::E1);
        // The rook on a2 covers the whole second rank.
        assert!(moves.iter().all(|m| m.to().row() == 7));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn check_must_be_answered() {
        // Rook gives check along the e-file; only king moves or the block on e2 help.
        let s = setup("4r2k/8/8/8/8/8/3N4/3QK3 w - - 0 1");
        assert!(king_attacked(&s.board, Color::White));
        let moves = legal_moves(&s.board, Color::White);
        for mv in &moves {
            let mut after = s.board.snapshot();
            after.execute(mv, true).unwrap();
            assert!(!king_attacked(&after, Color::White), "{mv:?} leaves the king in check");
        }
        assert!(moves.find(Square::D1, Square::E2).is_some());
        assert!(moves.find(Square::D2, Square::B3).is_none());
    }

    #[test]
    fn castling_through_attack_is_rejected() {
        // Bishop on a6 covers f1, so only the queenside castle survives.
        let s = setup("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = legal_moves_from(&s.board, Square::E1);
        assert!(moves.find(Square::E1, Square::G1).is_none());
        assert!(moves.find(Square::E1, Square::C1).is_some());
    }

    #[test]
    fn king_beside_destination_castles_unless_landing_is_covered() {
        use crate::chess_move::MoveKind;
        use crate::piece::Piece;

        let mut board = Board::empty();
        board.place(Square::D1, Piece::new(PieceKind::King, Color::White));
        board.place(Square::A1, Piece::new(PieceKind::Rook, Color::White));
        board.place(Square::H8, Piece::new(PieceKind::King, Color::Black));

        let moves = legal_moves_from(&board, Square::D1);
        let castle = *moves.find(Square::D1, Square::C1).unwrap();
        assert_eq!(
            castle.kind(),
            MoveKind::Castle {
                rook_from: Square::A1,
                rook_to: Square::D1
            }
        );

        let mut after = board.snapshot();
        after.execute(&castle, false).unwrap();
        assert_eq!(after.occupant(Square::C1).map(|p| p.kind()), Some(PieceKind::King));
        assert_eq!(after.occupant(Square::D1).map(|p| p.kind()), Some(PieceKind::Rook));
        assert!(after.is_empty(Square::A1));

        board.place(Square::C8, Piece::new(PieceKind::Rook, Color::Black));
        let moves = legal_moves_from(&board, Square::D1);
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn castling_out_of_check_is_rejected() {
        let s = setup("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = legal_moves_from(&s.board, Square::E1);
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn castling_into_pawn_attack_is_rejected() {
        // A pawn on e2 attacks d1 and f1 even though both are empty.
        let s = setup("4k3/8/8/8/8/8/4p3/R3K2R w KQ - 0 1");
        let moves = legal_moves_from(&s.board, Square::E1);
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn en_passant_exposing_king_is_illegal() {
        // Capturing bxc6 would open the fifth rank to the rook on h5.
        let s = setup("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1");
        let pseudo = pseudo_legal_moves(&s.board, Square::B5);
        assert!(pseudo.iter().any(|m| m.is_en_passant()));
        let legal = legal_moves_from(&s.board, Square::B5);
        assert!(legal.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn filtering_never_mutates_the_board() {
        let s = setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let before = s.board.snapshot();
        let _ = legal_moves(&s.board, Color::White);
        let _ = legal_moves(&s.board, Color::Black);
        assert_eq!(s.board, before);
    }

    #[test]
    fn back_rank_mate_detected() {
        let s = setup("6rk/8/8/8/8/8/5PPP/6K1 w - - 0 1");
        assert!(!is_checkmate(&s.board, Color::White));
        let s = setup("6k1/5ppp/8/8/8/8/8/R5K1 b - - 0 1");
        assert!(!is_checkmate(&s.board, Color::Black));
        let s = setup("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(is_checkmate(&s.board, Color::Black));
    }

    #[test]
    fn stalemate_detected() {
        let s = setup("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(is_stalemate(&s.board, Color::Black));
        assert!(!is_checkmate(&s.board, Color::Black));
    }

    #[test]
    fn missing_king_is_never_attacked() {
        let mut board = Board::starting_position();
        board.remove(Square::E1);
        assert!(!king_attacked(&board, Color::White));
        assert_eq!(board.king_square(Color::White), None);
        assert!(
            board
                .pieces_of(Color::White)
                .all(|(_, id)| board.piece(id).kind() != PieceKind::King)
        );
    }
}
