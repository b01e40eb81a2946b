//! Perft (performance test) for move generation correctness verification.
//!
//! Pawns that reach the last rank always become queens, so node counts only
//! match the published tables for depths where no promotion occurs.

use crate::board::Board;
use crate::color::Color;
use crate::movegen::legal_moves;

/// Count the number of leaf nodes at the given depth with `side` to move.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without executing them.
pub fn perft(board: &Board, side: Color, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, side);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut scratch = board.snapshot();
    let mut nodes = 0u64;
    for mv in &moves {
        // Legal moves always start on an occupied square.
        let Ok(undo) = scratch.execute(mv, true) else {
            continue;
        };
        nodes += perft(&scratch, side.flip(), depth - 1);
        scratch.undo(undo);
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns a vector of `(uci_move, node_count)` pairs sorted alphabetically.
pub fn divide(board: &Board, side: Color, depth: usize) -> Vec<(String, u64)> {
    let mut scratch = board.snapshot();
    let mut results: Vec<(String, u64)> = legal_moves(board, side)
        .iter()
        .filter_map(|mv| {
            let undo = scratch.execute(mv, true).ok()?;
            let count = if depth <= 1 {
                1
            } else {
                perft(&scratch, side.flip(), depth - 1)
            };
            scratch.undo(undo);
            Some((mv.to_uci(), count))
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Setup;

    fn run(fen: &str, depth: usize) -> u64 {
        let setup: Setup = fen.parse().unwrap();
        perft(&setup.board, setup.side_to_move, depth)
    }

    // --- Position 1: Starting position ---

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Board::starting_position(), Color::White, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Board::starting_position(), Color::White, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Board::starting_position(), Color::White, 3), 8_902);
    }

    // --- Position 2: Kiwipete ---
    // Exercises castling both ways, en passant and pins in one position.

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(run(KIWIPETE, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(run(KIWIPETE, 2), 2_039);
    }

    // --- Position 3: rook and pawn endgame ---

    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn perft_position3_depth_1() {
        assert_eq!(run(POSITION_3, 1), 14);
    }

    #[test]
    fn perft_position3_depth_2() {
        assert_eq!(run(POSITION_3, 2), 191);
    }

    #[test]
    fn perft_position3_depth_3() {
        assert_eq!(run(POSITION_3, 3), 2_812);
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = Board::starting_position();
        let split = divide(&board, Color::White, 2);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert!(split.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(split.iter().any(|(uci, n)| uci == "g1f3" && *n == 20));
    }

    #[test]
    fn perft_leaves_board_untouched() {
        let setup: Setup = KIWIPETE.parse().unwrap();
        let before = setup.board.clone();
        let _ = perft(&setup.board, setup.side_to_move, 2);
        assert_eq!(setup.board, before);
    }
}
