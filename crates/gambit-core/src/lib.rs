//! Core chess types: board representation, move generation, and game rules.

mod board;
mod chess_move;
mod color;
mod error;
mod fen;
pub mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod square;

pub use board::{Board, PrettyBoard, Undo};
pub use chess_move::{Capture, Move, MoveKind};
pub use color::Color;
pub use error::{BoardError, FenError};
pub use fen::{STARTING_FEN, Setup};
pub use movegen::{
    MoveList, filter_legal, is_checkmate, is_stalemate, king_attacked, legal_moves,
    legal_moves_from, pseudo_legal_moves, square_attacked,
};
pub use perft::{divide, perft};
pub use piece::{Piece, PieceId};
pub use piece_kind::PieceKind;
pub use square::{BOARD_SIZE, Square, in_range};
