//! The chess board: an arena of pieces indexed from an 8x8 grid, plus move execution.

use std::fmt;

use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::square::{self, Square};

/// Back-rank layout from file a to file h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Board state.
///
/// Pieces live in an arena and are referenced by [`PieceId`]; the grid maps
/// each square to at most one id. Captured pieces stay in the arena but are
/// detached from the grid, which is what makes [`Board::undo`] cheap.
/// Cloning a board deep-copies every piece.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<PieceId>; Square::COUNT],
    pieces: Vec<Piece>,
    /// Most recent move executed outside simulation.
    last_move: Option<Move>,
}

/// Everything [`Board::undo`] needs to reverse one [`Board::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undo {
    mv: Move,
    mover: PieceId,
    mover_before: Piece,
    victim: Option<(PieceId, Square)>,
    rook: Option<RookShift>,
    cleared_en_passant: Vec<PieceId>,
    last_move: Option<Move>,
}

impl Undo {
    /// The move this record reverses.
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    /// The piece that moved.
    pub fn mover(&self) -> PieceId {
        self.mover
    }

    /// The piece removed by the move, if any.
    pub fn victim(&self) -> Option<PieceId> {
        self.victim.map(|(id, _)| id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RookShift {
    id: PieceId,
    before: Piece,
    from: Square,
    to: Square,
}

impl Board {
    /// Return a board with no pieces.
    pub fn empty() -> Board {
        Board {
            grid: [None; Square::COUNT],
            pieces: Vec::with_capacity(32),
            last_move: None,
        }
    }

    /// Return the standard starting position, White at the bottom.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for (color, back_row, pawn_row) in [(Color::Black, 0u8, 1u8), (Color::White, 7, 6)] {
            for col in 0u8..8 {
                if let Some(sq) = Square::new(back_row, col) {
                    board.place(sq, Piece::new(BACK_RANK[col as usize], color));
                }
                if let Some(sq) = Square::new(pawn_row, col) {
                    board.place(sq, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
        board
    }

    /// Put a piece on `sq`, detaching whatever stood there. Returns the new piece's id.
    pub fn place(&mut self, sq: Square, piece: Piece) -> PieceId {
        debug_assert!(self.pieces.len() < usize::from(u8::MAX), "piece arena is full");
        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(piece);
        self.grid[sq.index()] = Some(id);
        id
    }

    /// Detach the piece on `sq` from the board, returning its id.
    pub fn remove(&mut self, sq: Square) -> Option<PieceId> {
        self.grid[sq.index()].take()
    }

    /// True iff both coordinates lie in `[0, 8)`.
    #[inline]
    pub fn in_range(row: i32, col: i32) -> bool {
        square::in_range(row, col)
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<&Piece> {
        self.grid[sq.index()].map(|id| &self.pieces[id.index()])
    }

    /// Return the id of the piece on `sq`, if any.
    #[inline]
    pub fn occupant_id(&self, sq: Square) -> Option<PieceId> {
        self.grid[sq.index()]
    }

    /// Return the piece with the given id, whether or not it is still on the board.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Return the square holding `id`, or `None` once it has been captured.
    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        Square::all().find(|sq| self.grid[sq.index()] == Some(id))
    }

    /// Return the kind and color on `sq`: all a renderer needs to pick an image.
    pub fn kind_and_color(&self, sq: Square) -> Option<(PieceKind, Color)> {
        self.occupant(sq).map(|p| (p.kind(), p.color()))
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.grid[sq.index()].is_none()
    }

    /// Return `true` if `sq` holds a piece of `color`.
    #[inline]
    pub fn has_piece_of(&self, color: Color, sq: Square) -> bool {
        self.occupant(sq).is_some_and(|p| p.color() == color)
    }

    /// Return `true` if `sq` holds a piece of the side opposing `color`.
    #[inline]
    pub fn has_enemy_of(&self, color: Color, sq: Square) -> bool {
        self.occupant(sq).is_some_and(|p| p.color() != color)
    }

    /// The "can land here" predicate: `sq` is empty or holds an enemy of `color`.
    #[inline]
    pub fn is_empty_or_enemy(&self, color: Color, sq: Square) -> bool {
        !self.has_piece_of(color, sq)
    }

    /// Iterate over the squares and ids of every piece of `color` on the board.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        Square::all().filter_map(move |sq| {
            let id = self.grid[sq.index()]?;
            (self.pieces[id.index()].color() == color).then_some((sq, id))
        })
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Return the square of `color`'s king, or `None` if it is not on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|&(_, id)| self.pieces[id.index()].kind() == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Return the most recent move executed outside simulation.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Produce a fully independent copy for probing hypothetical positions.
    #[inline]
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Clear the en passant flag on every pawn of `color` except `keep`.
    pub fn clear_en_passant_for(&mut self, color: Color, keep: Option<PieceId>) {
        let mut cleared = Vec::new();
        self.take_en_passant_flags(color, keep, &mut cleared);
    }

    fn take_en_passant_flags(&mut self, color: Color, keep: Option<PieceId>, cleared: &mut Vec<PieceId>) {
        for (index, piece) in self.pieces.iter_mut().enumerate() {
            let id = PieceId(index as u8);
            if piece.color() == color && piece.en_passant && Some(id) != keep {
                piece.en_passant = false;
                cleared.push(id);
            }
        }
    }

    /// Execute `mv` and return the record that reverses it.
    ///
    /// Handles every side effect of the move in one call: ordinary and
    /// en passant captures, the rook half of castling, promotion to a queen,
    /// `moved` flags and en passant flags. A flag set by a double step survives
    /// only until the next execution. With `simulate` set the call leaves
    /// [`Board::last_move`] alone; it is meant for scratch boards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptySquare`] if the source square (or, for
    /// castling, the rook's square) is vacant. The board is untouched in that case.
    pub fn execute(&mut self, mv: &Move, simulate: bool) -> Result<Undo, BoardError> {
        let from = mv.from();
        let to = mv.to();
        let mover = self
            .occupant_id(from)
            .ok_or(BoardError::EmptySquare { square: from })?;
        let mover_before = self.pieces[mover.index()];
        let color = mover_before.color();

        let rook = match self.castle_rook_squares(mv, &mover_before) {
            Some((rook_from, rook_to)) => {
                let id = self
                    .occupant_id(rook_from)
                    .ok_or(BoardError::EmptySquare { square: rook_from })?;
                Some(RookShift {
                    id,
                    before: self.pieces[id.index()],
                    from: rook_from,
                    to: rook_to,
                })
            }
            None => None,
        };

        let victim = match self.en_passant_victim(mv, &mover_before) {
            Some(sq) => self.occupant_id(sq).map(|id| (id, sq)),
            None => self.occupant_id(to).map(|id| (id, to)),
        };

        let mut cleared_en_passant = Vec::new();
        self.take_en_passant_flags(color, None, &mut cleared_en_passant);
        self.take_en_passant_flags(color.flip(), None, &mut cleared_en_passant);

        if let Some((_, sq)) = victim {
            self.grid[sq.index()] = None;
        }

        self.grid[from.index()] = None;
        self.grid[to.index()] = Some(mover);
        let piece = &mut self.pieces[mover.index()];
        piece.moved = true;
        if piece.kind() == PieceKind::Pawn {
            if to.row() == color.flip().home_row() {
                piece.set_kind(PieceKind::Queen);
            } else if from.row().abs_diff(to.row()) == 2 {
                piece.en_passant = true;
            }
        }

        if let Some(shift) = rook {
            self.grid[shift.from.index()] = None;
            self.grid[shift.to.index()] = Some(shift.id);
            self.pieces[shift.id.index()].moved = true;
        }

        let last_move = self.last_move;
        if !simulate {
            self.last_move = Some(*mv);
        }

        Ok(Undo {
            mv: *mv,
            mover,
            mover_before,
            victim,
            rook,
            cleared_en_passant,
            last_move,
        })
    }

    /// Reverse a move previously applied with [`Board::execute`].
    ///
    /// Undo records must be applied in reverse order of execution.
    pub fn undo(&mut self, undo: Undo) {
        if let Some(shift) = undo.rook {
            self.grid[shift.to.index()] = None;
            self.grid[shift.from.index()] = Some(shift.id);
            self.pieces[shift.id.index()] = shift.before;
        }

        self.grid[undo.mv.to().index()] = None;
        self.grid[undo.mv.from().index()] = Some(undo.mover);
        self.pieces[undo.mover.index()] = undo.mover_before;

        if let Some((id, sq)) = undo.victim {
            self.grid[sq.index()] = Some(id);
        }

        for id in undo.cleared_en_passant {
            self.pieces[id.index()].en_passant = true;
        }

        self.last_move = undo.last_move;
    }

    /// Rook squares for a castling move: taken from the move itself, or
    /// inferred from a king stepping two files.
    fn castle_rook_squares(&self, mv: &Move, mover: &Piece) -> Option<(Square, Square)> {
        if let MoveKind::Castle { rook_from, rook_to } = mv.kind() {
            return Some((rook_from, rook_to));
        }
        if mover.kind() != PieceKind::King || mv.from().col().abs_diff(mv.to().col()) != 2 {
            return None;
        }
        let row = mv.from().row();
        let (corner, landing) = if mv.to().col() > mv.from().col() {
            (7, mv.to().col() - 1)
        } else {
            (0, mv.to().col() + 1)
        };
        Some((Square::new(row, corner)?, Square::new(row, landing)?))
    }

    /// Square of the pawn an en passant capture removes, when `mv` is one:
    /// a diagonal pawn step onto an empty square beside a flagged enemy pawn.
    fn en_passant_victim(&self, mv: &Move, mover: &Piece) -> Option<Square> {
        if mover.kind() != PieceKind::Pawn
            || mv.from().col() == mv.to().col()
            || !self.is_empty(mv.to())
        {
            return None;
        }
        let beside = Square::new(mv.from().row(), mv.to().col())?;
        let target = self.occupant(beside)?;
        (target.color() != mover.color() && target.is_en_passant_target()).then_some(beside)
    }

    /// Validate the structural integrity of the board.
    pub fn validate(&self) -> Result<(), BoardError> {
        // Exactly one king per side
        for color in Color::ALL {
            let king_count = self
                .pieces_of(color)
                .filter(|&(_, id)| self.pieces[id.index()].kind() == PieceKind::King)
                .count() as u32;
            if king_count != 1 {
                return Err(BoardError::KingCount {
                    color: color.name(),
                    count: king_count,
                });
            }
        }

        // No pawns on rank 1 or rank 8
        let pawn_on_back_rank = Square::all()
            .filter(|sq| sq.row() == 0 || sq.row() == 7)
            .any(|sq| self.occupant(sq).is_some_and(|p| p.kind() == PieceKind::Pawn));
        if pawn_on_back_rank {
            return Err(BoardError::PawnOnLastRow);
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{}\n)", self.pretty())
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for row in 0u8..8 {
            write!(f, "{}  ", 8 - row)?;
            for col in 0u8..8 {
                let c = Square::new(row, col)
                    .and_then(|sq| board.occupant(sq))
                    .map_or('.', Piece::fen_char);
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
