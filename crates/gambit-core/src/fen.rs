//! FEN string parsing and serialization.
//!
//! A [`Board`] carries no side-to-move, castling field or clocks of its own;
//! castling availability lives in the `moved` flags of kings and rooks and the
//! en passant target in the flag of the pawn that just double-stepped. Parsing
//! translates the FEN fields into those flags and serialization reads them back.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A position parsed from FEN: the board plus the side to move and clocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub board: Board,
    pub side_to_move: Color,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Setup {
    /// The standard starting position, White to move.
    pub fn starting_position() -> Setup {
        Setup {
            board: Board::starting_position(),
            side_to_move: Color::White,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Default for Setup {
    fn default() -> Self {
        Setup::starting_position()
    }
}

/// Castling availability as written in the third FEN field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CastlingField {
    /// Indexed by `[color][side]`, side 0 = queen side (file a), 1 = king side (file h).
    rights: [[bool; 2]; Color::COUNT],
}

impl CastlingField {
    fn parse(field: &str) -> Result<CastlingField, FenError> {
        let mut parsed = CastlingField::default();
        if field == "-" {
            return Ok(parsed);
        }
        for c in field.chars() {
            let (color, side) = match c {
                'K' => (Color::White, 1),
                'Q' => (Color::White, 0),
                'k' => (Color::Black, 1),
                'q' => (Color::Black, 0),
                _ => return Err(FenError::Castling { character: c }),
            };
            parsed.rights[color.index()][side] = true;
        }
        Ok(parsed)
    }

    fn any(&self, color: Color) -> bool {
        self.rights[color.index()].iter().any(|&r| r)
    }

    /// Whether a piece of `kind` and `color` standing on `sq` keeps its
    /// never-moved status under these rights.
    fn keeps_unmoved(&self, kind: PieceKind, color: Color, sq: Square) -> bool {
        if sq.row() != color.home_row() {
            return false;
        }
        match kind {
            PieceKind::King => sq.col() == 4 && self.any(color),
            PieceKind::Rook => match sq.col() {
                0 => self.rights[color.index()][0],
                7 => self.rights[color.index()][1],
                _ => false,
            },
            _ => false,
        }
    }
}

impl FromStr for Setup {
    type Err = FenError;

    /// Parse a FEN string. Only the placement and active color are required;
    /// missing trailing fields take the values of a fresh game.
    fn from_str(fen: &str) -> Result<Setup, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(2..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount {
                found: fields.len(),
            });
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::SideToMove {
                    found: other.to_string(),
                });
            }
        };

        let castling = CastlingField::parse(fields.get(2).copied().unwrap_or("-"))?;
        let mut board = parse_placement(fields[0], &castling)?;

        let en_passant = fields.get(3).copied().unwrap_or("-");
        if en_passant != "-" {
            mark_en_passant(&mut board, en_passant, side_to_move)?;
        }

        let halfmove_clock = parse_counter(fields.get(4), "halfmove clock", 0)?;
        let fullmove_number = parse_counter(fields.get(5), "fullmove number", 1)?;

        board.validate()?;
        Ok(Setup {
            board,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        })
    }
}

fn parse_placement(placement: &str, castling: &CastlingField) -> Result<Board, FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::RowCount { found: rows.len() });
    }

    let mut board = Board::empty();
    for (row, row_str) in rows.iter().enumerate() {
        let mut col: usize = 0;
        for c in row_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::UnknownPiece { character: c });
                }
                col += digit as usize;
                if col > 8 {
                    return Err(FenError::RowLength { row, length: col });
                }
                continue;
            }

            let piece = Piece::from_fen_char(c).ok_or(FenError::UnknownPiece { character: c })?;
            if col >= 8 {
                return Err(FenError::RowLength {
                    row,
                    length: col + 1,
                });
            }
            let sq = Square::new(row as u8, col as u8).ok_or(FenError::RowLength {
                row,
                length: col + 1,
            })?;
            let moved = match piece.kind() {
                // A pawn is fresh only if the row behind it is its home row.
                PieceKind::Pawn => {
                    let behind = sq.offset(-piece.color().forward(), 0).map(Square::row);
                    behind != Some(piece.color().home_row())
                }
                kind => !castling.keeps_unmoved(kind, piece.color(), sq),
            };
            board.place(sq, piece.with_moved(moved));
            col += 1;
        }
        if col != 8 {
            return Err(FenError::RowLength { row, length: col });
        }
    }
    Ok(board)
}

/// Flag the pawn that just passed over `target` as capturable en passant.
fn mark_en_passant(board: &mut Board, target: &str, side_to_move: Color) -> Result<(), FenError> {
    let invalid = || FenError::EnPassant {
        found: target.to_string(),
    };
    let target_sq = Square::from_algebraic(target).ok_or_else(invalid)?;
    // Rank 6 when White is to move, rank 3 when Black is.
    let target_row = match side_to_move {
        Color::White => 2,
        Color::Black => 5,
    };
    if target_sq.row() != target_row || !board.is_empty(target_sq) {
        return Err(invalid());
    }
    let victim_sq = target_sq.offset(-side_to_move.forward(), 0).ok_or_else(invalid)?;
    let victim = board.occupant_id(victim_sq).ok_or_else(invalid)?;
    let piece = board.piece(victim);
    if piece.kind() != PieceKind::Pawn || piece.color() != side_to_move.flip() {
        return Err(invalid());
    }
    board.piece_mut(victim).en_passant = true;
    Ok(())
}

fn parse_counter(field: Option<&&str>, name: &'static str, default: u16) -> Result<u16, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s.parse::<u16>().map_err(|_| FenError::Counter {
            field: name,
            found: s.to_string(),
        }),
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = &self.board;

        for row in 0u8..8 {
            let mut empty_count = 0u8;
            for col in 0u8..8 {
                match Square::new(row, col).and_then(|sq| board.occupant(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if row < 7 {
                write!(f, "/")?;
            }
        }

        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, " {side} ")?;

        let mut castling = String::new();
        for (color, letters) in [(Color::White, ['K', 'Q']), (Color::Black, ['k', 'q'])] {
            for (corner, letter) in [(7u8, letters[0]), (0u8, letters[1])] {
                if can_still_castle(board, color, corner) {
                    castling.push(letter);
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        write!(f, "{castling}")?;

        let target = board
            .pieces_of(self.side_to_move.flip())
            .find(|&(_, id)| board.piece(id).is_en_passant_target())
            .and_then(|(sq, _)| sq.offset(self.side_to_move.forward(), 0));
        match target {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

fn can_still_castle(board: &Board, color: Color, corner: u8) -> bool {
    let row = color.home_row();
    let unmoved = |col: u8, kind: PieceKind| {
        Square::new(row, col)
            .and_then(|sq| board.occupant(sq))
            .is_some_and(|p| p.kind() == kind && p.color() == color && !p.moved())
    };
    unmoved(4, PieceKind::King) && unmoved(corner, PieceKind::Rook)
}
