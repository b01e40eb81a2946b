//! Board squares addressed by `(row, col)`.
//!
//! Row 0 is rank 8 and column 0 is file a, so White starts at the bottom
//! (rows 6 and 7) and its pawns advance towards row 0.

use std::fmt;

use crate::error::BoardError;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// A square on the board, packed as `row * 8 + col`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from a row and column, returning `None` if either is off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square(row * BOARD_SIZE + col))
        } else {
            None
        }
    }

    /// Create a square from signed coordinates, failing fast on anything outside `[0, 8)`.
    pub fn try_new(row: i32, col: i32) -> Result<Square, BoardError> {
        if in_range(row, col) {
            Ok(Square(row as u8 * BOARD_SIZE + col as u8))
        } else {
            Err(BoardError::OutOfRange { row, col })
        }
    }

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if (index as usize) < Self::COUNT {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parse an algebraic square name (e.g. "e4").
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file_byte = bytes[0].to_ascii_lowercase();
        let rank_byte = bytes[1];

        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }

        // Rank 8 sits on row 0.
        Square::new(b'8' - rank_byte, file_byte - b'a')
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row of this square, 0 at the top (rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// Column of this square, 0 on file a.
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// File letter, `'a'..='h'`.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Rank number, 8 on row 0 down to 1 on row 7.
    #[inline]
    pub const fn rank_number(self) -> u8 {
        BOARD_SIZE - self.row()
    }

    /// Return the square `(dr, dc)` away, or `None` when that falls off the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = i32::from(self.row()) + i32::from(dr);
        let col = i32::from(self.col()) + i32::from(dc);
        Square::try_new(row, col).ok()
    }

    /// Iterate over all 64 squares in index order (a8, b8, ..., h1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    // Named square constants
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A7: Square = Square(8);
    pub const B7: Square = Square(9);
    pub const C7: Square = Square(10);
    pub const D7: Square = Square(11);
    pub const E7: Square = Square(12);
    pub const F7: Square = Square(13);
    pub const G7: Square = Square(14);
    pub const H7: Square = Square(15);
    pub const A6: Square = Square(16);
    pub const B6: Square = Square(17);
    pub const C6: Square = Square(18);
    pub const D6: Square = Square(19);
    pub const E6: Square = Square(20);
    pub const F6: Square = Square(21);
    pub const G6: Square = Square(22);
    pub const H6: Square = Square(23);
    pub const A5: Square = Square(24);
    pub const B5: Square = Square(25);
    pub const C5: Square = Square(26);
    pub const D5: Square = Square(27);
    pub const E5: Square = Square(28);
    pub const F5: Square = Square(29);
    pub const G5: Square = Square(30);
    pub const H5: Square = Square(31);
    pub const A4: Square = Square(32);
    pub const B4: Square = Square(33);
    pub const C4: Square = Square(34);
    pub const D4: Square = Square(35);
    pub const E4: Square = Square(36);
    pub const F4: Square = Square(37);
    pub const G4: Square = Square(38);
    pub const H4: Square = Square(39);
    pub const A3: Square = Square(40);
    pub const B3: Square = Square(41);
    pub const C3: Square = Square(42);
    pub const D3: Square = Square(43);
    pub const E3: Square = Square(44);
    pub const F3: Square = Square(45);
    pub const G3: Square = Square(46);
    pub const H3: Square = Square(47);
    pub const A2: Square = Square(48);
    pub const B2: Square = Square(49);
    pub const C2: Square = Square(50);
    pub const D2: Square = Square(51);
    pub const E2: Square = Square(52);
    pub const F2: Square = Square(53);
    pub const G2: Square = Square(54);
    pub const H2: Square = Square(55);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

/// True iff both coordinates lie in `[0, 8)`.
#[inline]
pub fn in_range(row: i32, col: i32) -> bool {
    (0..i32::from(BOARD_SIZE)).contains(&row) && (0..i32::from(BOARD_SIZE)).contains(&col)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self, self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::{Square, in_range};
    use crate::error::BoardError;

    #[test]
    fn row_col_layout() {
        assert_eq!(Square::A8.row(), 0);
        assert_eq!(Square::A8.col(), 0);
        assert_eq!(Square::H1.row(), 7);
        assert_eq!(Square::H1.col(), 7);
        assert_eq!(Square::E2, Square::new(6, 4).unwrap());
        assert_eq!(Square::E4, Square::new(4, 4).unwrap());
    }

    #[test]
    fn algebraic_roundtrip() {
        for sq in Square::all() {
            let name = sq.to_string();
            assert_eq!(Square::from_algebraic(&name), Some(sq), "roundtrip failed for {name}");
        }
        assert_eq!(Square::from_algebraic("e4"), Some(Square::E4));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("e"), None);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(in_range(0, 7));
        assert!(!in_range(8, 0));
        assert!(!in_range(0, -1));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(
            Square::try_new(-1, 3),
            Err(BoardError::OutOfRange { row: -1, col: 3 })
        );
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::H8.offset(-1, 0), None);
        assert_eq!(Square::G1.offset(-2, -1), Some(Square::F3));
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(format!("{}", Square::E2), "e2");
        assert_eq!(format!("{:?}", Square::E2), "e2(6,4)");
    }
}
