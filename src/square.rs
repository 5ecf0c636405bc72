// This file is part of the gambit library.
// Copyright (C) 2026 The gambit authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{error::Error, fmt, str::FromStr};

/// A square of the 8×8 grid, addressed by `(row, col)`.
///
/// Row 0 is the second side's home row, row 7 the first side's. In
/// algebraic terms row 7 is rank 1 and column 0 is file a.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Square {
        debug_assert!(0 <= row && row < 8);
        debug_assert!(0 <= col && col < 8);
        Square((row * 8 + col) as u8)
    }

    /// Gets the square at `(row, col)`, or `None` if off the board.
    #[inline]
    pub const fn from_coords(row: i8, col: i8) -> Option<Square> {
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Some(Square::new(row, col))
        } else {
            None
        }
    }

    /// Parses algebraic notation such as `e2`.
    ///
    /// ```
    /// use gambit::Square;
    ///
    /// let sq = Square::from_algebraic("e2").unwrap();
    /// assert_eq!((sq.row(), sq.col()), (6, 4));
    /// ```
    pub fn from_algebraic(s: &str) -> Option<Square> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Square::from_coords((b'8' - rank) as i8, (file - b'a') as i8)
            }
            _ => None,
        }
    }

    #[inline]
    pub const fn row(self) -> i8 {
        (self.0 >> 3) as i8
    }

    #[inline]
    pub const fn col(self) -> i8 {
        (self.0 & 7) as i8
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Moves by the given row and column deltas, if the result stays on the
    /// board.
    #[inline]
    pub const fn offset(self, drow: i8, dcol: i8) -> Option<Square> {
        Square::from_coords(self.row() + drow, self.col() + dcol)
    }

    /// Tile color. Purely cosmetic.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }

    /// All 64 squares, row by row.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }
}

/// Writes the save-format coordinates: row digit, then column digit.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row(), self.col())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.col() as u8) as char,
            (b'8' - self.row() as u8) as char
        )
    }
}

/// Error when parsing an invalid square.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square")
    }
}

impl Error for ParseSquareError {}

/// Parses the save-format coordinates, e.g. `74` for row 7, column 4.
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        match s.as_bytes() {
            [row @ b'0'..=b'7', col @ b'0'..=b'7'] => {
                Ok(Square::new((row - b'0') as i8, (col - b'0') as i8))
            }
            _ => Err(ParseSquareError),
        }
    }
}
