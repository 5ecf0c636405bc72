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

use std::{error::Error, fmt, ops, str::FromStr};

/// The two players. `First` moves first and is written as `white`,
/// `Second` is written as `black`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First = 0,
    Second = 1,
}

impl Side {
    /// Gets the side from its save-format letter, `w` or `b`.
    pub const fn from_char(ch: char) -> Option<Side> {
        match ch {
            'w' => Some(Side::First),
            'b' => Some(Side::Second),
            _ => None,
        }
    }

    #[inline]
    pub fn fold<T>(self, first: T, second: T) -> T {
        match self {
            Side::First => first,
            Side::Second => second,
        }
    }

    #[inline]
    pub const fn is_first(self) -> bool {
        matches!(self, Side::First)
    }

    pub const fn char(self) -> char {
        match self {
            Side::First => 'w',
            Side::Second => 'b',
        }
    }

    /// The row holding this side's pieces in the opening layout.
    #[inline]
    pub const fn home_row(self) -> i8 {
        match self {
            Side::First => 7,
            Side::Second => 0,
        }
    }

    /// The row holding this side's pawns in the opening layout.
    #[inline]
    pub const fn pawn_row(self) -> i8 {
        match self {
            Side::First => 6,
            Side::Second => 1,
        }
    }

    /// The farthest row, where this side's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Side::First => 0,
            Side::Second => 7,
        }
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::First => -1,
            Side::Second => 1,
        }
    }

    /// `First` and `Second`, in this order.
    pub const ALL: [Side; 2] = [Side::First, Side::Second];
}

impl ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.fold(Side::Second, Side::First)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold("white", "black"))
    }
}

/// Error when parsing an invalid side name.
#[derive(Clone, Debug)]
pub struct ParseSideError;

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid side")
    }
}

impl Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Side, ParseSideError> {
        Ok(match s {
            "white" => Side::First,
            "black" => Side::Second,
            _ => return Err(ParseSideError),
        })
    }
}

/// Container with values for each [`Side`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct BySide<T> {
    pub first: T,
    pub second: T,
}

impl<T> BySide<T> {
    #[inline]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }
}

/// Whose turn it is, combined with the phase of the game.
///
/// There is exactly one writer of this value, [`Game`](crate::Game). It
/// starts as `ToMove(Side::First)` and ends in `Over`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    /// The side may select a piece and move.
    ToMove(Side),
    /// The side moved a pawn onto the farthest row and has to pick a
    /// replacement before play continues.
    Paused(Side),
    /// Checkmate. Terminal.
    Over { winner: Side },
}

impl Turn {
    /// The side to move, if the game accepts moves.
    pub const fn to_move(self) -> Option<Side> {
        match self {
            Turn::ToMove(side) => Some(side),
            _ => None,
        }
    }

    /// The side whose move is in progress or next, regardless of phase.
    /// For a finished game this is the loser.
    pub const fn side(self) -> Side {
        match self {
            Turn::ToMove(side) | Turn::Paused(side) => side,
            Turn::Over { winner } => match winner {
                Side::First => Side::Second,
                Side::Second => Side::First,
            },
        }
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Turn::Over { .. })
    }
}

impl Default for Turn {
    fn default() -> Turn {
        Turn::ToMove(Side::First)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_names() {
        assert_eq!("white".parse::<Side>().unwrap(), Side::First);
        assert_eq!("black".parse::<Side>().unwrap(), Side::Second);
        assert!("red".parse::<Side>().is_err());
        for side in Side::ALL {
            assert_eq!(side.to_string().parse::<Side>().unwrap(), side);
            assert_eq!(Side::from_char(side.char()), Some(side));
        }
    }

    #[test]
    fn test_rows() {
        assert_eq!(Side::First.home_row() + Side::First.forward(), Side::First.pawn_row());
        assert_eq!(Side::Second.home_row() + Side::Second.forward(), Side::Second.pawn_row());
        assert_eq!(Side::First.promotion_row(), Side::Second.home_row());
    }

    #[test]
    fn test_turn_side() {
        assert_eq!(Turn::default().to_move(), Some(Side::First));
        assert_eq!(Turn::Paused(Side::Second).to_move(), None);
        assert_eq!(Turn::Over { winner: Side::First }.side(), Side::Second);
    }
}
