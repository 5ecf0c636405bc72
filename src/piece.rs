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

use std::fmt;

use crate::{kind::PieceKind, side::Side};

/// A piece with [`Side`], [`PieceKind`] and a "has moved" flag.
///
/// Pieces carry no position: the square holding a piece is its position.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
    /// Set after the first move. Only pawns, rooks and kings consult it.
    pub moved: bool,
}

impl Piece {
    /// The same piece after it has been moved.
    #[must_use]
    pub const fn into_moved(self) -> Piece {
        Piece {
            moved: true,
            ..self
        }
    }

    /// Whether the piece may still take part in castling or make a
    /// double step.
    #[inline]
    pub const fn is_unmoved(self) -> bool {
        !self.moved
    }

    #[inline]
    pub fn is(self, side: Side, kind: PieceKind) -> bool {
        self.side == side && self.kind == kind
    }
}

/// One letter per piece, uppercase for the first side.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = self.kind.char();
        if self.side.is_first() {
            write!(f, "{ch}")
        } else {
            write!(f, "{}", ch.to_ascii_lowercase())
        }
    }
}
