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

use arrayvec::ArrayVec;

use crate::{kind::PieceKind, square::Square};

/// A set of squares, e.g. the candidate destinations of a piece. A queen in
/// the center reaches 27 squares, so 32 is always enough.
pub type Targets = ArrayVec<Square, 32>;

/// A committed move, classified by its secondary effects.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// A plain relocation, capturing whatever the target held.
    Normal {
        kind: PieceKind,
        from: Square,
        to: Square,
        capture: Option<PieceKind>,
    },
    /// A pawn's initial two-row advance. Arms en passant.
    DoubleStep { from: Square, to: Square },
    /// A diagonal pawn step onto an empty square, capturing the pawn on
    /// `captured` that just made a double step.
    EnPassant {
        from: Square,
        to: Square,
        captured: Square,
    },
    /// The king moves two columns and the rook jumps next to it.
    Castle {
        king: Square,
        king_to: Square,
        rook: Square,
        rook_to: Square,
    },
    /// A pawn reaching the farthest row. Play pauses until a replacement is
    /// chosen.
    Promotion {
        from: Square,
        to: Square,
        capture: Option<PieceKind>,
    },
}

impl Move {
    /// Gets the kind of the moved piece.
    pub const fn kind(self) -> PieceKind {
        match self {
            Move::Normal { kind, .. } => kind,
            Move::DoubleStep { .. } | Move::EnPassant { .. } | Move::Promotion { .. } => {
                PieceKind::Pawn
            }
            Move::Castle { .. } => PieceKind::King,
        }
    }

    /// Gets the origin square. For castling moves this is the king's square.
    pub const fn from(self) -> Square {
        match self {
            Move::Normal { from, .. }
            | Move::DoubleStep { from, .. }
            | Move::EnPassant { from, .. }
            | Move::Promotion { from, .. } => from,
            Move::Castle { king, .. } => king,
        }
    }

    /// Gets the target square. For castling moves this is the king's
    /// destination.
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. }
            | Move::DoubleStep { to, .. }
            | Move::EnPassant { to, .. }
            | Move::Promotion { to, .. } => to,
            Move::Castle { king_to, .. } => king_to,
        }
    }

    /// Gets the kind of the captured piece or `None`.
    pub const fn capture(self) -> Option<PieceKind> {
        match self {
            Move::Normal { capture, .. } | Move::Promotion { capture, .. } => capture,
            Move::EnPassant { .. } => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    pub const fn is_capture(self) -> bool {
        self.capture().is_some()
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    pub const fn is_promotion(self) -> bool {
        matches!(self, Move::Promotion { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Castle { king, rook, .. } => {
                f.write_str(if king.col() < rook.col() { "O-O" } else { "O-O-O" })
            }
            m => {
                write!(
                    f,
                    "{}{:?}{}{:?}",
                    m.kind().char(),
                    m.from(),
                    if m.is_capture() { 'x' } else { '-' },
                    m.to()
                )?;
                if m.is_promotion() {
                    f.write_str("=?")?;
                }
                Ok(())
            }
        }
    }
}
