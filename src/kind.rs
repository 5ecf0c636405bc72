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

use crate::{piece::Piece, side::Side};

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
///
/// # Examples
///
/// ```
/// use gambit::PieceKind;
///
/// assert_eq!(PieceKind::from_char('N'), Some(PieceKind::Knight));
/// assert_eq!("(Q)".parse::<PieceKind>()?, PieceKind::Queen);
/// # Ok::<_, gambit::ParseKindError>(())
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// Gets the piece type from its uppercase English letter.
    pub const fn from_char(ch: char) -> Option<PieceKind> {
        match ch {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Gets the uppercase English letter for the piece type.
    pub const fn char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Gets a fresh, unmoved [`Piece`] of the given side.
    #[inline]
    pub const fn of(self, side: Side) -> Piece {
        Piece {
            side,
            kind: self,
            moved: false,
        }
    }

    /// Whether a pawn may be replaced by this kind.
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, and `King`, in this order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The kinds a pawn may promote to, most valuable first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
    ];
}

/// Writes the token form used by the save format, e.g. `(Q)`.
impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.char())
    }
}

/// Error when parsing an invalid piece kind.
#[derive(Clone, Debug)]
pub struct ParseKindError;

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece kind")
    }
}

impl Error for ParseKindError {}

/// Parses either the bare letter (`Q`) or the token form (`(Q)`).
impl FromStr for PieceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<PieceKind, ParseKindError> {
        let letter = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(s);

        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => PieceKind::from_char(ch).ok_or(ParseKindError),
            _ => Err(ParseKindError),
        }
    }
}
