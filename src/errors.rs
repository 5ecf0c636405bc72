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

use std::{error::Error, fmt};

use crate::{kind::PieceKind, side::Side, square::Square};

/// Reason a selection, move or promotion was refused.
///
/// These are expected outcomes of play, not failures: the game is left
/// exactly as it was, and the violation becomes the current
/// [status notice](crate::Game::status).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RuleViolation {
    /// Selection attempted on an empty square.
    NoPieceAtSquare { square: Square },
    /// Selection attempted on a piece of the side not to move.
    WrongSideToMove { kind: PieceKind, square: Square },
    /// Move attempted without a selected piece.
    NothingSelected,
    /// Move target holds a piece of the mover's own side.
    OccupiedBySelf { kind: PieceKind, square: Square },
    /// Move target is outside the piece's reach.
    NotInCandidateSet { kind: PieceKind, square: Square },
    /// The move would leave the mover's king attacked.
    WouldLeaveKingInCheck { kind: PieceKind, square: Square },
    /// The mover is in check and the move does not resolve it.
    MustEscapeCheck { kind: PieceKind, square: Square },
    /// A pawn on `square` is waiting for its replacement.
    PromotionPending { square: Square },
    /// A pawn can not become a pawn or a king.
    InvalidPromotion { kind: PieceKind },
    /// The game ended in checkmate.
    GameOver { winner: Side },
}

impl RuleViolation {
    /// The square the notice refers to, if any.
    pub const fn square(self) -> Option<Square> {
        match self {
            RuleViolation::NoPieceAtSquare { square }
            | RuleViolation::WrongSideToMove { square, .. }
            | RuleViolation::OccupiedBySelf { square, .. }
            | RuleViolation::NotInCandidateSet { square, .. }
            | RuleViolation::WouldLeaveKingInCheck { square, .. }
            | RuleViolation::MustEscapeCheck { square, .. }
            | RuleViolation::PromotionPending { square } => Some(square),
            RuleViolation::NothingSelected
            | RuleViolation::InvalidPromotion { .. }
            | RuleViolation::GameOver { .. } => None,
        }
    }

    /// The kind of piece the notice refers to, if any.
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            RuleViolation::WrongSideToMove { kind, .. }
            | RuleViolation::OccupiedBySelf { kind, .. }
            | RuleViolation::NotInCandidateSet { kind, .. }
            | RuleViolation::WouldLeaveKingInCheck { kind, .. }
            | RuleViolation::MustEscapeCheck { kind, .. }
            | RuleViolation::InvalidPromotion { kind } => Some(kind),
            RuleViolation::PromotionPending { .. } => Some(PieceKind::Pawn),
            RuleViolation::NoPieceAtSquare { .. }
            | RuleViolation::NothingSelected
            | RuleViolation::GameOver { .. } => None,
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RuleViolation::NoPieceAtSquare { square } => write!(f, "no piece to select on {square:?}"),
            RuleViolation::WrongSideToMove { kind, square } => {
                write!(f, "{kind} on {square:?} belongs to the wrong side")
            }
            RuleViolation::NothingSelected => f.write_str("no piece selected"),
            RuleViolation::OccupiedBySelf { kind, square } => {
                write!(f, "{kind} can not move onto own piece on {square:?}")
            }
            RuleViolation::NotInCandidateSet { kind, square } => {
                write!(f, "{kind} can not reach {square:?}")
            }
            RuleViolation::WouldLeaveKingInCheck { kind, square } => {
                write!(f, "{kind} to {square:?} would leave the king in check")
            }
            RuleViolation::MustEscapeCheck { kind, square } => {
                write!(f, "{kind} to {square:?} does not get out of check")
            }
            RuleViolation::PromotionPending { square } => {
                write!(f, "pawn on {square:?} must be promoted first")
            }
            RuleViolation::InvalidPromotion { kind } => write!(f, "can not promote to {kind}"),
            RuleViolation::GameOver { winner } => write!(f, "game over, {winner} won"),
        }
    }
}

impl Error for RuleViolation {}

/// Error when loading a serialized game state.
///
/// Loading either yields a complete game or one of these; there are no
/// partially initialized boards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseStateError {
    /// The input ended before the en passant token.
    Truncated,
    /// The color theme index is not a non-negative integer.
    InvalidTheme,
    /// The side to move is neither `white` nor `black`.
    InvalidTurn,
    /// A piece token does not match `(K)wrcf`.
    InvalidPiece { token: String },
    /// The en passant token is neither `null` nor a square holding a pawn
    /// that just made a double step.
    InvalidEnPassant,
    /// Two piece tokens name the same square.
    DuplicateSquare { square: Square },
    /// A side has no king.
    MissingKing { side: Side },
    /// A side has more than one king.
    TooManyKings { side: Side },
    /// Tokens follow the en passant token.
    TrailingTokens,
}

impl fmt::Display for ParseStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStateError::Truncated => f.write_str("truncated game state"),
            ParseStateError::InvalidTheme => f.write_str("invalid color theme"),
            ParseStateError::InvalidTurn => f.write_str("invalid side to move"),
            ParseStateError::InvalidPiece { token } => write!(f, "invalid piece token: {token}"),
            ParseStateError::InvalidEnPassant => f.write_str("invalid en passant marker"),
            ParseStateError::DuplicateSquare { square } => {
                write!(f, "square {square} occupied twice")
            }
            ParseStateError::MissingKing { side } => write!(f, "{side} has no king"),
            ParseStateError::TooManyKings { side } => write!(f, "{side} has more than one king"),
            ParseStateError::TrailingTokens => f.write_str("unexpected tokens after en passant marker"),
        }
    }
}

impl Error for ParseStateError {}
