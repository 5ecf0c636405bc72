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

use std::fmt::{self, Write as _};

use crate::{
    attacks::{self, KNIGHT_OFFSETS, QUEEN_DIRECTIONS},
    kind::PieceKind,
    m::{Move, Targets},
    piece::Piece,
    side::{BySide, Side},
    square::Square,
};

/// Piece placement, king locations and the en passant marker.
///
/// The grid owns its pieces. `Clone` produces a fully independent copy,
/// which is what legality probes play on.
///
/// # Examples
///
/// ```
/// use gambit::{Board, PieceKind, Side, Square};
///
/// let board = Board::default();
/// assert_eq!(board.piece_at(Square::new(7, 4)), Some(PieceKind::King.of(Side::First)));
/// assert_eq!(board.king_of(Side::Second), Some(Square::new(0, 4)));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    kings: BySide<Option<Square>>,
    en_passant: Option<Square>,
}

impl Board {
    /// An empty board.
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
            kings: BySide {
                first: None,
                second: None,
            },
            en_passant: None,
        }
    }

    /// The standard opening layout.
    pub fn new() -> Board {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for side in Side::ALL {
            for (col, kind) in (0..).zip(BACK_ROW) {
                board.set_piece_at(Square::new(side.home_row(), col), kind.of(side));
                board.set_piece_at(
                    Square::new(side.pawn_row(), col),
                    PieceKind::Pawn.of(side),
                );
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.to_usize()]
    }

    #[inline]
    pub fn side_at(&self, sq: Square) -> Option<Side> {
        self.piece_at(sq).map(|piece| piece.side)
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Places a piece, returning whatever occupied the square before.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        let previous = self.remove_piece_at(sq);
        if piece.kind == PieceKind::King {
            *self.kings.get_mut(piece.side) = Some(sq);
        }
        self.squares[sq.to_usize()] = Some(piece);
        previous
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.to_usize()].take()?;
        if piece.kind == PieceKind::King && *self.kings.get(piece.side) == Some(sq) {
            *self.kings.get_mut(piece.side) = None;
        }
        if self.en_passant == Some(sq) {
            self.en_passant = None;
        }
        Some(piece)
    }

    /// Square of the king of `side`.
    #[inline]
    pub fn king_of(&self, side: Side) -> Option<Square> {
        *self.kings.get(side)
    }

    /// Square of the pawn that may be captured en passant.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, pawn: Option<Square>) {
        self.en_passant = pawn;
    }

    pub fn clear_en_passant(&mut self) {
        self.en_passant = None;
    }

    /// The empty square an en passant capture lands on, i.e. the square
    /// the marked pawn skipped, together with the pawn's side.
    pub fn en_passant_target(&self) -> Option<(Square, Side)> {
        let pawn = self.en_passant?;
        let side = self.side_at(pawn)?;
        pawn.offset(-side.forward(), 0).map(|target| (target, side))
    }

    /// Iterates over all occupied squares, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the pieces of one side.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.side == side)
    }

    /// Finds every piece of `side` that could move onto `target` next.
    ///
    /// Used both to test whether a king is in check and to find defenders
    /// that can capture a checking piece or step between it and the king.
    /// Only the first occupant along each of the eight lines can reach the
    /// target. Knights jump, so their eight offsets are tested directly.
    ///
    /// Pawns reach an occupied target diagonally forward and an empty target
    /// straight ahead, including the initial two-row advance.
    pub fn attackers(&self, side: Side, target: Square) -> Targets {
        let mut result = Targets::new();
        let target_empty = self.is_empty_at(target);

        for dir in QUEEN_DIRECTIONS {
            let first = (1..)
                .zip(attacks::ray(target, dir))
                .find_map(|(distance, sq)| self.piece_at(sq).map(|piece| (distance, sq, piece)));

            if let Some((distance, sq, piece)) = first {
                if piece.side == side && reaches_along(piece, sq, dir, distance, target_empty) {
                    result.push(sq);
                }
            }
        }

        for (drow, dcol) in KNIGHT_OFFSETS {
            if let Some(sq) = target.offset(drow, dcol) {
                if self.piece_at(sq).is_some_and(|p| p.is(side, PieceKind::Knight)) {
                    result.push(sq);
                }
            }
        }

        result
    }

    /// Tests whether the king of `side` is attacked by the opponent.
    pub fn is_in_check(&self, side: Side) -> bool {
        self.king_of(side)
            .is_some_and(|king| !self.attackers(!side, king).is_empty())
    }

    /// Applies a move without any legality checks.
    ///
    /// Moved pieces get their "has moved" flag set. A double step arms the
    /// en passant marker. A promotion leaves the pawn on the farthest row;
    /// replacing it is up to the caller.
    pub fn play_unchecked(&mut self, m: Move) {
        match m {
            Move::Normal { from, to, .. } | Move::Promotion { from, to, .. } => {
                self.relocate(from, to);
            }
            Move::DoubleStep { from, to } => {
                self.relocate(from, to);
                self.en_passant = Some(to);
            }
            Move::EnPassant { from, to, captured } => {
                self.remove_piece_at(captured);
                self.relocate(from, to);
            }
            Move::Castle {
                king,
                king_to,
                rook,
                rook_to,
            } => {
                self.relocate(king, king_to);
                self.relocate(rook, rook_to);
            }
        }
    }

    fn relocate(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.remove_piece_at(from) {
            self.set_piece_at(to, piece.into_moved());
        }
    }
}

/// Whether `piece` on `from`, found `distance` steps away from the target
/// in direction `dir` with nothing in between, can move onto the target.
fn reaches_along(piece: Piece, from: Square, dir: (i8, i8), distance: u32, target_empty: bool) -> bool {
    let orthogonal = attacks::is_orthogonal(dir);

    match piece.kind {
        PieceKind::Queen => true,
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => !orthogonal,
        PieceKind::King => distance == 1,
        PieceKind::Knight => false,
        PieceKind::Pawn => {
            // The target must lie ahead of the pawn, so looking from the
            // target the pawn sits behind it.
            let behind = dir.0 == -piece.side.forward();
            if !behind {
                false
            } else if orthogonal {
                let double_step = piece.is_unmoved() && from.row() == piece.side.pawn_row();
                target_empty && (distance == 1 || (distance == 2 && double_step))
            } else {
                !target_empty && distance == 1
            }
        }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => write!(f, "{piece}")?,
                    None => f.write_char('.')?,
                }
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}
