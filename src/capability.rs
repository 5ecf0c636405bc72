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

//! Raw candidate destinations per piece kind.
//!
//! Candidates honor movement shape, blocking and captures, but not whether
//! the move would expose the mover's own king. That final filter needs a
//! simulated board and lives in [`Game`](crate::Game).

use crate::{
    attacks::{self, BISHOP_DIRECTIONS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS},
    board::Board,
    kind::PieceKind,
    m::{Move, Targets},
    piece::Piece,
    side::Side,
    square::Square,
};

/// Column the king starts on, and must still be on to castle.
pub const KING_COL: i8 = 4;

/// Collects the raw candidate destinations of the piece on `from`.
///
/// Returns an empty set for an empty square.
///
/// # Examples
///
/// ```
/// use gambit::{capability, Board, Square};
///
/// let board = Board::default();
/// let knight = Square::from_algebraic("g1").unwrap();
/// assert_eq!(capability::candidates(&board, knight).len(), 2);
/// ```
pub fn candidates(board: &Board, from: Square) -> Targets {
    let mut targets = Targets::new();

    if let Some(piece) = board.piece_at(from) {
        match piece.kind {
            PieceKind::Pawn => pawn_targets(board, from, piece, &mut targets),
            PieceKind::Knight => step_targets(board, from, piece.side, &KNIGHT_OFFSETS, &mut targets),
            PieceKind::Bishop => slide_targets(board, from, piece.side, &BISHOP_DIRECTIONS, &mut targets),
            PieceKind::Rook => slide_targets(board, from, piece.side, &ROOK_DIRECTIONS, &mut targets),
            PieceKind::Queen => slide_targets(board, from, piece.side, &QUEEN_DIRECTIONS, &mut targets),
            PieceKind::King => {
                step_targets(board, from, piece.side, &QUEEN_DIRECTIONS, &mut targets);
                castling_targets(board, from, piece, &mut targets);
            }
        }
    }

    targets
}

fn is_free_or_enemy(board: &Board, sq: Square, side: Side) -> bool {
    board.side_at(sq) != Some(side)
}

fn step_targets(board: &Board, from: Square, side: Side, offsets: &[(i8, i8)], targets: &mut Targets) {
    targets.extend(
        offsets
            .iter()
            .filter_map(|&(drow, dcol)| from.offset(drow, dcol))
            .filter(|&to| is_free_or_enemy(board, to, side)),
    );
}

fn slide_targets(board: &Board, from: Square, side: Side, directions: &[(i8, i8)], targets: &mut Targets) {
    for &dir in directions {
        for to in attacks::ray(from, dir) {
            match board.side_at(to) {
                None => targets.push(to),
                Some(other) => {
                    if other != side {
                        targets.push(to);
                    }
                    break;
                }
            }
        }
    }
}

fn pawn_targets(board: &Board, from: Square, pawn: Piece, targets: &mut Targets) {
    let forward = pawn.side.forward();

    if let Some(single) = from.offset(forward, 0).filter(|&sq| board.is_empty_at(sq)) {
        targets.push(single);

        if pawn.is_unmoved() && from.row() == pawn.side.pawn_row() {
            if let Some(double) = single.offset(forward, 0).filter(|&sq| board.is_empty_at(sq)) {
                targets.push(double);
            }
        }
    }

    let en_passant = board
        .en_passant_target()
        .filter(|&(_, side)| side != pawn.side)
        .map(|(sq, _)| sq);

    for dcol in [-1, 1] {
        if let Some(to) = from.offset(forward, dcol) {
            let capture = board.side_at(to).is_some_and(|side| side != pawn.side);
            if capture || en_passant == Some(to) {
                targets.push(to);
            }
        }
    }
}

/// The rook that castles together with the king on `king` when it moves to
/// `king_to`, and the rook's destination next to the king.
///
/// Only checks board geometry: an unmoved king on its starting column, an
/// unmoved rook of the same side in the corner it castles towards, and
/// nothing in between.
pub fn castling_rook(board: &Board, king: Square, king_to: Square) -> Option<(Square, Square)> {
    let piece = board.piece_at(king)?;
    if piece.kind != PieceKind::King || piece.moved || king.col() != KING_COL {
        return None;
    }

    let row = king.row();
    let (rook_col, rook_to_col) = match king_to.col() - king.col() {
        2 if king_to.row() == row => (7, 5),
        -2 if king_to.row() == row => (0, 3),
        _ => return None,
    };

    let rook = Square::new(row, rook_col);
    if !board
        .piece_at(rook)
        .is_some_and(|r| r.is(piece.side, PieceKind::Rook) && r.is_unmoved())
    {
        return None;
    }

    let path_clear = attacks::between(king, rook)
        .is_some_and(|path| path.iter().all(|&sq| board.is_empty_at(sq)));

    path_clear.then(|| (rook, Square::new(row, rook_to_col)))
}

fn castling_targets(board: &Board, king: Square, piece: Piece, targets: &mut Targets) {
    if piece.moved {
        return;
    }
    for dcol in [-2, 2] {
        if let Some(to) = king.offset(0, dcol) {
            if castling_rook(board, king, to).is_some() {
                targets.push(to);
            }
        }
    }
}

/// Classifies the move of the piece on `from` to `to`. Assumes `to` is one
/// of the piece's candidates.
pub fn classify(board: &Board, from: Square, to: Square) -> Option<Move> {
    let piece = board.piece_at(from)?;
    let capture = board.piece_at(to).map(|captured| captured.kind);

    Some(match piece.kind {
        PieceKind::Pawn if to.row() == piece.side.promotion_row() => Move::Promotion { from, to, capture },
        PieceKind::Pawn if (to.row() - from.row()).abs() == 2 => Move::DoubleStep { from, to },
        PieceKind::Pawn if from.col() != to.col() && capture.is_none() => Move::EnPassant {
            from,
            to,
            captured: Square::new(from.row(), to.col()),
        },
        PieceKind::King if (to.col() - from.col()).abs() == 2 => {
            let (rook, rook_to) = castling_rook(board, from, to)?;
            Move::Castle {
                king: from,
                king_to: to,
                rook,
                rook_to,
            }
        }
        kind => Move::Normal {
            kind,
            from,
            to,
            capture,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn sorted(mut targets: Targets) -> Vec<Square> {
        targets.sort();
        targets.to_vec()
    }

    #[test]
    fn test_opening_candidates() {
        let board = Board::default();
        let total: usize = board
            .pieces_of(Side::First)
            .map(|(from, _)| candidates(&board, from).len())
            .sum();
        assert_eq!(total, 20);
        assert_eq!(sorted(candidates(&board, sq("e2"))), [sq("e4"), sq("e3")]);
        assert!(candidates(&board, sq("a1")).is_empty());
        assert!(candidates(&board, sq("e4")).is_empty());
    }

    #[test]
    fn test_slider_stops_at_pieces() {
        let mut board = Board::empty();
        board.set_piece_at(sq("d4"), PieceKind::Rook.of(Side::First));
        board.set_piece_at(sq("d6"), PieceKind::Pawn.of(Side::Second));
        board.set_piece_at(sq("f4"), PieceKind::Pawn.of(Side::First));

        let targets = candidates(&board, sq("d4"));
        assert!(targets.contains(&sq("d5")));
        assert!(targets.contains(&sq("d6")));
        assert!(!targets.contains(&sq("d7")));
        assert!(targets.contains(&sq("e4")));
        assert!(!targets.contains(&sq("f4")));
        assert_eq!(targets.len(), 2 + 3 + 3 + 1);
    }

    #[test]
    fn test_queen_in_center() {
        let mut board = Board::empty();
        board.set_piece_at(sq("d4"), PieceKind::Queen.of(Side::Second));
        assert_eq!(candidates(&board, sq("d4")).len(), 27);
    }

    #[test]
    fn test_pawn_captures_and_en_passant() {
        let mut board = Board::empty();
        board.set_piece_at(sq("e5"), PieceKind::Pawn.of(Side::First).into_moved());
        board.set_piece_at(sq("d7"), PieceKind::Pawn.of(Side::Second));
        board.set_piece_at(sq("f6"), PieceKind::Knight.of(Side::Second));
        assert_eq!(sorted(candidates(&board, sq("e5"))), [sq("e6"), sq("f6")]);

        board.play_unchecked(Move::DoubleStep {
            from: sq("d7"),
            to: sq("d5"),
        });
        assert_eq!(
            sorted(candidates(&board, sq("e5"))),
            [sq("d6"), sq("e6"), sq("f6")]
        );
        assert_eq!(
            classify(&board, sq("e5"), sq("d6")),
            Some(Move::EnPassant {
                from: sq("e5"),
                to: sq("d6"),
                captured: sq("d5"),
            })
        );
    }

    #[test]
    fn test_double_step_only_from_pawn_row() {
        let mut board = Board::empty();
        board.set_piece_at(sq("e3"), PieceKind::Pawn.of(Side::First));
        board.set_piece_at(sq("b7"), PieceKind::Pawn.of(Side::Second));
        board.set_piece_at(sq("c5"), PieceKind::Pawn.of(Side::Second));

        assert_eq!(&candidates(&board, sq("e3"))[..], &[sq("e4")]);
        assert_eq!(&candidates(&board, sq("b7"))[..], &[sq("b6"), sq("b5")]);
        assert_eq!(&candidates(&board, sq("c5"))[..], &[sq("c4")]);
    }

    #[test]
    fn test_castling_geometry() {
        let mut board = Board::empty();
        board.set_piece_at(sq("e1"), PieceKind::King.of(Side::First));
        board.set_piece_at(sq("a1"), PieceKind::Rook.of(Side::First));
        board.set_piece_at(sq("h1"), PieceKind::Rook.of(Side::First));

        let targets = candidates(&board, sq("e1"));
        assert!(targets.contains(&sq("g1")));
        assert!(targets.contains(&sq("c1")));
        assert_eq!(castling_rook(&board, sq("e1"), sq("g1")), Some((sq("h1"), sq("f1"))));
        assert_eq!(castling_rook(&board, sq("e1"), sq("c1")), Some((sq("a1"), sq("d1"))));

        board.set_piece_at(sq("b1"), PieceKind::Knight.of(Side::First));
        assert_eq!(castling_rook(&board, sq("e1"), sq("c1")), None);

        let moved = board.piece_at(sq("h1")).unwrap().into_moved();
        board.set_piece_at(sq("h1"), moved);
        assert!(!candidates(&board, sq("e1")).contains(&sq("g1")));
    }

    #[test]
    fn test_classify() {
        let mut board = Board::empty();
        board.set_piece_at(sq("b7"), PieceKind::Pawn.of(Side::First).into_moved());
        board.set_piece_at(sq("a8"), PieceKind::Rook.of(Side::Second));
        assert_eq!(
            classify(&board, sq("b7"), sq("a8")),
            Some(Move::Promotion {
                from: sq("b7"),
                to: sq("a8"),
                capture: Some(PieceKind::Rook),
            })
        );
        assert!(classify(&board, sq("b7"), sq("b8")).unwrap().is_promotion());
        assert_eq!(classify(&board, sq("c3"), sq("c4")), None);
    }
}
