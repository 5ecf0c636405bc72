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

//! The game state machine: selection, move validation, promotion, turn
//! order and check detection.
//!
//! # Examples
//!
//! ```
//! use gambit::{Game, Outcome, Side, Square};
//!
//! let sq = |s| Square::from_algebraic(s).unwrap();
//!
//! let mut game = Game::new();
//! game.select_piece_at(sq("e2"))?;
//! game.attempt_move(sq("e4"))?;
//! assert_eq!(game.outcome(), Outcome::InProgress(Side::Second));
//! # Ok::<_, gambit::RuleViolation>(())
//! ```

use log::{debug, info, trace};

use crate::{
    attacks,
    board::Board,
    capability,
    errors::RuleViolation,
    kind::PieceKind,
    m::{Move, Targets},
    overlay::{Marks, Overlay},
    side::{Side, Turn},
    square::Square,
};

/// Result of a game, as shown to the players.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The side to move is not in check.
    InProgress(Side),
    /// The side to move is in check but has a way out.
    InCheck(Side),
    /// The loser is in check without a way out.
    Checkmate { winner: Side },
}

impl Outcome {
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
struct Selection {
    square: Square,
    targets: Targets,
}

/// A game in progress: the board plus turn order, promotion state,
/// the current selection and the last notice.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Turn,
    promotion: Option<Square>,
    selected: Option<Selection>,
    in_check: Option<Side>,
    saved: bool,
    theme: u32,
    status: Option<RuleViolation>,
}

impl Game {
    /// A new game in the opening layout with color theme 0.
    pub fn new() -> Game {
        Game::with_theme(0)
    }

    /// A new game in the opening layout.
    pub fn with_theme(theme: u32) -> Game {
        Game::from_parts(Board::new(), Side::First, theme)
    }

    /// Builds a game around a board, with `side` to move. Restores the
    /// check marker and ends the game right away if `side` is mated.
    pub(crate) fn from_parts(board: Board, side: Side, theme: u32) -> Game {
        let mut game = Game {
            board,
            turn: Turn::ToMove(side),
            promotion: None,
            selected: None,
            in_check: None,
            saved: true,
            theme,
            status: None,
        };
        game.evaluate_check_and_mate();
        game
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Color theme index. Only carried for the front end.
    #[inline]
    pub fn theme(&self) -> u32 {
        self.theme
    }

    /// Square of the pawn waiting for its replacement.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.promotion
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected.as_ref().map(|s| s.square)
    }

    /// The current notice for the players: the last refused action, or
    /// `None` after a successful one.
    #[inline]
    pub fn status(&self) -> Option<&RuleViolation> {
        self.status.as_ref()
    }

    /// Whether the game is unchanged since it was created, loaded or last
    /// marked saved.
    #[inline]
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    /// Finished games are not saved.
    pub fn can_save(&self) -> bool {
        !self.turn.is_over()
    }

    /// Selects the piece on `sq` and returns its raw candidate
    /// destinations, not yet filtered for self-check.
    ///
    /// Any previous selection is dropped, also on failure.
    pub fn select_piece_at(&mut self, sq: Square) -> Result<&Targets, RuleViolation> {
        self.selected = None;

        match self.check_selectable(sq) {
            Ok(()) => {
                self.status = None;
                let selection = self.selected.insert(Selection {
                    square: sq,
                    targets: capability::candidates(&self.board, sq),
                });
                Ok(&selection.targets)
            }
            Err(violation) => Err(self.notice(violation)),
        }
    }

    fn check_selectable(&self, sq: Square) -> Result<(), RuleViolation> {
        let side = self.side_to_move()?;
        match self.board.piece_at(sq) {
            None => Err(RuleViolation::NoPieceAtSquare { square: sq }),
            Some(piece) if piece.side != side => Err(RuleViolation::WrongSideToMove {
                kind: piece.kind,
                square: sq,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Drops the current selection, if any.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Moves the selected piece to `to`.
    ///
    /// The selection is consumed whether or not the move succeeds. On
    /// success the returned move tells which secondary effects took place.
    /// If it is a [`Move::Promotion`] the game is now paused until
    /// [`Game::promote`] is called.
    pub fn attempt_move(&mut self, to: Square) -> Result<Move, RuleViolation> {
        let selection = self.selected.take();
        let from = match selection {
            Some(selection) => selection.square,
            None => {
                return Err(self.notice(match self.side_to_move() {
                    Ok(_) => RuleViolation::NothingSelected,
                    Err(violation) => violation,
                }))
            }
        };

        match self.check_move(from, to) {
            Ok(m) => {
                self.commit(m);
                Ok(m)
            }
            Err(violation) => Err(self.notice(violation)),
        }
    }

    /// Selects the piece on `from` and moves it to `to`.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Move, RuleViolation> {
        self.select_piece_at(from)?;
        self.attempt_move(to)
    }

    fn check_move(&self, from: Square, to: Square) -> Result<Move, RuleViolation> {
        let side = self.side_to_move()?;
        let piece = self
            .board
            .piece_at(from)
            .ok_or(RuleViolation::NoPieceAtSquare { square: from })?;
        let kind = piece.kind;

        if piece.side != side {
            return Err(RuleViolation::WrongSideToMove { kind, square: from });
        }
        if self.board.side_at(to) == Some(side) {
            return Err(RuleViolation::OccupiedBySelf { kind, square: to });
        }

        let m = capability::candidates(&self.board, from)
            .contains(&to)
            .then(|| capability::classify(&self.board, from, to))
            .flatten()
            .ok_or(RuleViolation::NotInCandidateSet { kind, square: to })?;

        if !self.is_safe(m, side) {
            return Err(if self.in_check == Some(side) {
                RuleViolation::MustEscapeCheck { kind, square: to }
            } else {
                RuleViolation::WouldLeaveKingInCheck { kind, square: to }
            });
        }

        Ok(m)
    }

    fn commit(&mut self, m: Move) {
        let side = self.turn.side();
        debug!("{side} plays {m}");

        self.board.play_unchecked(m);
        self.saved = false;
        self.status = None;
        self.in_check = None;

        if let Move::Promotion { to, .. } = m {
            self.promotion = Some(to);
            self.turn = Turn::Paused(side);
            debug!("{side} promotes on {to:?}, waiting for a choice");
        } else {
            self.advance_turn();
            self.evaluate_check_and_mate();
        }
    }

    /// Replaces the pending pawn with a piece of the chosen kind and resumes
    /// play. Returns `Ok(None)` if no promotion is pending.
    pub fn promote(&mut self, kind: PieceKind) -> Result<Option<Outcome>, RuleViolation> {
        let Some(square) = self.promotion else {
            return Ok(None);
        };
        if !kind.is_promotion() {
            return Err(self.notice(RuleViolation::InvalidPromotion { kind }));
        }

        let side = self.turn.side();
        self.board.set_piece_at(square, kind.of(side).into_moved());
        self.promotion = None;
        self.saved = false;
        self.status = None;
        debug!("{side} pawn on {square:?} becomes {kind}");

        self.advance_turn();
        self.evaluate_check_and_mate();
        Ok(Some(self.outcome()))
    }

    /// Hands the move to the other side. The en passant marker only lives
    /// until its owner is about to move again.
    fn advance_turn(&mut self) {
        let next = match self.turn {
            Turn::ToMove(side) | Turn::Paused(side) => !side,
            Turn::Over { .. } => return,
        };

        let marker_side = self
            .board
            .en_passant()
            .and_then(|pawn| self.board.side_at(pawn));
        if marker_side == Some(next) {
            self.board.clear_en_passant();
        }

        self.turn = Turn::ToMove(next);
    }

    /// Updates the check marker for the side to move and ends the game if
    /// that side is mated.
    fn evaluate_check_and_mate(&mut self) {
        let Some(side) = self.turn.to_move() else {
            return;
        };
        let Some(king) = self.board.king_of(side) else {
            return;
        };

        let attackers = self.board.attackers(!side, king);
        if attackers.is_empty() {
            self.in_check = None;
            return;
        }

        self.in_check = Some(side);
        if self.is_checkmate(side, king, &attackers) {
            info!("checkmate, {} wins", !side);
            self.turn = Turn::Over { winner: !side };
        } else {
            debug!("{side} is in check from {attackers:?}");
        }
    }

    /// Decides whether `side`, whose king on `king` is attacked by
    /// `attackers`, has any legal response.
    fn is_checkmate(&self, side: Side, king: Square, attackers: &[Square]) -> bool {
        let escapes = capability::candidates(&self.board, king);
        if escapes.iter().any(|&to| self.is_legal(king, to)) {
            return false;
        }

        // No single move can deal with two checking pieces at once.
        let &[attacker] = attackers else {
            return true;
        };

        let capturers = self.board.attackers(side, attacker);
        if capturers.iter().any(|&from| self.is_legal(from, attacker)) {
            return false;
        }
        if self.can_capture_en_passant(side, attacker) {
            return false;
        }

        if self
            .board
            .piece_at(attacker)
            .is_some_and(|piece| piece.kind == PieceKind::Knight)
        {
            return true;
        }

        let path =
            attacks::between(king, attacker).expect("checking piece is aligned with the king");
        !path.iter().any(|&sq| {
            self.board
                .attackers(side, sq)
                .iter()
                .any(|&from| from != king && self.is_legal(from, sq))
        })
    }

    /// Whether a pawn of `side` can take the pawn on `victim` en passant.
    fn can_capture_en_passant(&self, side: Side, victim: Square) -> bool {
        if self.board.en_passant() != Some(victim) {
            return false;
        }
        let Some((target, _)) = self.board.en_passant_target() else {
            return false;
        };

        [-1, 1]
            .into_iter()
            .filter_map(|dcol| victim.offset(0, dcol))
            .filter(|&from| {
                self.board
                    .piece_at(from)
                    .is_some_and(|p| p.is(side, PieceKind::Pawn))
            })
            .any(|from| self.is_legal(from, target))
    }

    /// Tests whether the piece on `from` may move to `to`: the target must
    /// be among its candidates and the move must not expose its own king.
    ///
    /// Ignores whose turn it is.
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.board.piece_at(from) else {
            return false;
        };
        if self.board.side_at(to) == Some(piece.side)
            || !capability::candidates(&self.board, from).contains(&to)
        {
            return false;
        }
        capability::classify(&self.board, from, to).is_some_and(|m| self.is_safe(m, piece.side))
    }

    /// Plays `m` on a throwaway copy of the board and tests the king of
    /// `side` there. The king may also not castle out of or through check.
    fn is_safe(&self, m: Move, side: Side) -> bool {
        if let Move::Castle { king, king_to, .. } = m {
            let step = (king_to.col() - king.col()).signum();
            let transit = king.offset(0, step).map(|through| Move::Normal {
                kind: PieceKind::King,
                from: king,
                to: through,
                capture: None,
            });
            if self.board.is_in_check(side) || transit.is_some_and(|t| !self.is_safe(t, side)) {
                trace!("{m} castles out of or through check");
                return false;
            }
        }

        let mut probe = self.board.clone();
        probe.play_unchecked(m);
        let safe = !probe.is_in_check(side);
        trace!("probe {m}: {}", if safe { "safe" } else { "king attacked" });
        safe
    }

    /// Candidate destinations of the piece on `sq`, not filtered for
    /// self-check.
    pub fn legal_targets(&self, sq: Square) -> Targets {
        capability::candidates(&self.board, sq)
    }

    /// Destinations of the piece on `sq` that pass the self-check test.
    pub fn safe_targets(&self, sq: Square) -> Targets {
        let mut targets = capability::candidates(&self.board, sq);
        targets.retain(|to| self.is_legal(sq, *to));
        targets
    }

    pub fn outcome(&self) -> Outcome {
        match self.turn {
            Turn::Over { winner } => Outcome::Checkmate { winner },
            Turn::ToMove(side) | Turn::Paused(side) => {
                if self.in_check == Some(side) {
                    Outcome::InCheck(side)
                } else {
                    Outcome::InProgress(side)
                }
            }
        }
    }

    /// Display marks derived from the selection and the check state.
    pub fn overlay(&self) -> Overlay {
        let mut overlay = Overlay::new();

        if let Some(selection) = &self.selected {
            overlay.insert(selection.square, Marks::SELECTED);
            for &sq in &selection.targets {
                overlay.insert(sq, Marks::HIGHLIGHTED);
            }
        }

        if let Some(king) = self.in_check.and_then(|side| self.board.king_of(side)) {
            overlay.insert(king, Marks::CHECK);
            if self.turn.is_over() {
                overlay.insert(king, Marks::CHECKMATE);
            }
        }

        overlay
    }

    /// Serializes the game for a save file, resolving a pending promotion
    /// to a queen first. Marks the game saved.
    ///
    /// Finished games can not be saved, including a game that the resolved
    /// promotion just finished.
    pub fn save(&mut self) -> Result<String, RuleViolation> {
        self.promote(PieceKind::Queen)?;
        if let Turn::Over { winner } = self.turn {
            return Err(self.notice(RuleViolation::GameOver { winner }));
        }
        self.saved = true;
        Ok(self.to_string())
    }

    fn side_to_move(&self) -> Result<Side, RuleViolation> {
        if let Some(square) = self.promotion {
            return Err(RuleViolation::PromotionPending { square });
        }
        match self.turn {
            Turn::ToMove(side) | Turn::Paused(side) => Ok(side),
            Turn::Over { winner } => Err(RuleViolation::GameOver { winner }),
        }
    }

    fn notice(&mut self, violation: RuleViolation) -> RuleViolation {
        debug!("refused: {violation}");
        self.status = Some(violation);
        violation
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn load(state: &str) -> Game {
        state.parse().unwrap()
    }

    #[test]
    fn test_select() {
        let mut game = Game::new();
        assert_eq!(
            game.select_piece_at(sq("e4")).unwrap_err(),
            RuleViolation::NoPieceAtSquare { square: sq("e4") }
        );
        assert_eq!(
            game.select_piece_at(sq("e7")).unwrap_err(),
            RuleViolation::WrongSideToMove {
                kind: PieceKind::Pawn,
                square: sq("e7")
            }
        );
        assert!(game.status().is_some());

        let targets = game.select_piece_at(sq("e2")).unwrap();
        assert_eq!(&targets[..], &[sq("e3"), sq("e4")]);
        assert_eq!(game.selected(), Some(sq("e2")));
        assert_eq!(game.status(), None);

        game.deselect();
        game.deselect();
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_attempt_clears_selection() {
        let mut game = Game::new();
        assert_eq!(game.attempt_move(sq("e4")), Err(RuleViolation::NothingSelected));

        game.select_piece_at(sq("e2")).unwrap();
        assert_eq!(
            game.attempt_move(sq("e5")),
            Err(RuleViolation::NotInCandidateSet {
                kind: PieceKind::Pawn,
                square: sq("e5")
            })
        );
        assert_eq!(game.selected(), None);
        assert_eq!(game.attempt_move(sq("e4")), Err(RuleViolation::NothingSelected));

        game.select_piece_at(sq("e1")).unwrap();
        assert_eq!(
            game.attempt_move(sq("d1")),
            Err(RuleViolation::OccupiedBySelf {
                kind: PieceKind::King,
                square: sq("d1")
            })
        );
        assert!(game.is_saved());
    }

    #[test]
    fn test_pinned_piece() {
        let mut game = load("0 white (K)b04f (B)b40t (N)w51t (K)w62t null");
        assert_eq!(
            game.play(sq("b3"), sq("d4")),
            Err(RuleViolation::WouldLeaveKingInCheck {
                kind: PieceKind::Knight,
                square: sq("d4")
            })
        );
        assert!(game.safe_targets(sq("b3")).is_empty());
        assert_eq!(
            game.board().piece_at(sq("b3")),
            Some(PieceKind::Knight.of(Side::First).into_moved())
        );
    }

    #[test]
    fn test_must_escape_check() {
        let mut game = load("0 white (K)b00f (R)b04t (P)w60f (K)w74t null");
        assert_eq!(game.outcome(), Outcome::InCheck(Side::First));
        assert_eq!(
            game.play(sq("a2"), sq("a3")),
            Err(RuleViolation::MustEscapeCheck {
                kind: PieceKind::Pawn,
                square: sq("a3")
            })
        );
        assert_eq!(game.overlay().get(sq("e1")), Marks::CHECK);

        game.play(sq("e1"), sq("d2")).unwrap();
        assert_eq!(game.outcome(), Outcome::InProgress(Side::Second));
        assert!(game.overlay().is_empty());
    }

    #[test]
    fn test_castling() {
        let mut game = load("0 white (K)b04f (R)w70f (K)w74f (R)w77f null");
        let targets = game.select_piece_at(sq("e1")).unwrap().clone();
        assert!(targets.contains(&sq("g1")));
        assert!(targets.contains(&sq("c1")));

        let m = game.attempt_move(sq("g1")).unwrap();
        assert!(m.is_castle());
        assert_eq!(game.board().piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(game.board().piece_at(sq("h1")), None);
        assert_eq!(game.board().king_of(Side::First), Some(sq("g1")));
    }

    #[test]
    fn test_no_castling_through_check() {
        let mut game = load("0 white (K)b04f (R)b05t (R)w70f (K)w74f (R)w77f null");
        assert_eq!(
            game.play(sq("e1"), sq("g1")),
            Err(RuleViolation::WouldLeaveKingInCheck {
                kind: PieceKind::King,
                square: sq("g1")
            })
        );
        game.play(sq("e1"), sq("c1")).unwrap();
    }

    #[test]
    fn test_promotion() {
        let mut game = load("0 white (K)b04f (P)w10t (K)w74f null");
        assert_eq!(game.promote(PieceKind::Queen), Ok(None));

        let m = game.play(sq("a7"), sq("a8")).unwrap();
        assert!(m.is_promotion());
        assert_eq!(game.turn(), Turn::Paused(Side::First));
        assert_eq!(
            game.select_piece_at(sq("e1")).unwrap_err(),
            RuleViolation::PromotionPending { square: sq("a8") }
        );
        assert_eq!(
            game.promote(PieceKind::King),
            Err(RuleViolation::InvalidPromotion { kind: PieceKind::King })
        );

        assert_eq!(game.promote(PieceKind::Knight), Ok(Some(Outcome::InProgress(Side::Second))));
        assert_eq!(
            game.board().piece_at(sq("a8")),
            Some(PieceKind::Knight.of(Side::First).into_moved())
        );
        assert_eq!(game.turn(), Turn::ToMove(Side::Second));
    }

    #[test]
    fn test_checkmate_overlay() {
        let mut game = load("0 white (K)b00f (R)w17t (K)w20t null");
        game.play(sq("h7"), sq("h8")).unwrap();
        assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::First });
        assert_eq!(game.overlay().get(sq("a8")), Marks::CHECK | Marks::CHECKMATE);
        assert_eq!(
            game.select_piece_at(sq("a8")).unwrap_err(),
            RuleViolation::GameOver { winner: Side::First }
        );
        assert!(!game.can_save());
        assert!(game.save().is_err());
    }

    #[test]
    fn test_no_save_after_mating_promotion() {
        let mut game = load("0 white (K)b00f (P)w12t (K)w20t null");
        game.play(sq("c7"), sq("c8")).unwrap();
        assert_eq!(game.outcome(), Outcome::InProgress(Side::First));

        assert_eq!(
            game.save(),
            Err(RuleViolation::GameOver { winner: Side::First })
        );
        assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::First });
        assert!(!game.is_saved());
        assert!(!game.can_save());
    }

    #[test]
    fn test_double_step_from_pawn_row_only() {
        let mut game = load("0 white (K)b04f (P)w54f (K)w74t null");
        assert_eq!(
            game.play(sq("e3"), sq("e5")),
            Err(RuleViolation::NotInCandidateSet {
                kind: PieceKind::Pawn,
                square: sq("e5")
            })
        );

        game.play(sq("e3"), sq("e4")).unwrap();
        let state = game.to_state_string();
        assert_eq!(state, "0 black (K)b04f (P)w44t (K)w74t null");
        assert!(state.parse::<Game>().is_ok());
    }

    #[test]
    fn test_en_passant_capture_of_checking_pawn() {
        let game = load("0 white (K)b00f (P)b33t (P)w34t (K)w44t 33");
        assert_eq!(game.outcome(), Outcome::InCheck(Side::First));
        assert!(game.is_legal(sq("e5"), sq("d6")));
    }
}
