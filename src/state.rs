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

//! Read and write the compact save format.
//!
//! A state is a single line of whitespace separated tokens:
//!
//! ```text
//! <theme> <white|black> <piece>* <en passant>
//! ```
//!
//! Each piece token looks like `(K)wrcf`: the kind letter in parentheses,
//! the side letter, the row and column digits and `t` or `f` for whether
//! the piece has moved. The en passant token is either `null` or the
//! coordinates of the pawn that may be captured.
//!
//! # Examples
//!
//! ```
//! use gambit::{Game, Side};
//!
//! let game: Game = "0 black (K)b00f (R)w07t (K)w20t null".parse()?;
//! assert_eq!(game.turn().side(), Side::Second);
//! assert!(game.turn().is_over());
//! # Ok::<_, gambit::ParseStateError>(())
//! ```

use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    board::Board,
    errors::ParseStateError,
    game::Game,
    kind::PieceKind,
    piece::Piece,
    side::Side,
    square::Square,
};

impl Game {
    /// Serializes the game. Same as `to_string()`.
    ///
    /// While a promotion is pending, the pawn is written as a queen and the
    /// opponent is written as the side to move. Use [`Game::save`] to apply
    /// that resolution to the live game as well.
    pub fn to_state_string(&self) -> String {
        self.to_string()
    }

    /// Loads a game from its serialized state.
    ///
    /// The loaded game counts as saved. Check and checkmate are evaluated
    /// for the side to move right away.
    pub fn from_state_str(s: &str) -> Result<Game, ParseStateError> {
        s.parse()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let promotion = self.pending_promotion();
        let turn = match promotion {
            Some(_) => !self.turn().side(),
            None => self.turn().side(),
        };

        write!(f, "{} {}", self.theme(), turn)?;

        for (sq, piece) in self.board().pieces() {
            if promotion == Some(sq) {
                write!(f, " {}{}{}t", PieceKind::Queen, piece.side.char(), sq)?;
            } else {
                write!(
                    f,
                    " {}{}{}{}",
                    piece.kind,
                    piece.side.char(),
                    sq,
                    if piece.moved { 't' } else { 'f' }
                )?;
            }
        }

        let board = self.board();
        match board.en_passant() {
            Some(pawn) if board.side_at(pawn) != Some(turn) => write!(f, " {pawn}"),
            _ => f.write_str(" null"),
        }
    }
}

fn parse_piece(token: &str) -> Option<(Square, Piece)> {
    match token.as_bytes() {
        &[b'(', kind, b')', side, row @ b'0'..=b'7', col @ b'0'..=b'7', moved @ (b't' | b'f')] => {
            let piece = Piece {
                side: Side::from_char(char::from(side))?,
                kind: PieceKind::from_char(char::from(kind))?,
                moved: moved == b't',
            };
            Some((Square::new((row - b'0') as i8, (col - b'0') as i8), piece))
        }
        _ => None,
    }
}

fn parse_en_passant(board: &Board, turn: Side, token: &str) -> Result<Option<Square>, ParseStateError> {
    if token == "null" {
        return Ok(None);
    }

    let pawn: Square = token.parse().map_err(|_| ParseStateError::InvalidEnPassant)?;
    match board.piece_at(pawn) {
        Some(piece)
            if piece.kind == PieceKind::Pawn
                && piece.side != turn
                && pawn.row() == piece.side.pawn_row() + 2 * piece.side.forward() =>
        {
            Ok(Some(pawn))
        }
        _ => Err(ParseStateError::InvalidEnPassant),
    }
}

impl FromStr for Game {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Game, ParseStateError> {
        let mut tokens = s.split_ascii_whitespace();

        let theme = tokens.next().ok_or(ParseStateError::Truncated)?;
        let theme = btoi::btou(theme.as_bytes()).map_err(|_| ParseStateError::InvalidTheme)?;

        let turn: Side = tokens
            .next()
            .ok_or(ParseStateError::Truncated)?
            .parse()
            .map_err(|_| ParseStateError::InvalidTurn)?;

        let mut board = Board::empty();
        let mut en_passant = None;

        for token in tokens {
            if en_passant.is_some() {
                return Err(ParseStateError::TrailingTokens);
            }

            if token.starts_with('(') {
                let (sq, piece) = parse_piece(token).ok_or_else(|| ParseStateError::InvalidPiece {
                    token: token.to_owned(),
                })?;
                if !board.is_empty_at(sq) {
                    return Err(ParseStateError::DuplicateSquare { square: sq });
                }
                if piece.kind == PieceKind::King && board.king_of(piece.side).is_some() {
                    return Err(ParseStateError::TooManyKings { side: piece.side });
                }
                board.set_piece_at(sq, piece);
            } else {
                en_passant = Some(parse_en_passant(&board, turn, token)?);
            }
        }

        let en_passant = en_passant.ok_or(ParseStateError::Truncated)?;

        if let Some(side) = Side::ALL.into_iter().find(|&side| board.king_of(side).is_none()) {
            return Err(ParseStateError::MissingKing { side });
        }

        board.set_en_passant(en_passant);
        debug!("loaded state with {} pieces, {turn} to move", board.pieces().count());
        Ok(Game::from_parts(board, turn, theme))
    }
}

/// A save file line: both player names followed by the game state.
///
/// ```
/// use gambit::SavedGame;
///
/// let saved: SavedGame = "alice bob 2 white (K)b04f (K)w74f null".parse()?;
/// assert_eq!(saved.first, "alice");
/// assert_eq!(saved.game.theme(), 2);
/// # Ok::<_, gambit::ParseStateError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SavedGame {
    pub first: String,
    pub second: String,
    pub game: Game,
}

impl SavedGame {
    /// Empty names are replaced by `white` and `black`.
    pub fn new(first: &str, second: &str, game: Game) -> SavedGame {
        let name = |name: &str, side: Side| {
            if name.is_empty() {
                side.to_string()
            } else {
                name.to_owned()
            }
        };
        SavedGame {
            first: name(first, Side::First),
            second: name(second, Side::Second),
            game,
        }
    }
}

impl fmt::Display for SavedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.first, self.second, self.game)
    }
}

impl FromStr for SavedGame {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<SavedGame, ParseStateError> {
        let mut parts = s.trim_start().splitn(3, |ch: char| ch.is_ascii_whitespace());
        let first = parts.next().ok_or(ParseStateError::Truncated)?;
        let second = parts.next().ok_or(ParseStateError::Truncated)?;
        let game = parts.next().ok_or(ParseStateError::Truncated)?.parse()?;
        Ok(SavedGame::new(first, second, game))
    }
}
