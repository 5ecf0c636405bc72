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

//! Movement shapes and line geometry.
//!
//! # Example
//!
//! ```
//! use gambit::{attacks, Square};
//!
//! let path = attacks::between(Square::new(0, 0), Square::new(3, 3)).unwrap();
//! assert_eq!(&path[..], &[Square::new(1, 1), Square::new(2, 2)]);
//!
//! assert!(attacks::between(Square::new(0, 0), Square::new(1, 2)).is_none());
//! ```

use crate::{m::Targets, square::Square};

/// Row and column steps along ranks and files.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Row and column steps along diagonals.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight line directions, orthogonal first.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Whether a direction runs along a rank or file.
#[inline]
pub const fn is_orthogonal((drow, dcol): (i8, i8)) -> bool {
    drow == 0 || dcol == 0
}

/// Squares reached by repeatedly stepping from `from` (exclusive) in one
/// direction, up to the edge of the board.
pub fn ray(from: Square, (drow, dcol): (i8, i8)) -> impl Iterator<Item = Square> {
    let mut current = Some(from);
    std::iter::from_fn(move || {
        current = current.and_then(|sq| sq.offset(drow, dcol));
        current
    })
}

/// The unit step leading from `a` towards `b`, if both share a row, column
/// or diagonal.
pub fn direction(a: Square, b: Square) -> Option<(i8, i8)> {
    let drow = b.row() - a.row();
    let dcol = b.col() - a.col();

    if a == b || (drow != 0 && dcol != 0 && drow.abs() != dcol.abs()) {
        None
    } else {
        Some((drow.signum(), dcol.signum()))
    }
}

/// The squares strictly between `a` and `b`, or `None` if they are not on a
/// common line.
pub fn between(a: Square, b: Square) -> Option<Targets> {
    let step = direction(a, b)?;
    Some(ray(a, step).take_while(|&sq| sq != b).collect())
}
