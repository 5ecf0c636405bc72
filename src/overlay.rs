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

//! Presentation marks keyed by square.
//!
//! The engine keeps no display state on its squares. A front end asks
//! [`Game::overlay`](crate::Game::overlay) after every change and draws the
//! marks it gets back.

use bitflags::bitflags;

use crate::square::Square;

bitflags! {
    /// Display marks for one square.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct Marks: u8 {
        /// The selected piece stands here.
        const SELECTED = 1;
        /// The selected piece can reach this square, ignoring self-check.
        const HIGHLIGHTED = 1 << 1;
        /// A king in check stands here.
        const CHECK = 1 << 2;
        /// A checkmated king stands here.
        const CHECKMATE = 1 << 3;
    }
}

/// Marks for all 64 squares.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Overlay {
    marks: [Marks; 64],
}

impl Overlay {
    pub const fn new() -> Overlay {
        Overlay {
            marks: [Marks::empty(); 64],
        }
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Marks {
        self.marks[sq.to_usize()]
    }

    #[inline]
    pub fn insert(&mut self, sq: Square, marks: Marks) {
        self.marks[sq.to_usize()].insert(marks);
    }

    /// Squares carrying all of `marks`.
    pub fn squares_with(&self, marks: Marks) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.get(sq).contains(marks))
    }

    pub fn is_empty(&self) -> bool {
        self.marks.iter().all(|m| m.is_empty())
    }
}

impl Default for Overlay {
    fn default() -> Overlay {
        Overlay::new()
    }
}
