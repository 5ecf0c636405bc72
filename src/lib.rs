//! A chess rules engine: move validation, check and checkmate detection,
//! special moves and a compact save format.
//!
//! # Examples
//!
//! Select a piece and move it:
//!
//! ```
//! use gambit::{Game, Square};
//!
//! let mut game = Game::new();
//!
//! // The raw candidates of the king's pawn.
//! let targets = game.select_piece_at(Square::from_algebraic("e2").unwrap())?;
//! assert_eq!(targets.len(), 2);
//!
//! let m = game.attempt_move(Square::from_algebraic("e4").unwrap())?;
//! assert_eq!(m.to_string(), "Pe2-e4");
//! # Ok::<_, gambit::RuleViolation>(())
//! ```
//!
//! Illegal moves are refused and leave the game untouched:
//!
//! ```
//! use gambit::{Game, RuleViolation, Square};
//!
//! let sq = |s| Square::from_algebraic(s).unwrap();
//!
//! let mut game = Game::new();
//! assert!(matches!(
//!     game.play(sq("e2"), sq("e5")),
//!     Err(RuleViolation::NotInCandidateSet { .. })
//! ));
//! assert!(game.is_saved());
//! ```
//!
//! Detect the end of the game:
//!
//! ```
//! use gambit::{Game, Outcome, Side, Square};
//!
//! let sq = |s| Square::from_algebraic(s).unwrap();
//!
//! let mut game = Game::new();
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     game.play(sq(from), sq(to))?;
//! }
//! assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::Second });
//! # Ok::<_, gambit::RuleViolation>(())
//! ```
//!
//! Games are saved and loaded with the [`state`] format.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   the vocabulary types.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for [`Square`], [`Side`] and [`PieceKind`].

#![doc(html_root_url = "https://docs.rs/gambit/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod errors;
mod game;
mod kind;
mod m;
mod piece;
mod side;
mod square;

pub mod attacks;
pub mod board;
pub mod capability;
pub mod overlay;
pub mod state;

pub use board::Board;
pub use errors::{ParseStateError, RuleViolation};
pub use game::{Game, Outcome};
pub use kind::{ParseKindError, PieceKind};
pub use m::{Move, Targets};
pub use overlay::{Marks, Overlay};
pub use piece::Piece;
pub use side::{BySide, ParseSideError, Side, Turn};
pub use square::{ParseSquareError, Square};
pub use state::SavedGame;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Side {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for PieceKind {}
