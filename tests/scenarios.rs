use gambit::{Game, Move, Outcome, PieceKind, RuleViolation, Side, Square, Turn};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).expect("valid square")
}

fn load(state: &str) -> Game {
    state.parse().expect("valid state")
}

fn play_all(game: &mut Game, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        game.play(sq(from), sq(to))
            .unwrap_or_else(|err| panic!("{from}-{to}: {err}"));
    }
}

#[test]
fn test_lone_king_mated_by_rook() {
    let game = load("0 black (K)b00f (R)w07t (K)w20t null");
    assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::First });
    assert_eq!(game.turn(), Turn::Over { winner: Side::First });
}

#[test]
fn test_back_rank_mate_with_supported_queen() {
    let game = load("0 black (K)b07t (Q)w16t (K)w70t (R)w76t null");
    assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::First });

    // Without the supporting rook the king takes the queen.
    let game = load("0 black (K)b07t (Q)w16t (K)w70t null");
    assert_eq!(game.outcome(), Outcome::InCheck(Side::Second));
    assert!(game.is_legal(sq("h8"), sq("g7")));
}

#[test]
fn test_interposing_bishop_prevents_mate() {
    let mut game = load("0 black (R)w00t (K)b07t (P)b16f (P)b17f (B)b24t (K)w74t null");
    assert_eq!(game.outcome(), Outcome::InCheck(Side::Second));

    assert_eq!(
        game.play(sq("g7"), sq("g6")),
        Err(RuleViolation::MustEscapeCheck {
            kind: PieceKind::Pawn,
            square: sq("g6")
        })
    );
    game.play(sq("e6"), sq("c8")).expect("bishop blocks");
    assert_eq!(game.outcome(), Outcome::InProgress(Side::First));

    // The same position without the bishop is a back rank mate.
    let game = load("0 black (R)w00t (K)b07t (P)b16f (P)b17f (K)w74t null");
    assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::First });
}

#[test]
fn test_no_castling_after_king_moved() {
    let mut game = load("0 white (K)b04f (P)b10f (R)w70f (K)w74f (R)w77f null");
    play_all(&mut game, &[("e1", "f1"), ("a7", "a6"), ("f1", "e1"), ("a6", "a5")]);

    for to in ["g1", "c1"] {
        assert_eq!(
            game.play(sq("e1"), sq(to)),
            Err(RuleViolation::NotInCandidateSet {
                kind: PieceKind::King,
                square: sq(to)
            })
        );
    }
}

#[test]
fn test_no_castling_after_rook_moved() {
    let mut game = load("0 white (K)b04f (P)b10f (R)w70f (K)w74f (R)w77f null");
    play_all(&mut game, &[("h1", "h2"), ("a7", "a6"), ("h2", "h1"), ("a6", "a5")]);

    assert!(game.play(sq("e1"), sq("g1")).is_err());
    let m = game.play(sq("e1"), sq("c1")).expect("queenside still allowed");
    assert_eq!(
        m,
        Move::Castle {
            king: sq("e1"),
            king_to: sq("c1"),
            rook: sq("a1"),
            rook_to: sq("d1"),
        }
    );
}

#[test]
fn test_en_passant_capture() {
    let mut game = Game::new();
    play_all(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    assert_eq!(game.board().en_passant(), Some(sq("d5")));

    let m = game.play(sq("e5"), sq("d6")).expect("en passant");
    assert!(m.is_en_passant());
    assert_eq!(game.board().piece_at(sq("d5")), None);
    assert_eq!(
        game.board().piece_at(sq("d6")).map(|p| (p.side, p.kind)),
        Some((Side::First, PieceKind::Pawn))
    );
}

#[test]
fn test_en_passant_window_closes() {
    let mut game = Game::new();
    play_all(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    play_all(&mut game, &[("a2", "a3")]);
    assert_eq!(game.board().en_passant(), None);
    play_all(&mut game, &[("h7", "h6")]);

    assert_eq!(
        game.play(sq("e5"), sq("d6")),
        Err(RuleViolation::NotInCandidateSet {
            kind: PieceKind::Pawn,
            square: sq("d6")
        })
    );
}

#[test]
fn test_double_step_marks_only_the_moved_pawn() {
    let mut game = Game::new();
    play_all(&mut game, &[("e2", "e4")]);
    assert_eq!(game.board().en_passant(), Some(sq("e4")));
    play_all(&mut game, &[("c7", "c5")]);
    assert_eq!(game.board().en_passant(), Some(sq("c5")));
    play_all(&mut game, &[("g1", "f3")]);
    assert_eq!(game.board().en_passant(), None);
}

#[test]
fn test_promotion_by_capture_pauses() {
    let mut game = load("0 white (R)b01t (K)b04f (P)w10t (K)w74f null");
    let m = game.play(sq("a7"), sq("b8")).expect("capture onto last row");
    assert_eq!(
        m,
        Move::Promotion {
            from: sq("a7"),
            to: sq("b8"),
            capture: Some(PieceKind::Rook)
        }
    );
    assert_eq!(game.turn(), Turn::Paused(Side::First));

    for (from, to) in [("e8", "d8"), ("e1", "e2")] {
        assert_eq!(
            game.play(sq(from), sq(to)),
            Err(RuleViolation::PromotionPending { square: sq("b8") })
        );
    }
    assert_eq!(game.turn(), Turn::Paused(Side::First));

    assert_eq!(
        game.promote(PieceKind::Rook),
        Ok(Some(Outcome::InCheck(Side::Second)))
    );
    assert_eq!(game.turn(), Turn::ToMove(Side::Second));
}

#[test]
fn test_turns_alternate() {
    let mut game = Game::new();
    play_all(&mut game, &[("e2", "e4")]);
    assert_eq!(game.turn(), Turn::ToMove(Side::Second));
    assert!(!game.is_saved());

    assert_eq!(
        game.play(sq("e4"), sq("e5")),
        Err(RuleViolation::WrongSideToMove {
            kind: PieceKind::Pawn,
            square: sq("e4")
        })
    );
    assert_eq!(game.turn(), Turn::ToMove(Side::Second));

    play_all(&mut game, &[("e7", "e5")]);
    assert_eq!(game.turn(), Turn::ToMove(Side::First));
}

#[test]
fn test_scholars_mate() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
            ("h5", "f7"),
        ],
    );
    assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::First });
    assert_eq!(
        game.play(sq("e8"), sq("f7")),
        Err(RuleViolation::GameOver { winner: Side::First })
    );
}
