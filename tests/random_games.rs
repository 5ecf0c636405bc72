use gambit::{Game, PieceKind, Square, Turn};
use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};

/// Plays random attempts, legal or not, and checks the invariants that must
/// hold after every one of them.
fn play_random_game(rng: &mut StdRng, attempts: usize) {
    let mut game = Game::new();

    for _ in 0..attempts {
        match game.turn() {
            Turn::Over { .. } => break,
            Turn::Paused(side) => {
                let kind = *PieceKind::PROMOTIONS.choose(rng).expect("promotion kinds");
                game.promote(kind).expect("valid promotion");
                assert_eq!(game.turn().side(), !side);
                continue;
            }
            Turn::ToMove(_) => {}
        }

        let side = game.turn().side();
        let before = game.to_state_string();

        let from = Square::all()
            .filter(|&sq| game.board().side_at(sq) == Some(side))
            .collect::<Vec<_>>();
        let from = *from.choose(rng).expect("side has pieces");

        // Mostly pick among the raw candidates so that moves get committed,
        // but also try arbitrary squares.
        let targets = game.select_piece_at(from).expect("own piece").clone();
        let to = match targets.choose(rng) {
            Some(&to) if rng.random_range(0..10) > 0 => to,
            _ => Square::new(rng.random_range(0..8), rng.random_range(0..8)),
        };

        match game.attempt_move(to) {
            Ok(m) => {
                assert!(!game.board().is_in_check(side), "{m} leaves {side} in check");
                if m.is_promotion() {
                    assert_eq!(game.turn(), Turn::Paused(side));
                } else if !game.turn().is_over() {
                    assert_eq!(game.turn(), Turn::ToMove(!side));
                }
            }
            Err(violation) => {
                assert_eq!(game.to_state_string(), before, "{violation} changed the game");
                assert_eq!(game.status(), Some(&violation));
            }
        }
        assert_eq!(game.selected(), None);

        let state = game.to_state_string();
        if game.pending_promotion().is_none() {
            let loaded: Game = state.parse().expect("round trip");
            assert_eq!(loaded.board(), game.board(), "{state}");
            assert_eq!(loaded.turn(), game.turn(), "{state}");
        }
    }
}

#[test]
fn test_random_games() {
    let mut rng = StdRng::seed_from_u64(0x6a6d_6269_7421);
    for _ in 0..40 {
        play_random_game(&mut rng, 400);
    }
}
