#![no_main]

use arbitrary::Arbitrary;
use gambit::{Game, PieceKind, Square};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Attempt {
    from: u8,
    to: u8,
    promotion: u8,
}

fn square(index: u8) -> Square {
    let index = index % 64;
    Square::new((index / 8) as i8, (index % 8) as i8)
}

fuzz_target!(|attempts: Vec<Attempt>| {
    let mut game = Game::new();

    for attempt in attempts {
        if game.pending_promotion().is_some() {
            let kind = PieceKind::PROMOTIONS[usize::from(attempt.promotion) % 4];
            game.promote(kind).expect("valid promotion");
            continue;
        }

        let side = game.turn().side();
        if let Ok(m) = game.play(square(attempt.from), square(attempt.to)) {
            assert!(!game.board().is_in_check(side), "{m} leaves {side} in check");
        }
    }
});
