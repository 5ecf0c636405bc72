#![no_main]

use gambit::Game;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(game) = s.parse::<Game>() {
        let state = game.to_state_string();
        let roundtripped: Game = state.parse().expect("roundtrip");
        assert_eq!(game.board(), roundtripped.board());
        assert_eq!(game.turn(), roundtripped.turn());
        assert_eq!(state, roundtripped.to_state_string());
    }
});
