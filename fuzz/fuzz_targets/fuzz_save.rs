#![no_main]

use libfuzzer_sys::fuzz_target;
use tactica::game::check_invariants;
use tactica::persistence::{deserialize, from_json, serialize};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(record) = from_json(text) else {
        return;
    };

    // Anything that restores must be consistent and save back identically
    if let Ok(state) = deserialize(record) {
        assert!(check_invariants(&state).is_empty());
        assert_eq!(deserialize(serialize(&state)).ok(), Some(state));
    }
});
