#![no_main]
use entity_match::matching::SequenceMatcher;
use libfuzzer_sys::fuzz_target;

/// Fuzz the sequence ratio, including the popular-character path for
/// long targets.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (a, b) = s.split_at(s.char_indices().nth(s.chars().count() / 2).map_or(0, |(i, _)| i));
    let ratio = SequenceMatcher::new(b).ratio(a);
    assert!((0.0..=1.0).contains(&ratio));
});
