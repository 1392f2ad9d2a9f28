#![no_main]
use entity_match::{EntityAssociator, MetricKind};
use libfuzzer_sys::fuzz_target;

/// Fuzz association with arbitrary name lists.
///
/// Input is split at the first NUL byte: lines before it are source
/// names, lines after it are candidates. Every metric must either
/// succeed or reject an empty candidate, and never reuse a candidate
/// position under a distance metric.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (left, right) = s.split_once('\0').unwrap_or((s, ""));
    let sources: Vec<Option<&str>> = left
        .lines()
        .map(|l| if l == "NaN" { None } else { Some(l) })
        .collect();
    let candidates: Vec<&str> = right.lines().collect();

    for metric in MetricKind::all() {
        let Ok(assoc) = EntityAssociator::new(*metric).associate(&sources, &candidates) else {
            assert!(candidates.iter().any(|c| c.is_empty()));
            continue;
        };
        assert_eq!(assoc.get(None), Some(None));
        if metric.consumes_candidates() {
            assert!(assoc.matched_count() <= candidates.len());
        }
    }
});
