use dashgraph::core::{duration_to_range, range_to_duration};

#[test]
fn zero_duration_is_an_empty_token() {
    assert_eq!(duration_to_range(0), "");
}

#[test]
fn buckets_decompose_greedily_largest_first() {
    assert_eq!(duration_to_range(3_661_000), "1h 1m 1s");
    assert_eq!(duration_to_range(86_400_000), "1d");
    assert_eq!(duration_to_range(90_000_000), "1d 1h");
    assert_eq!(duration_to_range(61_000), "1m 1s");
}

#[test]
fn only_nonzero_buckets_emit() {
    assert_eq!(duration_to_range(86_401_000), "1d 1s");
    assert_eq!(duration_to_range(3_600_000 + 30_000), "1h 30s");
}

#[test]
fn negative_input_prepends_a_single_sign() {
    assert_eq!(duration_to_range(-3_600_000), "-1h");
    assert_eq!(duration_to_range(-86_460_000), "-1d 1m");
}

#[test]
fn doubling_and_halving_step_through_zoom_levels() {
    // Zoom stepping doubles or halves a span and re-encodes it.
    let hour_ms = 3_600_000;
    assert_eq!(duration_to_range(hour_ms * 2), "2h");
    assert_eq!(duration_to_range(hour_ms / 2), "30m");
}

#[test]
fn parser_round_trips_emitted_tokens() {
    for duration in [
        1_000_i64,
        90_000,
        3_661_000,
        86_400_000,
        -7_200_000,
        -90_061_000,
    ] {
        let token = duration_to_range(duration);
        assert_eq!(range_to_duration(&token), Some(duration), "token {token}");
    }
}

#[test]
fn parser_accepts_unsigned_single_unit_tokens() {
    assert_eq!(range_to_duration("1h"), Some(3_600_000));
    assert_eq!(range_to_duration("15m"), Some(900_000));
    assert_eq!(range_to_duration("-1d"), Some(-86_400_000));
}

#[test]
fn parser_rejects_garbage() {
    assert_eq!(range_to_duration(""), None);
    assert_eq!(range_to_duration("soon"), None);
    assert_eq!(range_to_duration("3y"), None);
    assert_eq!(range_to_duration("--1h"), None);
}
