use dashgraph::core::{duration_to_range, range_to_duration};
use proptest::prelude::*;

proptest! {
    #[test]
    fn round_trip_loses_only_sub_second_precision(duration_ms in -10_000_000_000_i64..10_000_000_000) {
        let token = duration_to_range(duration_ms);
        let recovered = range_to_duration(&token).unwrap_or(0);

        // Greedy second-resolution decomposition truncates toward zero.
        let truncated = duration_ms / 1_000 * 1_000;
        prop_assert_eq!(recovered, truncated);
    }

    #[test]
    fn token_sign_matches_duration_sign(duration_ms in 1_000_i64..10_000_000_000) {
        let positive = duration_to_range(duration_ms);
        let negative = duration_to_range(-duration_ms);

        prop_assert!(!positive.starts_with('-'));
        prop_assert_eq!(negative.strip_prefix('-'), Some(positive.as_str()));
    }

    #[test]
    fn tokens_never_contain_zero_buckets(duration_ms in 0_i64..10_000_000_000) {
        let token = duration_to_range(duration_ms);
        for chunk in token.split_whitespace() {
            prop_assert!(!chunk.starts_with('0'), "zero bucket in {token}");
        }
    }
}
