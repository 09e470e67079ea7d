//! Signed human-range tokens (`-1h`, `1d 2h`) and their duration arithmetic.
//!
//! Tokens are relative durations: zoom and pan actions convert an axis span
//! in milliseconds into a token, and step actions parse the stored token
//! back. Buckets are greedy, largest-first, and only nonzero buckets emit.

const UNITS: [(char, i64); 4] = [
    ('d', 86_400_000),
    ('h', 3_600_000),
    ('m', 60_000),
    ('s', 1_000),
];

/// Converts a signed duration in milliseconds into a range token.
///
/// A zero duration yields an empty string. Sub-second remainders are
/// discarded, matching the greedy second-resolution decomposition.
#[must_use]
pub fn duration_to_range(duration_ms: i64) -> String {
    let mut remainder = duration_ms.abs();
    let mut chunks = Vec::new();

    for (unit, unit_ms) in UNITS {
        let count = remainder / unit_ms;
        if count > 0 {
            chunks.push(format!("{count}{unit}"));
            remainder %= unit_ms;
        }
    }

    let mut result = chunks.join(" ");
    if duration_ms < 0 && !result.is_empty() {
        result.insert(0, '-');
    }

    result
}

/// Parses a range token back into signed milliseconds.
///
/// Accepts whitespace-separated `<count><unit>` chunks with units `d`, `h`,
/// `m`, `s`; a single leading `-` applies to the whole token. Returns `None`
/// for empty, malformed, or unknown-unit input.
#[must_use]
pub fn range_to_duration(token: &str) -> Option<i64> {
    let trimmed = token.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if body.is_empty() {
        return None;
    }

    let mut total_ms = 0_i64;
    for chunk in body.split_whitespace() {
        let unit = chunk.chars().last()?;
        let unit_ms = UNITS
            .iter()
            .find(|(candidate, _)| *candidate == unit)
            .map(|(_, unit_ms)| *unit_ms)?;

        let count: i64 = chunk[..chunk.len() - unit.len_utf8()].parse().ok()?;
        if count < 0 {
            return None;
        }
        total_ms = total_ms.checked_add(count.checked_mul(unit_ms)?)?;
    }

    Some(if negative { -total_ms } else { total_ms })
}

#[cfg(test)]
mod tests {
    use super::{duration_to_range, range_to_duration};

    #[test]
    fn zero_duration_yields_empty_token() {
        assert_eq!(duration_to_range(0), "");
    }

    #[test]
    fn nonzero_buckets_emit_largest_first() {
        assert_eq!(duration_to_range(3_661_000), "1h 1m 1s");
        assert_eq!(duration_to_range(90_061_000), "1d 1h 1m 1s");
        assert_eq!(duration_to_range(86_400_000 + 7_200_000), "1d 2h");
    }

    #[test]
    fn negative_durations_carry_one_leading_sign() {
        assert_eq!(duration_to_range(-3_600_000), "-1h");
        assert_eq!(duration_to_range(-90_000), "-1m 30s");
    }

    #[test]
    fn sub_second_remainder_is_discarded() {
        assert_eq!(duration_to_range(1_999), "1s");
        assert_eq!(duration_to_range(999), "");
    }

    #[test]
    fn parser_inverts_the_emitter() {
        for duration in [1_000, 60_000, 3_661_000, -86_400_000, -5_400_000] {
            let token = duration_to_range(duration);
            assert_eq!(range_to_duration(&token), Some(duration));
        }
    }

    #[test]
    fn parser_rejects_malformed_tokens() {
        assert_eq!(range_to_duration(""), None);
        assert_eq!(range_to_duration("-"), None);
        assert_eq!(range_to_duration("1w"), None);
        assert_eq!(range_to_duration("h"), None);
        assert_eq!(range_to_duration("1h x"), None);
    }
}
