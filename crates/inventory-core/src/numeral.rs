//! # Numeral Codec
//!
//! Converts between ASCII digits and Myanmar digit glyphs (`၀`..`၉`) for numeric form
//! fields. Encoding only swaps digits; signs and decimal points pass through.
//!
//! Decoding is permissive: it never fails. Localized digits are mapped back, every
//! character that is not a digit or `.` is dropped (thousands separators included), and
//! the longest numeric prefix is parsed. Anything unparseable becomes `0`.

use std::fmt::Display;

const GLYPHS: [char; 10] = ['၀', '၁', '၂', '၃', '၄', '၅', '၆', '၇', '၈', '၉'];

/// Renders `value` with localized digits.
pub fn encode(value: impl Display) -> String {
    value
        .to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => GLYPHS[d as usize],
            None => c,
        })
        .collect()
}

/// Like [`encode`], but a missing value renders as an empty string.
pub fn encode_opt<T: Display>(value: Option<T>) -> String {
    value.map(encode).unwrap_or_default()
}

/// Parses localized or ASCII digits back into a number, falling back to `0`.
pub fn decode(input: &str) -> f64 {
    let normalized: String = input
        .chars()
        .filter_map(|c| match GLYPHS.iter().position(|g| *g == c) {
            Some(d) => char::from_digit(d as u32, 10),
            None if c.is_ascii_digit() || c == '.' => Some(c),
            None => None,
        })
        .collect();

    parse_prefix(&normalized).unwrap_or(0.0)
}

/// Like [`decode`], but accepts a missing input.
pub fn decode_opt(input: Option<&str>) -> f64 {
    input.map(decode).unwrap_or(0.0)
}

// `normalized` holds only digits and dots; stop before a second dot the way a
// prefix-based float parser does ("1.2.3" -> 1.2).
fn parse_prefix(normalized: &str) -> Option<f64> {
    let end = normalized
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(normalized.len());
    let candidate = &normalized[..end];
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    candidate.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_digit() {
        assert_eq!(encode(1234567890u64), "၁၂၃၄၅၆၇၈၉၀");
        assert_eq!(encode(3), "၃");
    }

    #[test]
    fn encode_passes_sign_and_point_through() {
        assert_eq!(encode(-12.5), "-၁၂.၅");
    }

    #[test]
    fn encode_missing_is_empty() {
        assert_eq!(encode_opt::<u32>(None), "");
        assert_eq!(encode_opt(Some(7)), "၇");
    }

    #[test]
    fn decode_handles_mixed_and_separated_input() {
        assert_eq!(decode("၁,၂၀၀"), 1200.0);
        assert_eq!(decode("1,500 Ks"), 1500.0);
        assert_eq!(decode("၁2၃"), 123.0);
        assert_eq!(decode("၂.၅"), 2.5);
        assert_eq!(decode("1.2.3"), 1.2);
        assert_eq!(decode(".5"), 0.5);
    }

    #[test]
    fn decode_falls_back_to_zero() {
        assert_eq!(decode(""), 0.0);
        assert_eq!(decode_opt(None), 0.0);
        assert_eq!(decode("abc"), 0.0);
        assert_eq!(decode("."), 0.0);
    }

    #[test]
    fn decode_inverts_encode_for_integers() {
        let mut n: u64 = 0;
        while n < 1_000_000_000_000 {
            assert_eq!(decode(&encode(n)), n as f64, "round trip of {}", n);
            n = n * 7 + 13;
        }
        assert_eq!(decode(&encode(999_999_999_999u64)), 999_999_999_999.0);
    }
}
