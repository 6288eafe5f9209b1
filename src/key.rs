//! Turns a looked-up field value into the numeric key the ordering utility compares.

use crate::record::FieldValue;

/// The key substituted for absent and falsy values, so they sort after any realistic priority.
pub const DEFAULT_SENTINEL: f64 = 999.0;

/// Which values are replaced by the sentinel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FalsyPolicy {
    /// Every falsy value, including an explicit `0`, `false` or `""`, becomes the sentinel.
    ///
    /// This pushes legitimately zero valued records to the end of the sequence. Kept as the
    /// default because switching changes observable ordering.
    #[default]
    Sentinel,
    /// Only absent and null values become the sentinel.
    MissingOnly,
}

/// Resolves `val` into a sort key. The result may be NaN for text that is not numeric.
#[inline]
pub fn resolve(val: &FieldValue, sentinel: f64, policy: FalsyPolicy) -> f64 {
    let use_sentinel = match policy {
        FalsyPolicy::Sentinel => val.is_falsy(),
        FalsyPolicy::MissingOnly => val.is_missing(),
    };

    if use_sentinel {
        return sentinel;
    }

    to_number(val)
}

/// Numeric coercion with the same results as the `Number(x)` conversion of the display layer.
pub fn to_number(val: &FieldValue) -> f64 {
    match val {
        FieldValue::Absent => f64::NAN,
        FieldValue::Null => 0.0,
        FieldValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) | FieldValue::Compound(s) => text_to_number(s),
    }
}

fn text_to_number(s: &str) -> f64 {
    // U+FEFF counts as whitespace for numeric text, `str::trim` keeps it.
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');

    if s.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Rust's float parser also accepts "inf", "nan" and friends, which are not numeric here.
    let is_decimal_literal = !unsigned.starts_with(['+', '-'])
        && unsigned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && unsigned.bytes().any(|b| b.is_ascii_digit());

    if !is_decimal_literal {
        return f64::NAN;
    }

    unsigned
        .parse::<f64>()
        .map_or(f64::NAN, |val| sign * val)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    let mut acc = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * radix as f64 + d as f64,
            None => return f64::NAN,
        }
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.into())
    }

    #[test]
    fn sentinel_policy() {
        let resolve_default =
            |val: &FieldValue| resolve(val, DEFAULT_SENTINEL, FalsyPolicy::Sentinel);

        assert_eq!(resolve_default(&FieldValue::Absent), 999.0);
        assert_eq!(resolve_default(&FieldValue::Null), 999.0);
        assert_eq!(resolve_default(&FieldValue::Number(0.0)), 999.0);
        assert_eq!(resolve_default(&FieldValue::Bool(false)), 999.0);
        assert_eq!(resolve_default(&text("")), 999.0);
        assert_eq!(resolve_default(&FieldValue::Number(f64::NAN)), 999.0);

        assert_eq!(resolve_default(&FieldValue::Number(3.0)), 3.0);
        assert_eq!(resolve_default(&FieldValue::Number(-3.0)), -3.0);
        assert_eq!(resolve_default(&FieldValue::Bool(true)), 1.0);
        assert_eq!(resolve_default(&text("12")), 12.0);
        assert!(resolve_default(&text("abc")).is_nan());
    }

    #[test]
    fn missing_only_policy() {
        let resolve_missing =
            |val: &FieldValue| resolve(val, DEFAULT_SENTINEL, FalsyPolicy::MissingOnly);

        assert_eq!(resolve_missing(&FieldValue::Absent), 999.0);
        assert_eq!(resolve_missing(&FieldValue::Null), 999.0);
        assert_eq!(resolve_missing(&FieldValue::Number(0.0)), 0.0);
        assert_eq!(resolve_missing(&FieldValue::Bool(false)), 0.0);
        assert_eq!(resolve_missing(&text("")), 0.0);
    }

    #[test]
    fn compound_coercion() {
        let compound = |s: &str| FieldValue::Compound(s.into());

        assert_eq!(resolve(&compound(""), DEFAULT_SENTINEL, FalsyPolicy::Sentinel), 0.0);
        assert_eq!(resolve(&compound("1"), DEFAULT_SENTINEL, FalsyPolicy::Sentinel), 1.0);
        assert!(to_number(&compound("1,2")).is_nan());
        assert!(to_number(&compound("[object Object]")).is_nan());
    }

    #[test]
    fn custom_sentinel() {
        assert_eq!(resolve(&FieldValue::Absent, -1.0, FalsyPolicy::Sentinel), -1.0);
    }

    #[test]
    fn text_coercion() {
        assert_eq!(to_number(&text("  42  ")), 42.0);
        assert_eq!(to_number(&text("-1.5e2")), -150.0);
        assert_eq!(to_number(&text("+7")), 7.0);
        assert_eq!(to_number(&text(".5")), 0.5);
        assert_eq!(to_number(&text("0x1F")), 31.0);
        assert_eq!(to_number(&text("0b101")), 5.0);
        assert_eq!(to_number(&text("0o17")), 15.0);
        assert_eq!(to_number(&text("-Infinity")), f64::NEG_INFINITY);
        assert_eq!(to_number(&text("   ")), 0.0);
        assert_eq!(to_number(&text("\u{FEFF}5")), 5.0);
        assert_eq!(to_number(&text("\u{FEFF} 8 \u{FEFF}")), 8.0);
        assert_eq!(to_number(&text("\u{FEFF}")), 0.0);

        assert!(to_number(&text("inf")).is_nan());
        assert!(to_number(&text("NaN")).is_nan());
        assert!(to_number(&text("12px")).is_nan());
        assert!(to_number(&text("0x")).is_nan());
        assert!(to_number(&text("1e")).is_nan());
        assert!(to_number(&text("+-5")).is_nan());
        assert!(to_number(&FieldValue::Absent).is_nan());
    }
}
