//! Price text → whole VND
//!
//! Sources quote either thousand-VND per tael ("74.500") or full VND
//! ("74.500.000"), with no reliable unit marker. The form is decided purely by
//! the number of digits left after stripping everything else. Persisted history
//! depends on this threshold, so it must not change.

/// Up to this many digits the value is short form (thousand VND)
pub const SHORT_FORM_MAX_DIGITS: usize = 6;

pub const SHORT_FORM_MULTIPLIER: i64 = 1_000;

/// Normalize raw cell text to whole VND. Never fails: anything without digits,
/// or too long to fit an `i64`, yields `None`.
pub fn normalize(raw: Option<&str>) -> Option<i64> {
    let digits: String = raw?.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    if digits.len() <= SHORT_FORM_MAX_DIGITS {
        value.checked_mul(SHORT_FORM_MULTIPLIER)
    } else {
        Some(value)
    }
}

pub fn normalize_str(raw: &str) -> Option<i64> {
    normalize(Some(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("74000", Some(74_000_000))]
    #[case("75.500", Some(75_500_000))]
    #[case("154,800", Some(154_800_000))]
    #[case("74.500.000", Some(74_500_000))]
    #[case("154.800.000 đ", Some(154_800_000))]
    #[case("999999", Some(999_999_000))]
    #[case("1000000", Some(1_000_000))]
    #[case("", None)]
    #[case("abc", None)]
    #[case("nan", None)]
    #[case("-", None)]
    #[case("12345678901234567890123", None)]
    fn test_normalize_cases(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(normalize_str(raw), expected);
    }

    #[test]
    fn test_normalize_missing_input() {
        assert_eq!(normalize(None), None);
    }

    proptest! {
        #[test]
        fn short_form_is_scaled(digits in "[0-9]{1,6}") {
            let expected = digits.parse::<i64>().unwrap() * 1_000;
            prop_assert_eq!(normalize_str(&digits), Some(expected));
        }

        #[test]
        fn long_form_is_kept(digits in "[0-9]{7,18}") {
            let expected = digits.parse::<i64>().unwrap();
            prop_assert_eq!(normalize_str(&digits), Some(expected));
        }

        #[test]
        fn full_form_is_idempotent(raw in "[1-9][0-9]{0,2}(\\.[0-9]{3}){2,5}") {
            let once = normalize_str(&raw);
            prop_assert!(once.is_some());
            let twice = once.and_then(|value| normalize_str(&value.to_string()));
            prop_assert_eq!(twice, once);
        }
    }
}
