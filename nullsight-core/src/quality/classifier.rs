//! Missing/present classification and value normalization.
//!
//! Every other analysis goes through these two functions, so the rules for
//! what counts as missing and when two values are equal live in one place.

use crate::models::Value;

/// Returns true if `value` counts as missing.
///
/// A value is missing if it is null, a `NaN` number, or a string that is
/// empty after trimming. Everything else is present, including `0` and
/// whitespace-padded text.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => n.is_nan(),
        Value::String(s) => s.trim().is_empty(),
    }
}

/// Returns the comparison key used for uniqueness counting.
///
/// Strings are trimmed; numbers use their shortest decimal form, so `1` and
/// `1.0` compare equal and so do a number and the string spelling it.
/// Null normalizes to the empty string, but callers only normalize
/// present values.
pub fn normalize(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.trim().to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // -0 and 0 are the same value
        "0".to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_missing() {
        assert!(is_missing(&Value::Null));
    }

    #[test]
    fn test_nan_is_missing() {
        assert!(is_missing(&Value::Number(f64::NAN)));
        assert!(!is_missing(&Value::Number(0.0)));
        assert!(!is_missing(&Value::Number(f64::INFINITY)));
    }

    #[test]
    fn test_blank_strings_are_missing() {
        assert!(is_missing(&Value::from("")));
        assert!(is_missing(&Value::from("   ")));
        assert!(is_missing(&Value::from("\t\n")));
        assert!(!is_missing(&Value::from(" a ")));
        assert!(!is_missing(&Value::from("false")));
    }

    #[test]
    fn test_normalize_trims_strings() {
        assert_eq!(normalize(&Value::from("  Alice ")), "Alice");
    }

    #[test]
    fn test_normalize_numbers() {
        assert_eq!(normalize(&Value::Number(1.0)), "1");
        assert_eq!(normalize(&Value::Number(1.5)), "1.5");
        assert_eq!(normalize(&Value::Number(-0.0)), "0");
        assert_eq!(normalize(&Value::Number(-42.0)), "-42");
        assert_eq!(normalize(&Value::Number(f64::NEG_INFINITY)), "-Infinity");
    }

    #[test]
    fn test_mixed_types_compare_by_text() {
        // A stray string in a numeric field still normalizes without failure
        assert_eq!(normalize(&Value::from(7)), normalize(&Value::from("7")));
        assert_ne!(normalize(&Value::from(7)), normalize(&Value::from("7.0")));
    }
}
