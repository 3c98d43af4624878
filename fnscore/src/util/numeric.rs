//! Lenient number extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Read the leading decimal number of `input`.
///
/// Mirrors what a browser's `parseFloat` accepts: leading whitespace, an
/// optional sign, digits with an optional fraction, an optional exponent, or
/// the literal `Infinity`. Anything after the number is ignored, so `"10x"`
/// yields `10.0` and `"5D"` yields `5.0`.
///
/// Returns `None` when the string does not start with a number.
pub fn leading_float(input: &str) -> Option<f64> {
    lazy_static! {
        static ref LEADING_FLOAT: Regex =
            Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
    }

    let text = LEADING_FLOAT.find(input.trim_start())?.as_str();
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let value = if magnitude == "Infinity" {
        f64::INFINITY
    } else {
        magnitude.parse::<f64>().ok()?
    };

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(leading_float("1234"), Some(1234.0));
        assert_eq!(leading_float("12.5"), Some(12.5));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("-3"), Some(-3.0));
        assert_eq!(leading_float("+7.25"), Some(7.25));
    }

    #[test]
    fn test_trailing_garbage_is_ignored() {
        assert_eq!(leading_float("10x"), Some(10.0));
        assert_eq!(leading_float("5D"), Some(5.0));
        assert_eq!(leading_float("2024-06-01"), Some(2024.0));
        assert_eq!(leading_float("1e"), Some(1.0));
    }

    #[test]
    fn test_exponent_and_whitespace() {
        assert_eq!(leading_float("  1.5e3ms"), Some(1500.0));
        assert_eq!(leading_float("2E-2"), Some(0.02));
    }

    #[test]
    fn test_infinity_literal() {
        assert_eq!(leading_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(leading_float("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_no_leading_number() {
        assert_eq!(leading_float(""), None);
        assert_eq!(leading_float("invalid"), None);
        assert_eq!(leading_float("-"), None);
        assert_eq!(leading_float("d5"), None);
    }
}
