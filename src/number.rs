//! Numeric literal conversion
//!
//! The lexer hands every identifier that starts with a digit to
//! [`convert_to_number`] once the `l`/`u` suffixes are stripped.

use std::fmt;

/// Value of a number literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }

    /// Arithmetic negation; `i64::MIN` widens to a float instead of overflowing.
    pub fn negate(self) -> Number {
        match self {
            Number::Integer(value) => value
                .checked_neg()
                .map(Number::Integer)
                .unwrap_or(Number::Float(-(value as f64))),
            Number::Float(value) => Number::Float(-value),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Convert a lowercased, suffix-free literal to a number.
///
/// Accepts decimal, `0x` hexadecimal and leading-zero octal integers, and
/// decimal floats. Floats without a fractional part collapse to integers, so
/// `0.0` and `0` are the same literal.
pub fn convert_to_number(text: &str) -> Option<Number> {
    let first = text.chars().next()?;
    if !first.is_ascii_digit() && first != '.' {
        return None;
    }

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok().map(Number::Integer);
    }

    if text.len() > 1 && first == '0' && text.bytes().all(|b| b.is_ascii_digit()) {
        return i64::from_str_radix(&text[1..], 8).ok().map(Number::Integer);
    }

    if let Ok(value) = text.parse::<i64>() {
        return Some(Number::Integer(value));
    }

    let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(Number::Integer(value as i64))
    } else {
        Some(Number::Float(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(convert_to_number("0"), Some(Number::Integer(0)));
        assert_eq!(convert_to_number("42"), Some(Number::Integer(42)));
        assert_eq!(convert_to_number("0x1f"), Some(Number::Integer(31)));
        assert_eq!(convert_to_number("010"), Some(Number::Integer(8)));
    }

    #[test]
    fn test_floats() {
        assert_eq!(convert_to_number("2.26"), Some(Number::Float(2.26)));
        assert_eq!(convert_to_number(".5"), Some(Number::Float(0.5)));
        // whole floats collapse to integers
        assert_eq!(convert_to_number("0.0"), Some(Number::Integer(0)));
        assert_eq!(convert_to_number("3."), Some(Number::Integer(3)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(convert_to_number(""), None);
        assert_eq!(convert_to_number("08"), None);
        assert_eq!(convert_to_number("1.2.3"), None);
        assert_eq!(convert_to_number("12abc"), None);
        assert_eq!(convert_to_number("0xzz"), None);
        assert_eq!(convert_to_number("inf"), None);
    }

    #[test]
    fn test_display_and_negate() {
        assert_eq!(Number::Integer(2).to_string(), "2");
        assert_eq!(Number::Float(2.214).to_string(), "2.214");
        assert_eq!(Number::Float(4.2).negate().to_string(), "-4.2");
        assert_eq!(Number::Integer(0).negate(), Number::Integer(0));
        assert!(Number::Integer(0).negate().is_zero());
        assert!(!Number::Integer(i64::MIN).negate().is_zero());
    }
}
