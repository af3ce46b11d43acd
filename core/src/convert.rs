//! Conversion of raw argument values into typed values.
//!
//! Numeric parsing is prefix-based: `"42px"` is the integer 42 and
//! `"3.5em"` the number 3.5. Input with no numeric prefix is a
//! [`ConversionError::NotANumber`] rather than a sentinel value.

use serde_json::Value;
use tracing::warn;

use crate::error::ConversionError;
use crate::tokenize::RawValue;
use crate::types::{OptionValue, ScalarType, ValueType};

/// Converts a raw value to the declared type.
///
/// A value-less flag converts to `true` for boolean options and is a
/// [`ConversionError::MissingValue`] for every other type.
///
/// # Examples
///
/// ```
/// use filekit_core::{OptionValue, RawValue, ValueType, convert};
///
/// let raw = RawValue::Value("[1,2,3]".into());
/// let list = convert(&raw, "arr:int".parse().unwrap()).unwrap();
/// assert_eq!(
///     list,
///     OptionValue::Array(vec![
///         OptionValue::Integer(1),
///         OptionValue::Integer(2),
///         OptionValue::Integer(3),
///     ])
/// );
///
/// assert_eq!(convert(&RawValue::Present, ValueType::BOOLEAN), Ok(OptionValue::Bool(true)));
/// ```
pub fn convert(raw: &RawValue, value_type: ValueType) -> Result<OptionValue, ConversionError> {
    let text = match raw {
        RawValue::Value(text) => text,
        RawValue::Present if value_type.is_boolean() => return Ok(OptionValue::Bool(true)),
        RawValue::Present => {
            return Err(ConversionError::MissingValue {
                expected: value_type.to_string(),
            });
        }
    };

    match value_type {
        ValueType::Scalar(scalar) => convert_scalar(text, scalar),
        ValueType::Array(element) => convert_array(text, element),
    }
}

/// Converts a single string to a scalar type.
pub fn convert_scalar(text: &str, scalar: ScalarType) -> Result<OptionValue, ConversionError> {
    let not_a_number = || ConversionError::NotANumber {
        raw: text.to_string(),
        expected: scalar,
    };

    match scalar {
        ScalarType::String => Ok(OptionValue::String(text.to_string())),
        ScalarType::Number => parse_float_prefix(text)
            .map(OptionValue::Number)
            .ok_or_else(not_a_number),
        ScalarType::Integer => parse_int_prefix(text)
            .map(OptionValue::Integer)
            .ok_or_else(not_a_number),
        ScalarType::Boolean => Ok(OptionValue::Bool(to_boolean(text))),
    }
}

fn convert_array(text: &str, element: ScalarType) -> Result<OptionValue, ConversionError> {
    let invalid = |reason: String| {
        warn!(raw = text, %reason, "Failed to decode array value");
        ConversionError::InvalidArray {
            raw: text.to_string(),
            reason,
        }
    };

    let items = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items,
        Ok(_) => return Err(invalid("expected a JSON array".to_string())),
        Err(e) => return Err(invalid(e.to_string())),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            convert_element(item, element).map_err(|source| ConversionError::InvalidElement {
                index,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(OptionValue::Array)
}

fn convert_element(item: &Value, element: ScalarType) -> Result<OptionValue, ConversionError> {
    match (item, element) {
        (Value::Number(n), ScalarType::Boolean) => {
            Ok(OptionValue::Bool(n.as_f64().is_some_and(|f| f != 0.0)))
        }
        (Value::Bool(b), ScalarType::Boolean) => Ok(OptionValue::Bool(*b)),
        (Value::String(s), _) => convert_scalar(s, element),
        (other, _) => convert_scalar(&other.to_string(), element),
    }
}

fn to_boolean(text: &str) -> bool {
    match text {
        "true" => true,
        "false" => false,
        other => !other.is_empty(),
    }
}

/// Parses the longest decimal prefix, after leading whitespace.
fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// Parses the leading integer portion, after leading whitespace. A `0x`
/// prefix switches to hexadecimal. Values beyond the `i64` range saturate.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, body) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let len = body
        .bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count();
    if len == 0 {
        return None;
    }

    Some(match i64::from_str_radix(&body[..len], radix) {
        Ok(magnitude) if negative => -magnitude,
        Ok(magnitude) => magnitude,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawValue {
        RawValue::Value(text.to_string())
    }

    #[test]
    fn test_string_is_identity() {
        assert_eq!(
            convert(&raw(" spaced "), ValueType::STRING),
            Ok(OptionValue::from(" spaced "))
        );
    }

    #[test]
    fn test_number_prefix_parsing() {
        assert_eq!(parse_float_prefix("3.5em"), Some(3.5));
        assert_eq!(parse_float_prefix("  -2"), Some(-2.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("7e"), Some(7.0));
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_integer_prefix_truncates() {
        assert_eq!(parse_int_prefix("12.9"), Some(12));
        assert_eq!(parse_int_prefix("42px"), Some(42));
        assert_eq!(parse_int_prefix(" -7"), Some(-7));
        assert_eq!(parse_int_prefix("0x1A"), Some(26));
        assert_eq!(parse_int_prefix("px"), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_integer_out_of_range_saturates() {
        assert_eq!(
            convert_scalar("99999999999999999999", ScalarType::Integer),
            Ok(OptionValue::Integer(i64::MAX))
        );
        assert_eq!(
            convert_scalar("-99999999999999999999px", ScalarType::Integer),
            Ok(OptionValue::Integer(i64::MIN))
        );
        assert_eq!(
            convert_scalar("0xFFFFFFFFFFFFFFFFFF", ScalarType::Integer),
            Ok(OptionValue::Integer(i64::MAX))
        );
    }

    #[test]
    fn test_non_numeric_input_is_a_conversion_failure() {
        assert_eq!(
            convert(&raw("five"), ValueType::INTEGER),
            Err(ConversionError::NotANumber {
                raw: "five".to_string(),
                expected: ScalarType::Integer,
            })
        );
        assert!(matches!(
            convert(&raw("n/a"), ValueType::NUMBER),
            Err(ConversionError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_boolean_conversion() {
        assert_eq!(convert(&raw("true"), ValueType::BOOLEAN), Ok(OptionValue::Bool(true)));
        assert_eq!(convert(&raw("false"), ValueType::BOOLEAN), Ok(OptionValue::Bool(false)));
        assert_eq!(convert(&raw("yes"), ValueType::BOOLEAN), Ok(OptionValue::Bool(true)));
        assert_eq!(convert(&raw(""), ValueType::BOOLEAN), Ok(OptionValue::Bool(false)));
        assert_eq!(convert(&RawValue::Present, ValueType::BOOLEAN), Ok(OptionValue::Bool(true)));
    }

    #[test]
    fn test_bare_flag_for_valued_type_is_missing_value() {
        assert_eq!(
            convert(&RawValue::Present, ValueType::STRING),
            Err(ConversionError::MissingValue {
                expected: "string".to_string()
            })
        );
    }

    #[test]
    fn test_array_elements_convert_independently() {
        let strings = convert(&raw(r#"["a", 1, true]"#), ValueType::Array(ScalarType::String));
        assert_eq!(
            strings,
            Ok(OptionValue::Array(vec![
                OptionValue::from("a"),
                OptionValue::from("1"),
                OptionValue::from("true"),
            ]))
        );

        let numbers = convert(&raw(r#"[1.5, "2"]"#), ValueType::Array(ScalarType::Number));
        assert_eq!(
            numbers,
            Ok(OptionValue::Array(vec![
                OptionValue::Number(1.5),
                OptionValue::Number(2.0),
            ]))
        );

        let flags = convert(&raw("[0, 1, false]"), ValueType::Array(ScalarType::Boolean));
        assert_eq!(
            flags,
            Ok(OptionValue::Array(vec![
                OptionValue::Bool(false),
                OptionValue::Bool(true),
                OptionValue::Bool(false),
            ]))
        );
    }

    #[test]
    fn test_array_requires_json_array() {
        assert!(matches!(
            convert(&raw("1,2,3"), ValueType::Array(ScalarType::Integer)),
            Err(ConversionError::InvalidArray { .. })
        ));
        assert!(matches!(
            convert(&raw("{\"a\":1}"), ValueType::Array(ScalarType::Integer)),
            Err(ConversionError::InvalidArray { .. })
        ));
    }

    #[test]
    fn test_array_element_failure_reports_index() {
        let err = convert(&raw(r#"[1, "x"]"#), ValueType::Array(ScalarType::Integer)).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidElement { index: 1, .. }));
    }
}
