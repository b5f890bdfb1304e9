//! Loose coercion of request fields
//!
//! Request bodies are never rejected for having the wrong shape. Each field
//! is coerced the way a dynamically typed client would expect:
//! - strings: `to_text` (missing becomes "undefined", null becomes "null",
//!   arrays become their elements joined with ",")
//! - numbers: `to_number` (unparseable becomes NaN, blank becomes 0)
//! - timestamps: `to_timestamp` (falsy means "use the default")

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Failure to coerce a field that has no lenient fallback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionError {
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    #[error("invalid record id: {raw}")]
    InvalidId { raw: String },
}

/// Coerce a field to a string.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_owned(),
        Some(Value::Null) => "null".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Array(items)) => list_text(items),
        Some(Value::Object(_)) => "[object Object]".to_owned(),
    }
}

/// Coerce a field to a float. Never fails; bad input becomes NaN.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number(s),
        Some(Value::Array(items)) => parse_number(&list_text(items)),
        Some(Value::Object(_)) => f64::NAN,
    }
}

/// Parse numeric text.
///
/// Accepts surrounding whitespace, decimal and exponent forms, `0x`/`0o`/`0b`
/// integer literals and `Infinity`. Blank text is 0.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // f64::from_str also takes "inf" and "nan", which are not numbers here
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }

    s.parse().unwrap_or(f64::NAN)
}

/// Coerce an optional reading timestamp.
///
/// `Ok(None)` means the caller should fall back to the insertion time.
pub fn to_timestamp(value: Option<&Value>) -> Result<Option<DateTime<Utc>>, CoercionError> {
    fn invalid(v: &impl ToString) -> CoercionError {
        CoercionError::InvalidTimestamp {
            value: v.to_string(),
        }
    }

    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        // true is 1 ms past the epoch
        Some(Value::Bool(true)) => Ok(DateTime::from_timestamp_millis(1)),
        Some(Value::String(s)) => parse_timestamp(s).map(Some).ok_or_else(|| invalid(s)),
        Some(Value::Array(items)) => {
            let text = list_text(items);
            parse_timestamp(&text).map(Some).ok_or_else(|| invalid(&text))
        }
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| DateTime::from_timestamp_millis(ms.trunc() as i64))
            .map(Some)
            .ok_or_else(|| invalid(n)),
        Some(other) => Err(invalid(other)),
    }
}

/// Coerce a raw `id` query value to a primary key.
pub fn to_record_id(raw: &str) -> Result<i64, CoercionError> {
    let n = parse_number(raw);
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        Ok(n as i64)
    } else {
        Err(CoercionError::InvalidId { raw: raw.to_owned() })
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => format_number(f),
        _ => n.to_string(),
    }
}

/// Elements joined with ",", null elements rendered empty.
fn list_text(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            other => to_text(Some(other)),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn format_number(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_owned();
    }
    if f == f64::INFINITY {
        return "Infinity".to_owned();
    }
    if f == f64::NEG_INFINITY {
        return "-Infinity".to_owned();
    }
    if f == 0.0 {
        // includes -0
        return "0".to_owned();
    }

    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // Display drops a trailing ".0"
        return f.to_string();
    }

    // Exponent form with an explicit sign: 1e+21, 1.5e-7
    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_coercion() {
        assert_eq!(to_text(Some(&json!("cpu"))), "cpu");
        assert_eq!(to_text(Some(&json!(42))), "42");
        assert_eq!(to_text(Some(&json!(1.5))), "1.5");
        assert_eq!(to_text(Some(&json!(2.0))), "2");
        assert_eq!(to_text(Some(&json!(true))), "true");
        assert_eq!(to_text(Some(&Value::Null)), "null");
        assert_eq!(to_text(None), "undefined");
        assert_eq!(to_text(Some(&json!([1, 2]))), "1,2");
        assert_eq!(to_text(Some(&json!(["a", null, [3, 4]]))), "a,,3,4");
        assert_eq!(to_text(Some(&json!({"a": 1}))), "[object Object]");
    }

    #[test]
    fn text_of_large_and_small_floats() {
        assert_eq!(to_text(Some(&json!(1e21))), "1e+21");
        assert_eq!(to_text(Some(&json!(1.5e-7))), "1.5e-7");
        assert_eq!(to_text(Some(&json!(0.000001))), "0.000001");
        assert_eq!(to_text(Some(&json!(123456.75))), "123456.75");
        assert_eq!(to_text(Some(&json!(-0.0))), "0");
    }

    #[test]
    fn number_coercion() {
        assert_eq!(to_number(Some(&json!(12.5))), 12.5);
        assert_eq!(to_number(Some(&json!("  7 "))), 7.0);
        assert_eq!(to_number(Some(&json!(""))), 0.0);
        assert_eq!(to_number(Some(&Value::Null)), 0.0);
        assert_eq!(to_number(Some(&json!(true))), 1.0);
        assert_eq!(to_number(Some(&json!(false))), 0.0);
        assert!(to_number(None).is_nan());
        assert!(to_number(Some(&json!("abc"))).is_nan());
        assert!(to_number(Some(&json!({"a": 1}))).is_nan());
        assert_eq!(to_number(Some(&json!([5]))), 5.0);
        assert_eq!(to_number(Some(&json!(["7"]))), 7.0);
        assert_eq!(to_number(Some(&json!([]))), 0.0);
        assert!(to_number(Some(&json!([1, 2]))).is_nan());
    }

    #[test]
    fn number_text_forms() {
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("-0.25"), -0.25);
        assert_eq!(parse_number("0x1A"), 26.0);
        assert_eq!(parse_number("0b101"), 5.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("nan").is_nan());
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("0x").is_nan());
    }

    #[test]
    fn timestamp_defaults_when_falsy() {
        assert_eq!(to_timestamp(None).unwrap(), None);
        assert_eq!(to_timestamp(Some(&Value::Null)).unwrap(), None);
        assert_eq!(to_timestamp(Some(&json!(""))).unwrap(), None);
        assert_eq!(to_timestamp(Some(&json!(0))).unwrap(), None);
        assert_eq!(to_timestamp(Some(&json!(false))).unwrap(), None);
    }

    #[test]
    fn timestamp_parsing() {
        let ts = to_timestamp(Some(&json!("2024-03-01T12:00:00Z")))
            .unwrap()
            .unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T12:00:00+00:00");

        let ts = to_timestamp(Some(&json!("2024-03-01T14:00:00+02:00")))
            .unwrap()
            .unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T12:00:00+00:00");

        let ts = to_timestamp(Some(&json!("2024-03-01"))).unwrap().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let ts = to_timestamp(Some(&json!(1_700_000_000_000_i64)))
            .unwrap()
            .unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_000);

        let ts = to_timestamp(Some(&json!(true))).unwrap().unwrap();
        assert_eq!(ts.timestamp_millis(), 1);

        let ts = to_timestamp(Some(&json!(["2024-03-01"]))).unwrap().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn timestamp_rejects_garbage() {
        let err = to_timestamp(Some(&json!("yesterday"))).unwrap_err();
        assert!(matches!(err, CoercionError::InvalidTimestamp { .. }));
        assert!(to_timestamp(Some(&json!([]))).is_err());
        assert!(to_timestamp(Some(&json!({"at": "2024-01-01"}))).is_err());
    }

    #[test]
    fn record_ids() {
        assert_eq!(to_record_id("42").unwrap(), 42);
        assert_eq!(to_record_id(" 7 ").unwrap(), 7);
        assert!(matches!(
            to_record_id("abc").unwrap_err(),
            CoercionError::InvalidId { .. }
        ));
        assert!(to_record_id("1.5").is_err());
    }

    #[test]
    fn error_display() {
        let err = CoercionError::InvalidId { raw: "x".into() };
        assert_eq!(err.to_string(), "invalid record id: x");
    }
}
