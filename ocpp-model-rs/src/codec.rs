//! Primitive field codec
//!
//! Converts scalar record values to strongly typed primitives and back.
//! Parse helpers return the expected shape as the error text; the field
//! extractor attaches the offending field name on top.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;
use std::str::FromStr;

// ============================================================================
// Parse direction
// ============================================================================

/// Any string.
pub fn string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err("expected a string".to_string()),
    }
}

/// A string with at least one character.
pub fn non_empty_string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::String(_) => Err("expected a non-empty string".to_string()),
        _ => Err("expected a string".to_string()),
    }
}

/// A whole number.
pub fn integer(value: &Value) -> Result<i64, String> {
    value
        .as_i64()
        .ok_or_else(|| "expected an integer".to_string())
}

/// A whole number fitting 32 bits.
pub fn int32(value: &Value) -> Result<i32, String> {
    integer(value)
        .and_then(|i| i32::try_from(i).map_err(|_| "expected a 32-bit integer".to_string()))
}

/// Any JSON number.
pub fn decimal(value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| "expected a number".to_string())
}

/// An RFC 3339 timestamp string.
pub fn timestamp(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| format!("expected an RFC 3339 timestamp, got '{s}'")),
        _ => Err("expected an RFC 3339 timestamp string".to_string()),
    }
}

/// A duration carried as a whole number of seconds.
pub fn duration(value: &Value) -> Result<Duration, String> {
    integer(value).map(Duration::seconds)
}

/// An enumerated token or string-carried identifier.
pub fn token<T: FromStr<Err = String>>(value: &Value) -> Result<T, String> {
    match value {
        Value::String(s) => s.parse(),
        _ => Err("expected a string token".to_string()),
    }
}

// ============================================================================
// Render direction
// ============================================================================

/// Render a timestamp as RFC 3339 with a trailing `Z`.
///
/// Sub-second digits are emitted only when present, so rendering loses
/// nothing a later parse would need.
pub fn render_timestamp(timestamp: &DateTime<Utc>) -> Value {
    Value::String(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Render a duration as a whole number of seconds.
pub fn render_duration(duration: &Duration) -> Value {
    Value::from(duration.num_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_codec() {
        assert_eq!(string(&json!("SN-42")).unwrap(), "SN-42");
        assert!(string(&json!(42)).is_err());
        assert!(non_empty_string(&json!("")).is_err());
    }

    #[test]
    fn test_number_codecs() {
        assert_eq!(integer(&json!(7)).unwrap(), 7);
        assert!(integer(&json!(1.5)).is_err());
        assert_eq!(decimal(&json!(55)).unwrap(), 55.0);
        assert!(decimal(&json!("55")).is_err());
    }

    #[test]
    fn test_timestamp_round_trip() {
        let parsed = timestamp(&json!("2026-01-20T12:00:00Z")).unwrap();
        let rendered = render_timestamp(&parsed);
        assert_eq!(rendered, json!("2026-01-20T12:00:00Z"));
        assert_eq!(timestamp(&rendered).unwrap(), parsed);
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        let err = timestamp(&json!("yesterday")).unwrap_err();
        assert!(err.contains("RFC 3339"));
    }

    #[test]
    fn test_duration_codec() {
        let d = duration(&json!(3600)).unwrap();
        assert_eq!(d.num_seconds(), 3600);
        assert_eq!(render_duration(&d), json!(3600));
    }
}
