//! Field extraction from structured records
//!
//! Every field has one of three outcomes: absent, present but invalid, or
//! present and valid. Mandatory and optional extraction differ only in how
//! absence is reported; a present-but-invalid field always fails, whichever
//! kind of field observed it.

use crate::error::ParseError;
use crate::record::Record;
use serde_json::Value;
use tracing::trace;

/// Extract a mandatory field.
pub fn required<T, P>(record: &Record, field: &str, parse: P) -> Result<T, ParseError>
where
    P: FnOnce(&Value) -> Result<T, String>,
{
    match record.get(field) {
        None => {
            trace!(field, "mandatory field missing");
            Err(ParseError::missing(field))
        }
        Some(value) => parse(value).map_err(|reason| {
            trace!(field, %reason, "mandatory field invalid");
            ParseError::invalid(field, reason)
        }),
    }
}

/// Extract an optional field; absence is a normal outcome.
pub fn optional<T, P>(record: &Record, field: &str, parse: P) -> Result<Option<T>, ParseError>
where
    P: FnOnce(&Value) -> Result<T, String>,
{
    match record.get(field) {
        None => Ok(None),
        Some(value) => match parse(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(reason) => {
                trace!(field, %reason, "optional field invalid");
                Err(ParseError::invalid(field, reason))
            }
        },
    }
}

/// Extract an optional field with a documented default; absence parses as
/// present-with-default.
pub fn optional_or<T, P>(record: &Record, field: &str, default: T, parse: P) -> Result<T, ParseError>
where
    P: FnOnce(&Value) -> Result<T, String>,
{
    Ok(optional(record, field, parse)?.unwrap_or(default))
}

/// Extract a mandatory set-valued field.
///
/// The field must be an array; every element must parse; elements equal
/// under `T`'s equality are collapsed.
pub fn required_set<T, P>(record: &Record, field: &str, parse: P) -> Result<Vec<T>, ParseError>
where
    T: PartialEq,
    P: Fn(&Value) -> Result<T, String>,
{
    match record.get(field) {
        None => {
            trace!(field, "mandatory set field missing");
            Err(ParseError::missing(field))
        }
        Some(value) => parse_set(field, value, parse),
    }
}

/// Extract an optional set-valued field.
pub fn optional_set<T, P>(record: &Record, field: &str, parse: P) -> Result<Option<Vec<T>>, ParseError>
where
    T: PartialEq,
    P: Fn(&Value) -> Result<T, String>,
{
    match record.get(field) {
        None => Ok(None),
        Some(value) => parse_set(field, value, parse).map(Some),
    }
}

fn parse_set<T, P>(field: &str, value: &Value, parse: P) -> Result<Vec<T>, ParseError>
where
    T: PartialEq,
    P: Fn(&Value) -> Result<T, String>,
{
    let items = value
        .as_array()
        .ok_or_else(|| ParseError::invalid(field, "expected an array"))?;

    let mut parsed: Vec<T> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let element = parse(item).map_err(|reason| {
            trace!(field, index, %reason, "set element invalid");
            ParseError::invalid(field, format!("element {index}: {reason}"))
        })?;
        if !parsed.contains(&element) {
            parsed.push(element);
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_present_and_valid() {
        let rec = record(json!({"serialNumber": "SN-42"}));
        let parsed = required(&rec, "serialNumber", codec::string).unwrap();
        assert_eq!(parsed, "SN-42");
    }

    #[test]
    fn test_required_absent_names_field() {
        let rec = record(json!({}));
        let err = required(&rec, "serialNumber", codec::string).unwrap_err();
        assert!(err.to_string().contains("serialNumber"));
    }

    #[test]
    fn test_optional_absent_is_not_an_error() {
        let rec = record(json!({}));
        let parsed = optional(&rec, "vendorInfo", codec::string).unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_optional_present_but_invalid_fails() {
        // Optional means the field may be absent, not that a bad value is
        // forgiven.
        let rec = record(json!({"vendorInfo": 42}));
        let err = optional(&rec, "vendorInfo", codec::string).unwrap_err();
        assert!(err.to_string().contains("vendorInfo"));
    }

    #[test]
    fn test_optional_or_default() {
        let rec = record(json!({}));
        let unit = optional_or(&rec, "unit", "Wh".to_string(), codec::string).unwrap();
        assert_eq!(unit, "Wh");
    }

    #[test]
    fn test_set_deduplicates() {
        let rec = record(json!({"tags": ["a", "b", "a"]}));
        let parsed = required_set(&rec, "tags", codec::string).unwrap();
        assert_eq!(parsed, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_set_element_failure_names_field_and_index() {
        let rec = record(json!({"tags": ["a", 7]}));
        let err = required_set(&rec, "tags", codec::string).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("tags"));
        assert!(text.contains("element 1"));
    }

    #[test]
    fn test_set_requires_array() {
        let rec = record(json!({"tags": "a"}));
        let err = required_set(&rec, "tags", codec::string).unwrap_err();
        assert!(err.to_string().contains("expected an array"));
    }
}
