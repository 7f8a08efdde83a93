//! Error types for the data model
//!
//! Two failure channels exist: a malformed record is a [`ParseError`], a
//! structurally well-typed but semantically invalid value is a
//! [`ConstructError`]. `try_parse` converts the latter into the former, so
//! callers observe a single failure surface at the parse boundary.

use thiserror::Error;

/// Failure while parsing a structured record or binary input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A mandatory field was not present in the record.
    #[error("mandatory field '{0}' is missing")]
    MissingField(String),

    /// A field was present but did not match its expected shape.
    #[error("field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// The parsed fields violated a domain constraint.
    #[error(transparent)]
    Constraint(#[from] ConstructError),

    /// Binary input was truncated or malformed.
    #[error("binary input: {0}")]
    Binary(String),

    /// The binary format discriminator is not recognized.
    #[error("unsupported binary format {0}")]
    UnsupportedFormat(String),
}

impl ParseError {
    /// A mandatory field was absent.
    pub fn missing(field: &str) -> Self {
        ParseError::MissingField(field.to_string())
    }

    /// A present field failed to parse; `reason` is the codec's reason,
    /// verbatim.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Domain-constraint violation raised by a value constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    #[error("field '{field}' out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("field '{field}' must not be empty")]
    Empty { field: String },

    #[error("field '{field}' exceeds {max} characters")]
    TooLong { field: String, max: usize },

    #[error("field '{field}' is required when {condition}")]
    ConditionallyRequired { field: String, condition: String },

    #[error("field '{field}' is only allowed when {condition}")]
    ConditionallyForbidden { field: String, condition: String },

    #[error("field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConstructError {
    pub fn out_of_range(field: &str, reason: impl Into<String>) -> Self {
        ConstructError::OutOfRange {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn empty(field: &str) -> Self {
        ConstructError::Empty {
            field: field.to_string(),
        }
    }

    pub fn too_long(field: &str, max: usize) -> Self {
        ConstructError::TooLong {
            field: field.to_string(),
            max,
        }
    }

    pub fn required_when(field: &str, condition: &str) -> Self {
        ConstructError::ConditionallyRequired {
            field: field.to_string(),
            condition: condition.to_string(),
        }
    }

    pub fn only_allowed_when(field: &str, condition: &str) -> Self {
        ConstructError::ConditionallyForbidden {
            field: field.to_string(),
            condition: condition.to_string(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConstructError::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure while updating a live configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    #[error("variable '{0}' is read-only")]
    ReadOnly(String),

    #[error("stale update: expected current value {expected:?}, found {found:?}")]
    StaleValue {
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("new value rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_field() {
        let err = ParseError::missing("serialNumber");
        assert_eq!(err.to_string(), "mandatory field 'serialNumber' is missing");

        let err = ParseError::invalid("soC", "expected a number");
        assert_eq!(err.to_string(), "field 'soC': expected a number");
    }

    #[test]
    fn test_construct_error_converts_to_parse_error() {
        let construct = ConstructError::out_of_range("soC", "must be between 0 and 100");
        let parse: ParseError = construct.clone().into();
        // The transparent wrapper keeps the reason text intact.
        assert_eq!(parse.to_string(), construct.to_string());
    }
}
