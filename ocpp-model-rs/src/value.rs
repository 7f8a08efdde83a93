//! The value-type contract
//!
//! Every protocol value implements [`ValueType`]: construction-time
//! validation, a non-panicking `try_parse` entry point, a single panicking
//! `parse` convenience wrapper, hook-aware serialization, and a structural
//! hash precomputed from all declared fields.
//!
//! Hooks are plain functions taken by reference. A parse hook runs only
//! after construction and validation succeed; a serializer hook receives
//! the fully produced record as the last step. Neither can reach into
//! nested values: children are already serialized (or constructed) when a
//! hook observes them.

use crate::custom_data::CustomData;
use crate::error::ParseError;
use crate::record::Record;
use serde_json::Value;

/// An immutable, structurally equal, validated protocol value.
pub trait ValueType: Sized + Clone {
    /// Schema name, used to prefix fatal parse messages.
    const NAME: &'static str;

    /// Render into a structured record.
    fn to_record(&self) -> Record;

    /// Parse from a structured record.
    fn from_record(record: &Record) -> Result<Self, ParseError>;

    /// The structural hash over all declared fields.
    fn structural_hash(&self) -> u64;

    /// The attached extension slot, if any.
    fn custom_data(&self) -> Option<&CustomData>;

    /// Parse a record, reporting failure by reason instead of panicking.
    fn try_parse(record: &Record) -> Result<Self, ParseError> {
        Self::from_record(record)
    }

    /// Parse a record, then pass the constructed value through `hook`.
    ///
    /// The hook cannot recover a failed parse.
    fn try_parse_with(
        record: &Record,
        hook: Option<&dyn Fn(Self, &Record) -> Self>,
    ) -> Result<Self, ParseError> {
        let value = Self::from_record(record)?;
        Ok(match hook {
            Some(hook) => hook(value, record),
            None => value,
        })
    }

    /// Parse a record, panicking with a type-prefixed reason on failure.
    ///
    /// The sole panicking entry point; all other paths report through
    /// `Result`.
    fn parse(record: &Record) -> Self {
        match Self::from_record(record) {
            Ok(value) => value,
            Err(reason) => panic!("{}: {}", Self::NAME, reason),
        }
    }

    /// Like [`ValueType::parse`], with a post-construction hook.
    fn parse_with(record: &Record, hook: Option<&dyn Fn(Self, &Record) -> Self>) -> Self {
        match Self::try_parse_with(record, hook) {
            Ok(value) => value,
            Err(reason) => panic!("{}: {}", Self::NAME, reason),
        }
    }

    /// Render into a structured record.
    fn serialize(&self) -> Record {
        self.to_record()
    }

    /// Render, then pass the produced record through `hook`.
    fn serialize_with(&self, hook: Option<&dyn Fn(&Self, Record) -> Record>) -> Record {
        let record = self.to_record();
        match hook {
            Some(hook) => hook(self, record),
            None => record,
        }
    }

    /// Parse from a JSON value that must be an object.
    ///
    /// This is the element parser for nested fields and set elements; the
    /// reason string folds the nested failure into the parent field's
    /// reason.
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Object(record) => Self::from_record(record).map_err(|e| e.to_string()),
            _ => Err("expected an object".to_string()),
        }
    }
}
