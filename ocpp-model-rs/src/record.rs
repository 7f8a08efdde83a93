//! Structured records
//!
//! The backend-agnostic key/value tree used as parse input and serialize
//! output. Field order carries no meaning; the map is keyed by field name.

use serde_json::{Map, Value};

/// A structured record: one protocol object as a string-keyed field map.
pub type Record = Map<String, Value>;
