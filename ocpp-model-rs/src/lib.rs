//! # OCPP Data Model
//!
//! Validated value types for the OCPP 2.0.1 message set, independent of
//! any transport. Each type parses from a structured record, validates
//! its domain constraints at construction, serializes back losslessly,
//! and compares structurally with a hash that ignores the order of
//! set-valued fields.
//!
//! ## Architecture
//!
//! ```text
//! Transport / dispatch (elsewhere)
//!       │ structured record (JSON object)
//!       ▼
//! ┌──────────────────────────────────────┐
//! │  ocpp-model                          │
//! │  ┌─────────┐  ┌─────────┐  ┌──────┐  │
//! │  │ extract │─►│ value   │◄─│ types│  │
//! │  │ + codec │  │ contract│  │      │  │
//! │  └─────────┘  └─────────┘  └──────┘  │
//! │     custom_data │ binary │ hash      │
//! └──────────────────────────────────────┘
//! ```
//!
//! Parsing never panics: [`ValueType::try_parse`] reports a reason naming
//! the offending field. [`ValueType::parse`] is the one panicking
//! convenience wrapper. Domain-constraint violations raised by a
//! constructor surface through the same `try_parse` reason channel.
//!
//! Two extension mechanisms coexist. Producers attach uninterpreted
//! vendor content through [`CustomData`]; callers of `try_parse_with` and
//! `serialize_with` intercept fully constructed values or fully produced
//! records without touching the types themselves.
//!
//! ## Usage
//!
//! ```
//! use ocpp_model::{BatteryData, ValueType};
//! use serde_json::json;
//!
//! let record = json!({
//!     "evseId": "1",
//!     "serialNumber": "SN-42",
//!     "soC": 55,
//!     "soH": 90,
//! });
//!
//! let battery = BatteryData::try_parse(record.as_object().unwrap()).unwrap();
//! assert_eq!(battery.evse_id().value(), 1);
//! assert_eq!(battery.so_c(), 55.0);
//! assert_eq!(battery.serialize().len(), 4);
//! ```

pub mod binary;
pub mod codec;
pub mod custom_data;
pub mod error;
pub mod extract;
pub mod hash;
pub mod ids;
pub mod record;
pub mod types;
pub mod value;

pub use binary::{BinaryFormat, ByteReader, ByteWriter};
pub use custom_data::{CustomData, CUSTOM_DATA_FIELD};
pub use error::{ConstructError, ParseError, SetError};
pub use ids::EvseId;
pub use record::Record;
pub use types::*;
pub use value::ValueType;
