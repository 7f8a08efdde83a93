//! Extension slot ("custom data")
//!
//! A vendor-tagged bag of schema-free fields that producers may attach to
//! almost any value type. The core carries it through equality, hashing
//! and serialization without interpreting the content, so unknown protocol
//! dialects survive a round trip unchanged.

use crate::codec;
use crate::error::{ConstructError, ParseError};
use crate::extract;
use crate::hash::{hash_value, FieldHasher};
use crate::record::Record;
use crate::value::ValueType;
use serde_json::Value;

/// Field name under which extension slots travel.
pub const CUSTOM_DATA_FIELD: &str = "customData";

/// Vendor-tagged, uninterpreted extension content.
#[derive(Debug, Clone)]
pub struct CustomData {
    vendor_id: String,
    extra: Record,
    hash: u64,
}

impl CustomData {
    /// Maximum vendor identifier length.
    pub const MAX_VENDOR_ID: usize = 255;

    pub fn new(vendor_id: impl Into<String>, extra: Record) -> Result<Self, ConstructError> {
        let vendor_id = vendor_id.into();
        if vendor_id.is_empty() {
            return Err(ConstructError::empty("vendorId"));
        }
        if vendor_id.chars().count() > Self::MAX_VENDOR_ID {
            return Err(ConstructError::too_long("vendorId", Self::MAX_VENDOR_ID));
        }

        let hash = FieldHasher::new()
            .field(&vendor_id)
            .field(&hash_value(&Value::Object(extra.clone())))
            .finish();

        Ok(Self {
            vendor_id,
            extra,
            hash,
        })
    }

    /// Vendor namespace tag.
    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    /// Uninterpreted extension fields.
    pub fn extra(&self) -> &Record {
        &self.extra
    }

    /// Append a slot to a record under the standard key.
    pub(crate) fn emit(slot: &Option<CustomData>, record: &mut Record) {
        if let Some(data) = slot {
            record.insert(
                CUSTOM_DATA_FIELD.to_string(),
                Value::Object(data.to_record()),
            );
        }
    }

    /// Pull a slot out of a record, if one is present.
    pub(crate) fn extract(record: &Record) -> Result<Option<CustomData>, ParseError> {
        extract::optional(record, CUSTOM_DATA_FIELD, CustomData::from_value)
    }
}

impl ValueType for CustomData {
    const NAME: &'static str = "CustomData";

    fn to_record(&self) -> Record {
        let mut record = self.extra.clone();
        record.insert("vendorId".to_string(), Value::String(self.vendor_id.clone()));
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let vendor_id = extract::required(record, "vendorId", codec::non_empty_string)?;
        let mut extra = record.clone();
        extra.remove("vendorId");
        Ok(Self::new(vendor_id, extra)?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        None
    }
}

impl PartialEq for CustomData {
    fn eq(&self, other: &Self) -> bool {
        self.vendor_id == other.vendor_id && self.extra == other.extra
    }
}

impl Eq for CustomData {}

impl std::hash::Hash for CustomData {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_round_trip_preserves_unknown_content() {
        let input = record(json!({
            "vendorId": "com.example",
            "meshId": "M-7",
            "nested": {"a": [1, 2, 3]},
        }));

        let data = CustomData::try_parse(&input).unwrap();
        assert_eq!(data.vendor_id(), "com.example");
        assert_eq!(data.extra().len(), 2);

        let output = data.serialize();
        assert_eq!(output, input);
    }

    #[test]
    fn test_vendor_id_is_mandatory_and_non_empty() {
        let err = CustomData::try_parse(&record(json!({"x": 1}))).unwrap_err();
        assert!(err.to_string().contains("vendorId"));

        assert!(CustomData::new("", Record::new()).is_err());
    }

    #[test]
    fn test_equality_covers_extension_content() {
        let a = CustomData::try_parse(&record(json!({"vendorId": "v", "k": 1}))).unwrap();
        let b = CustomData::try_parse(&record(json!({"vendorId": "v", "k": 1}))).unwrap();
        let c = CustomData::try_parse(&record(json!({"vendorId": "v", "k": 2}))).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
        assert_ne!(a, c);
    }
}
