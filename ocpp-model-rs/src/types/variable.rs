//! Live device-model variable configuration

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::codec;
use crate::custom_data::CustomData;
use crate::error::{ConstructError, ParseError, SetError};
use crate::extract;
use crate::hash::FieldHasher;
use crate::record::Record;
use crate::types::enums::{AttributeType, MutabilityType};
use crate::value::ValueType;

/// A device-model variable whose current value can change at runtime.
///
/// This is the one intentionally mutable type in the model. Only the
/// current value moves, through [`VariableConfig::set`], which requires
/// `&mut self`; everything else stays fixed after construction. Concurrent
/// setters on a shared instance must be serialized by the caller, the type
/// holds no lock of its own.
///
/// `last_updated` is runtime bookkeeping: it tracks the latest successful
/// `set` and takes no part in equality, hashing or serialization.
#[derive(Debug, Clone)]
pub struct VariableConfig {
    name: String,
    instance: Option<String>,
    attribute_type: AttributeType,
    mutability: MutabilityType,
    value: Option<String>,
    last_updated: DateTime<Utc>,
    custom_data: Option<CustomData>,
}

impl VariableConfig {
    /// Maximum name and instance length.
    pub const MAX_NAME: usize = 50;
    /// Maximum value length.
    pub const MAX_VALUE: usize = 1000;

    /// `attribute_type` and `mutability` fall back to their documented
    /// defaults when not given.
    pub fn new(
        name: impl Into<String>,
        instance: Option<String>,
        attribute_type: Option<AttributeType>,
        mutability: Option<MutabilityType>,
        value: Option<String>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructError::empty("name"));
        }
        if name.chars().count() > Self::MAX_NAME {
            return Err(ConstructError::too_long("name", Self::MAX_NAME));
        }
        if let Some(instance) = &instance {
            if instance.chars().count() > Self::MAX_NAME {
                return Err(ConstructError::too_long("instance", Self::MAX_NAME));
            }
        }
        if let Some(value) = &value {
            if value.chars().count() > Self::MAX_VALUE {
                return Err(ConstructError::too_long("value", Self::MAX_VALUE));
            }
        }

        Ok(Self {
            name,
            instance,
            attribute_type: attribute_type.unwrap_or_default(),
            mutability: mutability.unwrap_or_default(),
            value,
            last_updated: Utc::now(),
            custom_data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    pub fn mutability(&self) -> MutabilityType {
        self.mutability
    }

    /// Current value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// When the value last changed.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Replace the current value, returning the previous one.
    ///
    /// With `expected` given, the update only applies while the present
    /// value still matches (compare-and-set).
    pub fn set(
        &mut self,
        new_value: impl Into<String>,
        expected: Option<&str>,
    ) -> Result<Option<String>, SetError> {
        let new_value = new_value.into();
        if self.mutability == MutabilityType::ReadOnly {
            return Err(SetError::ReadOnly(self.name.clone()));
        }
        if new_value.chars().count() > Self::MAX_VALUE {
            return Err(SetError::Rejected(format!(
                "value exceeds {} characters",
                Self::MAX_VALUE
            )));
        }
        if let Some(expected) = expected {
            if self.value.as_deref() != Some(expected) {
                return Err(SetError::StaleValue {
                    expected: Some(expected.to_string()),
                    found: self.value.clone(),
                });
            }
        }

        let previous = self.value.replace(new_value);
        self.last_updated = Utc::now();
        Ok(previous)
    }
}

impl ValueType for VariableConfig {
    const NAME: &'static str = "VariableConfig";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".to_string(), Value::String(self.name.clone()));
        if let Some(instance) = &self.instance {
            record.insert("instance".to_string(), Value::String(instance.clone()));
        }
        if self.attribute_type != AttributeType::default() {
            record.insert(
                "attributeType".to_string(),
                Value::String(self.attribute_type.as_str().to_string()),
            );
        }
        if self.mutability != MutabilityType::default() {
            record.insert(
                "mutability".to_string(),
                Value::String(self.mutability.as_str().to_string()),
            );
        }
        if let Some(value) = &self.value {
            record.insert("value".to_string(), Value::String(value.clone()));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let name = extract::required(record, "name", codec::non_empty_string)?;
        let instance = extract::optional(record, "instance", codec::string)?;
        let attribute_type = extract::optional_or(
            record,
            "attributeType",
            AttributeType::default(),
            codec::token::<AttributeType>,
        )?;
        let mutability = extract::optional_or(
            record,
            "mutability",
            MutabilityType::default(),
            codec::token::<MutabilityType>,
        )?;
        let value = extract::optional(record, "value", codec::string)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(
            name,
            instance,
            Some(attribute_type),
            Some(mutability),
            value,
            custom_data,
        )?)
    }

    /// Computed on demand; the current value is mutable, so the hash
    /// cannot be precomputed at construction.
    fn structural_hash(&self) -> u64 {
        FieldHasher::new()
            .field(&self.name)
            .field(&self.instance)
            .field(&self.attribute_type)
            .field(&self.mutability)
            .field(&self.value)
            .field(&self.custom_data)
            .finish()
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for VariableConfig {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.instance == other.instance
            && self.attribute_type == other.attribute_type
            && self.mutability == other.mutability
            && self.value == other.value
            && self.custom_data == other.custom_data
    }
}

impl Eq for VariableConfig {}

impl std::hash::Hash for VariableConfig {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mutability: MutabilityType, value: Option<&str>) -> VariableConfig {
        VariableConfig::new(
            "HeartbeatInterval",
            None,
            None,
            Some(mutability),
            value.map(str::to_string),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut var = config(MutabilityType::ReadWrite, Some("300"));
        let previous = var.set("600", None).unwrap();
        assert_eq!(previous.as_deref(), Some("300"));
        assert_eq!(var.value(), Some("600"));
    }

    #[test]
    fn test_set_rejects_read_only() {
        let mut var = config(MutabilityType::ReadOnly, Some("fixed"));
        let err = var.set("other", None).unwrap_err();
        assert!(matches!(err, SetError::ReadOnly(_)));
        assert_eq!(var.value(), Some("fixed"));
    }

    #[test]
    fn test_compare_and_set_detects_stale_expectation() {
        let mut var = config(MutabilityType::ReadWrite, Some("300"));
        let err = var.set("600", Some("900")).unwrap_err();
        assert!(matches!(err, SetError::StaleValue { .. }));
        assert_eq!(var.value(), Some("300"));

        var.set("600", Some("300")).unwrap();
        assert_eq!(var.value(), Some("600"));
    }

    #[test]
    fn test_set_refreshes_last_updated() {
        let mut var = config(MutabilityType::ReadWrite, None);
        let before = var.last_updated();
        var.set("1", None).unwrap();
        assert!(var.last_updated() >= before);
    }

    #[test]
    fn test_round_trip_ignores_bookkeeping() {
        let var = config(MutabilityType::ReadOnly, Some("300"));
        let reparsed = VariableConfig::try_parse(&var.serialize()).unwrap();
        // Equal even though the two instances were created at different
        // times.
        assert_eq!(reparsed, var);
        assert_eq!(reparsed.structural_hash(), var.structural_hash());
    }

    #[test]
    fn test_defaults_omitted_when_serialized() {
        let var = VariableConfig::new("TxUpdatedInterval", None, None, None, None, None).unwrap();
        let record = var.serialize();
        assert!(!record.contains_key("attributeType"));
        assert!(!record.contains_key("mutability"));
        assert_eq!(record.len(), 1);
    }
}
