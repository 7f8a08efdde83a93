//! Metering and battery report types

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::codec;
use crate::custom_data::CustomData;
use crate::error::{ConstructError, ParseError};
use crate::extract;
use crate::hash::{dedup, set_eq, FieldHasher};
use crate::ids::EvseId;
use crate::record::Record;
use crate::types::enums::{Location, Measurand, Phase, ReadingContext};
use crate::value::ValueType;

// ============================================================================
// UnitOfMeasure
// ============================================================================

/// Unit of a sampled value, with a power-of-ten multiplier.
///
/// Both fields have documented defaults: the base unit `Wh` and a
/// multiplier of 0. A field equal to its default is omitted when
/// serialized and restored when absent on parse.
#[derive(Debug, Clone)]
pub struct UnitOfMeasure {
    unit: String,
    multiplier: i32,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl UnitOfMeasure {
    /// Default unit.
    pub const DEFAULT_UNIT: &'static str = "Wh";
    /// Default multiplier (the base unit itself).
    pub const DEFAULT_MULTIPLIER: i32 = 0;
    /// Maximum unit label length.
    pub const MAX_UNIT: usize = 20;

    pub fn new(
        unit: Option<String>,
        multiplier: Option<i32>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let unit = unit.unwrap_or_else(|| Self::DEFAULT_UNIT.to_string());
        if unit.is_empty() {
            return Err(ConstructError::empty("unit"));
        }
        if unit.chars().count() > Self::MAX_UNIT {
            return Err(ConstructError::too_long("unit", Self::MAX_UNIT));
        }
        let multiplier = multiplier.unwrap_or(Self::DEFAULT_MULTIPLIER);

        let hash = FieldHasher::new()
            .field(&unit)
            .field(&multiplier)
            .field(&custom_data)
            .finish();

        Ok(Self {
            unit,
            multiplier,
            custom_data,
            hash,
        })
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn multiplier(&self) -> i32 {
        self.multiplier
    }
}

impl ValueType for UnitOfMeasure {
    const NAME: &'static str = "UnitOfMeasure";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        if self.unit != Self::DEFAULT_UNIT {
            record.insert("unit".to_string(), Value::String(self.unit.clone()));
        }
        if self.multiplier != Self::DEFAULT_MULTIPLIER {
            record.insert("multiplier".to_string(), Value::from(self.multiplier));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let unit = extract::optional_or(
            record,
            "unit",
            Self::DEFAULT_UNIT.to_string(),
            codec::non_empty_string,
        )?;
        let multiplier =
            extract::optional_or(record, "multiplier", Self::DEFAULT_MULTIPLIER, codec::int32)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(Some(unit), Some(multiplier), custom_data)?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for UnitOfMeasure {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && self.multiplier == other.multiplier
            && self.custom_data == other.custom_data
    }
}

impl Eq for UnitOfMeasure {}

impl std::hash::Hash for UnitOfMeasure {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// SampledValue
// ============================================================================

/// One measurement inside a meter value.
#[derive(Debug, Clone)]
pub struct SampledValue {
    value: f64,
    context: ReadingContext,
    measurand: Measurand,
    phase: Option<Phase>,
    location: Location,
    unit_of_measure: Option<UnitOfMeasure>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl SampledValue {
    /// `context`, `measurand` and `location` fall back to their documented
    /// defaults when not given.
    pub fn new(
        value: f64,
        context: Option<ReadingContext>,
        measurand: Option<Measurand>,
        phase: Option<Phase>,
        location: Option<Location>,
        unit_of_measure: Option<UnitOfMeasure>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        if !value.is_finite() {
            return Err(ConstructError::invalid("value", "must be a finite number"));
        }
        let context = context.unwrap_or_default();
        let measurand = measurand.unwrap_or_default();
        let location = location.unwrap_or_default();

        let hash = FieldHasher::new()
            .decimal(value)
            .field(&context)
            .field(&measurand)
            .field(&phase)
            .field(&location)
            .field(&unit_of_measure)
            .field(&custom_data)
            .finish();

        Ok(Self {
            value,
            context,
            measurand,
            phase,
            location,
            unit_of_measure,
            custom_data,
            hash,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn context(&self) -> ReadingContext {
        self.context
    }

    pub fn measurand(&self) -> Measurand {
        self.measurand
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn unit_of_measure(&self) -> Option<&UnitOfMeasure> {
        self.unit_of_measure.as_ref()
    }
}

impl ValueType for SampledValue {
    const NAME: &'static str = "SampledValue";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("value".to_string(), Value::from(self.value));
        if self.context != ReadingContext::default() {
            record.insert(
                "context".to_string(),
                Value::String(self.context.as_str().to_string()),
            );
        }
        if self.measurand != Measurand::default() {
            record.insert(
                "measurand".to_string(),
                Value::String(self.measurand.as_str().to_string()),
            );
        }
        if let Some(phase) = self.phase {
            record.insert(
                "phase".to_string(),
                Value::String(phase.as_str().to_string()),
            );
        }
        if self.location != Location::default() {
            record.insert(
                "location".to_string(),
                Value::String(self.location.as_str().to_string()),
            );
        }
        if let Some(unit) = &self.unit_of_measure {
            record.insert("unitOfMeasure".to_string(), Value::Object(unit.to_record()));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let value = extract::required(record, "value", codec::decimal)?;
        let context = extract::optional_or(
            record,
            "context",
            ReadingContext::default(),
            codec::token::<ReadingContext>,
        )?;
        let measurand = extract::optional_or(
            record,
            "measurand",
            Measurand::default(),
            codec::token::<Measurand>,
        )?;
        let phase = extract::optional(record, "phase", codec::token::<Phase>)?;
        let location = extract::optional_or(
            record,
            "location",
            Location::default(),
            codec::token::<Location>,
        )?;
        let unit_of_measure = extract::optional(record, "unitOfMeasure", UnitOfMeasure::from_value)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(
            value,
            Some(context),
            Some(measurand),
            phase,
            Some(location),
            unit_of_measure,
            custom_data,
        )?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for SampledValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.context == other.context
            && self.measurand == other.measurand
            && self.phase == other.phase
            && self.location == other.location
            && self.unit_of_measure == other.unit_of_measure
            && self.custom_data == other.custom_data
    }
}

impl Eq for SampledValue {}

impl std::hash::Hash for SampledValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// MeterValue
// ============================================================================

/// A timestamped collection of sampled values.
#[derive(Debug, Clone)]
pub struct MeterValue {
    timestamp: DateTime<Utc>,
    sampled_value: Vec<SampledValue>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl MeterValue {
    /// `sampled_value` is a set: duplicates collapse, at least one element
    /// must remain.
    pub fn new(
        timestamp: DateTime<Utc>,
        sampled_value: Vec<SampledValue>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let sampled_value = dedup(sampled_value);
        if sampled_value.is_empty() {
            return Err(ConstructError::empty("sampledValue"));
        }

        let hash = FieldHasher::new()
            .field(&timestamp)
            .unordered(&sampled_value)
            .field(&custom_data)
            .finish();

        Ok(Self {
            timestamp,
            sampled_value,
            custom_data,
            hash,
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn sampled_value(&self) -> &[SampledValue] {
        &self.sampled_value
    }

    /// Serialize with hooks for this record and for each nested sampled
    /// value. Children are fully serialized before either hook runs.
    pub fn serialize_with_hooks(
        &self,
        meter_hook: Option<&dyn Fn(&MeterValue, Record) -> Record>,
        sampled_hook: Option<&dyn Fn(&SampledValue, Record) -> Record>,
    ) -> Record {
        let mut record = Record::new();
        record.insert("timestamp".to_string(), codec::render_timestamp(&self.timestamp));
        let rendered = self
            .sampled_value
            .iter()
            .map(|sample| Value::Object(sample.serialize_with(sampled_hook)))
            .collect();
        record.insert("sampledValue".to_string(), Value::Array(rendered));
        CustomData::emit(&self.custom_data, &mut record);
        match meter_hook {
            Some(hook) => hook(self, record),
            None => record,
        }
    }
}

impl ValueType for MeterValue {
    const NAME: &'static str = "MeterValue";

    fn to_record(&self) -> Record {
        self.serialize_with_hooks(None, None)
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let timestamp = extract::required(record, "timestamp", codec::timestamp)?;
        let sampled_value =
            extract::required_set(record, "sampledValue", SampledValue::from_value)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(timestamp, sampled_value, custom_data)?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for MeterValue {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && set_eq(&self.sampled_value, &other.sampled_value)
            && self.custom_data == other.custom_data
    }
}

impl Eq for MeterValue {}

impl std::hash::Hash for MeterValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// BatteryData
// ============================================================================

/// Battery state report for a swappable battery at an EVSE.
#[derive(Debug, Clone)]
pub struct BatteryData {
    evse_id: EvseId,
    serial_number: String,
    so_c: f64,
    so_h: f64,
    production_date: Option<DateTime<Utc>>,
    vendor_info: Option<String>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl BatteryData {
    /// Maximum serial number length.
    pub const MAX_SERIAL_NUMBER: usize = 50;
    /// Maximum vendor info length.
    pub const MAX_VENDOR_INFO: usize = 500;

    /// `so_c` and `so_h` are percentages and must lie within 0..=100.
    pub fn new(
        evse_id: EvseId,
        serial_number: impl Into<String>,
        so_c: f64,
        so_h: f64,
        production_date: Option<DateTime<Utc>>,
        vendor_info: Option<String>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let serial_number = serial_number.into();
        if serial_number.is_empty() {
            return Err(ConstructError::empty("serialNumber"));
        }
        if serial_number.chars().count() > Self::MAX_SERIAL_NUMBER {
            return Err(ConstructError::too_long(
                "serialNumber",
                Self::MAX_SERIAL_NUMBER,
            ));
        }
        if !(0.0..=100.0).contains(&so_c) {
            return Err(ConstructError::out_of_range(
                "soC",
                "must be a percentage between 0 and 100",
            ));
        }
        if !(0.0..=100.0).contains(&so_h) {
            return Err(ConstructError::out_of_range(
                "soH",
                "must be a percentage between 0 and 100",
            ));
        }
        if let Some(info) = &vendor_info {
            if info.chars().count() > Self::MAX_VENDOR_INFO {
                return Err(ConstructError::too_long("vendorInfo", Self::MAX_VENDOR_INFO));
            }
        }

        let hash = FieldHasher::new()
            .field(&evse_id)
            .field(&serial_number)
            .decimal(so_c)
            .decimal(so_h)
            .field(&production_date)
            .field(&vendor_info)
            .field(&custom_data)
            .finish();

        Ok(Self {
            evse_id,
            serial_number,
            so_c,
            so_h,
            production_date,
            vendor_info,
            custom_data,
            hash,
        })
    }

    pub fn evse_id(&self) -> EvseId {
        self.evse_id
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// State of charge, percent.
    pub fn so_c(&self) -> f64 {
        self.so_c
    }

    /// State of health, percent.
    pub fn so_h(&self) -> f64 {
        self.so_h
    }

    pub fn production_date(&self) -> Option<DateTime<Utc>> {
        self.production_date
    }

    pub fn vendor_info(&self) -> Option<&str> {
        self.vendor_info.as_deref()
    }
}

impl ValueType for BatteryData {
    const NAME: &'static str = "BatteryData";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "evseId".to_string(),
            Value::String(self.evse_id.to_string()),
        );
        record.insert(
            "serialNumber".to_string(),
            Value::String(self.serial_number.clone()),
        );
        record.insert("soC".to_string(), Value::from(self.so_c));
        record.insert("soH".to_string(), Value::from(self.so_h));
        if let Some(date) = &self.production_date {
            record.insert("productionDate".to_string(), codec::render_timestamp(date));
        }
        if let Some(info) = &self.vendor_info {
            record.insert("vendorInfo".to_string(), Value::String(info.clone()));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let evse_id = extract::required(record, "evseId", codec::token::<EvseId>)?;
        let serial_number = extract::required(record, "serialNumber", codec::non_empty_string)?;
        let so_c = extract::required(record, "soC", codec::decimal)?;
        let so_h = extract::required(record, "soH", codec::decimal)?;
        let production_date = extract::optional(record, "productionDate", codec::timestamp)?;
        let vendor_info = extract::optional(record, "vendorInfo", codec::string)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(
            evse_id,
            serial_number,
            so_c,
            so_h,
            production_date,
            vendor_info,
            custom_data,
        )?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for BatteryData {
    fn eq(&self, other: &Self) -> bool {
        self.evse_id == other.evse_id
            && self.serial_number == other.serial_number
            && self.so_c == other.so_c
            && self.so_h == other.so_h
            && self.production_date == other.production_date
            && self.vendor_info == other.vendor_info
            && self.custom_data == other.custom_data
    }
}

impl Eq for BatteryData {}

impl std::hash::Hash for BatteryData {
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
    fn test_battery_data_parses_minimal_record() {
        let rec = record(json!({
            "evseId": "1",
            "serialNumber": "SN-42",
            "soC": 55,
            "soH": 90,
        }));

        let battery = BatteryData::try_parse(&rec).unwrap();
        assert_eq!(battery.evse_id().value(), 1);
        assert_eq!(battery.serial_number(), "SN-42");
        assert_eq!(battery.so_c(), 55.0);
        assert_eq!(battery.so_h(), 90.0);
        assert_eq!(battery.production_date(), None);
        assert_eq!(battery.vendor_info(), None);
    }

    #[test]
    fn test_battery_data_serializes_only_present_fields() {
        let rec = record(json!({
            "evseId": "1",
            "serialNumber": "SN-42",
            "soC": 55,
            "soH": 90,
        }));
        let battery = BatteryData::try_parse(&rec).unwrap();

        let out = battery.serialize();
        assert_eq!(out.len(), 4);
        assert!(!out.contains_key("productionDate"));
        assert!(!out.contains_key("vendorInfo"));
        assert!(!out.contains_key("customData"));
        assert_eq!(BatteryData::try_parse(&out).unwrap(), battery);
    }

    #[test]
    fn test_battery_data_missing_mandatory_field_names_it() {
        let rec = record(json!({
            "evseId": "1",
            "serialNumber": "SN-42",
            "soC": 55,
        }));
        let err = BatteryData::try_parse(&rec).unwrap_err();
        assert!(err.to_string().contains("soH"));
    }

    #[test]
    fn test_battery_data_rejects_out_of_range_percentage() {
        let evse = EvseId::new(1).unwrap();
        let err = BatteryData::new(evse, "SN", 101.0, 90.0, None, None, None).unwrap_err();
        assert!(err.to_string().contains("soC"));

        let rec = record(json!({
            "evseId": "1",
            "serialNumber": "SN-42",
            "soC": 55,
            "soH": -3,
        }));
        let err = BatteryData::try_parse(&rec).unwrap_err();
        assert!(err.to_string().contains("soH"));
    }

    #[test]
    fn test_unit_of_measure_default_omission_round_trip() {
        let explicit = UnitOfMeasure::new(Some("Wh".to_string()), Some(0), None).unwrap();
        let implicit = UnitOfMeasure::new(None, None, None).unwrap();
        assert_eq!(explicit, implicit);

        // Fields equal to the documented default do not serialize.
        let out = explicit.serialize();
        assert!(!out.contains_key("unit"));
        assert!(!out.contains_key("multiplier"));
        assert_eq!(UnitOfMeasure::try_parse(&out).unwrap(), explicit);

        let kwh = UnitOfMeasure::new(Some("Wh".to_string()), Some(3), None).unwrap();
        let out = kwh.serialize();
        assert!(!out.contains_key("unit"));
        assert_eq!(out.get("multiplier"), Some(&json!(3)));
    }

    #[test]
    fn test_sampled_value_defaults_apply_on_parse() {
        let rec = record(json!({"value": 21.5}));
        let sample = SampledValue::try_parse(&rec).unwrap();
        assert_eq!(sample.context(), ReadingContext::SamplePeriodic);
        assert_eq!(sample.measurand(), Measurand::EnergyActiveImportRegister);
        assert_eq!(sample.location(), Location::Outlet);

        let explicit = SampledValue::new(
            21.5,
            Some(ReadingContext::SamplePeriodic),
            Some(Measurand::EnergyActiveImportRegister),
            None,
            Some(Location::Outlet),
            None,
            None,
        )
        .unwrap();
        assert_eq!(sample, explicit);
        assert_eq!(explicit.serialize().len(), 1);
    }

    #[test]
    fn test_meter_value_set_semantics() {
        let ts = codec::timestamp(&json!("2026-01-20T12:00:00Z")).unwrap();
        let a = SampledValue::new(1.0, None, None, None, None, None, None).unwrap();
        let b = SampledValue::new(2.0, None, None, None, None, None, None).unwrap();

        let left = MeterValue::new(ts, vec![a.clone(), b.clone()], None).unwrap();
        let right = MeterValue::new(ts, vec![b.clone(), a.clone(), b], None).unwrap();

        assert_eq!(left, right);
        assert_eq!(left.structural_hash(), right.structural_hash());
        assert_eq!(left.sampled_value().len(), 2);
    }

    #[test]
    fn test_meter_value_requires_a_sample() {
        let ts = codec::timestamp(&json!("2026-01-20T12:00:00Z")).unwrap();
        let err = MeterValue::new(ts, vec![], None).unwrap_err();
        assert!(err.to_string().contains("sampledValue"));
    }

    #[test]
    fn test_meter_value_nested_hooks_compose() {
        let ts = codec::timestamp(&json!("2026-01-20T12:00:00Z")).unwrap();
        let sample = SampledValue::new(7.0, None, None, None, None, None, None).unwrap();
        let meter = MeterValue::new(ts, vec![sample], None).unwrap();

        let out = meter.serialize_with_hooks(
            Some(&|_m: &MeterValue, mut rec: Record| {
                rec.insert("sealed".to_string(), json!(true));
                rec
            }),
            Some(&|_s: &SampledValue, mut rec: Record| {
                rec.insert("sampleTag".to_string(), json!("x"));
                rec
            }),
        );

        // The parent hook saw fully serialized children.
        assert_eq!(out.get("sealed"), Some(&json!(true)));
        let samples = out.get("sampledValue").unwrap().as_array().unwrap();
        assert_eq!(samples[0].get("sampleTag"), Some(&json!("x")));
    }
}
