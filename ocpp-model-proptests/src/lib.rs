//! Shared proptest strategies for ocpp-model value types
//!
//! Strategies only generate inputs the constructors accept; constraint
//! rejection has its own targeted tests in the main crate.

use chrono::{DateTime, Utc};
use ocpp_model::{
    AdditionalInfo, BatteryData, ChargingProfile, ChargingProfileKind, ChargingProfilePurpose,
    ChargingRateUnit, ChargingSchedule, ChargingSchedulePeriod, CustomData, EvseId, IdToken,
    IdTokenType, Location, Measurand, MeterValue, Phase, ReadingContext, Record, SampledValue,
    UnitOfMeasure,
};
use proptest::prelude::*;
use serde_json::Value;

// ============================================================================
// Scalars
// ============================================================================

/// Valid EVSE identifiers.
pub fn evse_id() -> impl Strategy<Value = EvseId> {
    (1u32..=9999).prop_map(|id| EvseId::new(id).unwrap())
}

/// Timestamps on whole seconds between 1970 and 2100.
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=4_102_444_800).prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap())
}

/// Percentages within 0..=100.
pub fn percent() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

pub fn id_token_type() -> impl Strategy<Value = IdTokenType> {
    prop_oneof![
        Just(IdTokenType::Central),
        Just(IdTokenType::EMaid),
        Just(IdTokenType::Iso14443),
        Just(IdTokenType::Iso15693),
        Just(IdTokenType::KeyCode),
        Just(IdTokenType::Local),
        Just(IdTokenType::MacAddress),
        Just(IdTokenType::NoAuthorization),
    ]
}

pub fn reading_context() -> impl Strategy<Value = ReadingContext> {
    prop_oneof![
        Just(ReadingContext::InterruptionBegin),
        Just(ReadingContext::InterruptionEnd),
        Just(ReadingContext::SampleClock),
        Just(ReadingContext::SamplePeriodic),
        Just(ReadingContext::TransactionBegin),
        Just(ReadingContext::TransactionEnd),
        Just(ReadingContext::Trigger),
    ]
}

pub fn measurand() -> impl Strategy<Value = Measurand> {
    prop_oneof![
        Just(Measurand::CurrentImport),
        Just(Measurand::CurrentExport),
        Just(Measurand::EnergyActiveImportRegister),
        Just(Measurand::EnergyActiveExportRegister),
        Just(Measurand::PowerActiveImport),
        Just(Measurand::PowerActiveExport),
        Just(Measurand::Voltage),
        Just(Measurand::SoC),
    ]
}

pub fn phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::L1),
        Just(Phase::L2),
        Just(Phase::L3),
        Just(Phase::N),
        Just(Phase::L1N),
    ]
}

pub fn location() -> impl Strategy<Value = Location> {
    prop_oneof![
        Just(Location::Body),
        Just(Location::Cable),
        Just(Location::Ev),
        Just(Location::Inlet),
        Just(Location::Outlet),
    ]
}

// ============================================================================
// Extension slots
// ============================================================================

/// Vendor-tagged extension content with a handful of unknown fields.
pub fn custom_data() -> impl Strategy<Value = CustomData> {
    let extra = proptest::collection::btree_map("[a-z]{1,8}", -1000i64..1000, 0..3);
    ("[a-z]{1,8}\\.[a-z]{1,8}", extra).prop_map(|(vendor, fields)| {
        let mut record = Record::new();
        for (key, value) in fields {
            record.insert(key, Value::from(value));
        }
        CustomData::new(vendor, record).unwrap()
    })
}

/// An optional extension slot, absent most of the time.
pub fn maybe_custom_data() -> impl Strategy<Value = Option<CustomData>> {
    proptest::option::weighted(0.3, custom_data())
}

// ============================================================================
// Identification
// ============================================================================

pub fn additional_info() -> impl Strategy<Value = AdditionalInfo> {
    ("[A-Z0-9]{1,12}", "[a-z]{1,12}")
        .prop_map(|(token, info_type)| AdditionalInfo::new(token, info_type, None).unwrap())
}

pub fn id_token() -> impl Strategy<Value = IdToken> {
    (
        "[A-F0-9]{0,20}",
        id_token_type(),
        proptest::option::of(proptest::collection::vec(additional_info(), 1..3)),
        maybe_custom_data(),
    )
        .prop_map(|(token, token_type, infos, custom)| {
            IdToken::new(token, token_type, infos, custom).unwrap()
        })
}

// ============================================================================
// Metering
// ============================================================================

pub fn unit_of_measure() -> impl Strategy<Value = UnitOfMeasure> {
    (
        proptest::option::of(prop_oneof![
            Just("Wh".to_string()),
            Just("kWh".to_string()),
            Just("A".to_string()),
            Just("V".to_string()),
        ]),
        proptest::option::of(-3i32..=6),
    )
        .prop_map(|(unit, multiplier)| UnitOfMeasure::new(unit, multiplier, None).unwrap())
}

pub fn sampled_value() -> impl Strategy<Value = SampledValue> {
    (
        -1000.0f64..1_000_000.0,
        proptest::option::of(reading_context()),
        proptest::option::of(measurand()),
        proptest::option::of(phase()),
        proptest::option::of(location()),
        proptest::option::of(unit_of_measure()),
        maybe_custom_data(),
    )
        .prop_map(|(value, context, measurand, phase, location, unit, custom)| {
            SampledValue::new(value, context, measurand, phase, location, unit, custom).unwrap()
        })
}

pub fn meter_value() -> impl Strategy<Value = MeterValue> {
    (
        timestamp(),
        proptest::collection::vec(sampled_value(), 1..4),
        maybe_custom_data(),
    )
        .prop_map(|(ts, samples, custom)| MeterValue::new(ts, samples, custom).unwrap())
}

pub fn battery_data() -> impl Strategy<Value = BatteryData> {
    (
        evse_id(),
        "[A-Z0-9][A-Z0-9-]{0,19}",
        percent(),
        percent(),
        proptest::option::of(timestamp()),
        proptest::option::of("[ -~]{0,40}"),
        maybe_custom_data(),
    )
        .prop_map(|(evse, serial, so_c, so_h, produced, vendor, custom)| {
            BatteryData::new(evse, serial, so_c, so_h, produced, vendor, custom).unwrap()
        })
}

// ============================================================================
// Charging profiles
// ============================================================================

pub fn schedule_period() -> impl Strategy<Value = ChargingSchedulePeriod> {
    (0i32..=86_400, 0.0f64..50_000.0, proptest::option::of(1i32..=3))
        .prop_map(|(start, limit, phases)| {
            ChargingSchedulePeriod::new(start, limit, phases, None, None).unwrap()
        })
}

pub fn charging_schedule() -> impl Strategy<Value = ChargingSchedule> {
    (
        1i32..=1000,
        prop_oneof![Just(ChargingRateUnit::W), Just(ChargingRateUnit::A)],
        proptest::collection::vec(schedule_period(), 1..4),
        proptest::option::of(timestamp()),
        proptest::option::of(0i64..=86_400),
        maybe_custom_data(),
    )
        .prop_map(|(id, unit, periods, start, duration, custom)| {
            ChargingSchedule::new(
                id,
                unit,
                periods,
                start,
                duration.map(chrono::Duration::seconds),
                None,
                custom,
            )
            .unwrap()
        })
}

pub fn charging_profile() -> impl Strategy<Value = ChargingProfile> {
    (
        1i32..=1000,
        0i32..=10,
        prop_oneof![
            Just(ChargingProfilePurpose::ChargingStationMaxProfile),
            Just(ChargingProfilePurpose::TxDefaultProfile),
        ],
        prop_oneof![
            Just(ChargingProfileKind::Absolute),
            Just(ChargingProfileKind::Relative),
        ],
        proptest::collection::vec(charging_schedule(), 1..3),
        maybe_custom_data(),
    )
        .prop_map(|(id, stack, purpose, kind, schedules, custom)| {
            ChargingProfile::new(
                id, stack, purpose, kind, schedules, None, None, None, None, custom,
            )
            .unwrap()
        })
}
