//! Round-trip properties
//!
//! For every valid value `v`: parsing `v.serialize()` succeeds and yields
//! a value equal to `v` with an equal hash. Fields equal to a documented
//! default stay omitted on the wire, and extension content survives
//! untouched.

use ocpp_model::{
    BatteryData, BinaryFormat, ChargingProfile, IdToken, MeterValue, SampledValue, UnitOfMeasure,
    ValueType,
};
use ocpp_model_proptests::*;
use proptest::prelude::*;

proptest! {
    /// parse(serialize(v)) == v for battery reports.
    #[test]
    fn battery_data_round_trips(battery in battery_data()) {
        let reparsed = BatteryData::try_parse(&battery.serialize()).unwrap();
        prop_assert_eq!(&reparsed, &battery);
        prop_assert_eq!(reparsed.structural_hash(), battery.structural_hash());
    }

    /// parse(serialize(v)) == v for meter values, including nested
    /// sampled values and units.
    #[test]
    fn meter_value_round_trips(meter in meter_value()) {
        let reparsed = MeterValue::try_parse(&meter.serialize()).unwrap();
        prop_assert_eq!(&reparsed, &meter);
        prop_assert_eq!(reparsed.structural_hash(), meter.structural_hash());
    }

    /// parse(serialize(v)) == v for charging profiles three levels deep.
    #[test]
    fn charging_profile_round_trips(profile in charging_profile()) {
        let reparsed = ChargingProfile::try_parse(&profile.serialize()).unwrap();
        prop_assert_eq!(&reparsed, &profile);
        prop_assert_eq!(reparsed.structural_hash(), profile.structural_hash());
    }

    /// parse(serialize(v)) == v for id tokens, and the binary codec
    /// agrees with the JSON codec on every value it can carry.
    #[test]
    fn id_token_round_trips_in_both_codecs(token in id_token()) {
        let via_json = IdToken::try_parse(&token.serialize()).unwrap();
        prop_assert_eq!(&via_json, &token);

        // The binary layout does not carry the extension slot, so compare
        // against a slot-free twin.
        let stripped = IdToken::new(
            via_json.id_token().to_string(),
            via_json.token_type(),
            via_json.additional_info().map(<[_]>::to_vec),
            None,
        )
        .unwrap();
        let bytes = stripped.to_binary(BinaryFormat::Compact);
        let via_binary = IdToken::try_parse_binary(&bytes, BinaryFormat::Compact).unwrap();
        prop_assert_eq!(&via_binary, &stripped);
        prop_assert_eq!(via_binary.structural_hash(), stripped.structural_hash());
    }

    /// A field set explicitly to its documented default serializes
    /// without the field and reparses as present-with-default.
    #[test]
    fn unit_of_measure_omits_defaults(unit in unit_of_measure()) {
        let record = unit.serialize();
        if unit.unit() == UnitOfMeasure::DEFAULT_UNIT {
            prop_assert!(!record.contains_key("unit"));
        }
        if unit.multiplier() == UnitOfMeasure::DEFAULT_MULTIPLIER {
            prop_assert!(!record.contains_key("multiplier"));
        }
        let reparsed = UnitOfMeasure::try_parse(&record).unwrap();
        prop_assert_eq!(&reparsed, &unit);
    }

    /// Defaulted sampled-value fields never appear on the wire.
    #[test]
    fn sampled_value_omits_defaults(sample in sampled_value()) {
        let record = sample.serialize();
        if sample.context() == Default::default() {
            prop_assert!(!record.contains_key("context"));
        }
        if sample.measurand() == Default::default() {
            prop_assert!(!record.contains_key("measurand"));
        }
        if sample.location() == Default::default() {
            prop_assert!(!record.contains_key("location"));
        }
        let reparsed = SampledValue::try_parse(&record).unwrap();
        prop_assert_eq!(&reparsed, &sample);
    }

    /// Unrecognized extension content passes through a round trip
    /// unchanged, field for field.
    #[test]
    fn extension_content_survives_round_trip(
        battery in battery_data(),
        custom in custom_data(),
    ) {
        let tagged = BatteryData::new(
            battery.evse_id(),
            battery.serial_number().to_string(),
            battery.so_c(),
            battery.so_h(),
            battery.production_date(),
            battery.vendor_info().map(str::to_string),
            Some(custom.clone()),
        )
        .unwrap();

        let reparsed = BatteryData::try_parse(&tagged.serialize()).unwrap();
        let slot = reparsed.custom_data().unwrap();
        prop_assert_eq!(slot, &custom);
        prop_assert_eq!(slot.vendor_id(), custom.vendor_id());
        prop_assert_eq!(slot.extra(), custom.extra());
    }
}
