//! Equality and hashing properties
//!
//! Equality ignores the order of set-valued fields, hashes agree with
//! equality, and removing any mandatory field makes the parse fail with a
//! reason naming that field.

use ocpp_model::{BatteryData, IdToken, MeterValue, ValueType};
use ocpp_model_proptests::*;
use proptest::prelude::*;

proptest! {
    /// Permuting a meter value's samples changes neither equality nor the
    /// hash.
    #[test]
    fn meter_value_sample_order_is_irrelevant(meter in meter_value()) {
        let mut reversed = meter.sampled_value().to_vec();
        reversed.reverse();
        let permuted = MeterValue::new(
            meter.timestamp(),
            reversed,
            meter.custom_data().cloned(),
        )
        .unwrap();

        prop_assert_eq!(&permuted, &meter);
        prop_assert_eq!(permuted.structural_hash(), meter.structural_hash());
    }

    /// Permuting an id token's additional info changes neither equality
    /// nor the hash.
    #[test]
    fn id_token_info_order_is_irrelevant(token in id_token()) {
        let mut reversed = token.additional_info().map(<[_]>::to_vec);
        if let Some(infos) = &mut reversed {
            infos.reverse();
        }
        let permuted = IdToken::new(
            token.id_token().to_string(),
            token.token_type(),
            reversed,
            token.custom_data().cloned(),
        )
        .unwrap();

        prop_assert_eq!(&permuted, &token);
        prop_assert_eq!(permuted.structural_hash(), token.structural_hash());
    }

    /// Values rebuilt from the same fields are equal and hash equal;
    /// values differing in one field are unequal.
    #[test]
    fn equality_and_hash_agree(battery in battery_data()) {
        let twin = BatteryData::new(
            battery.evse_id(),
            battery.serial_number().to_string(),
            battery.so_c(),
            battery.so_h(),
            battery.production_date(),
            battery.vendor_info().map(str::to_string),
            battery.custom_data().cloned(),
        )
        .unwrap();
        prop_assert_eq!(&twin, &battery);
        prop_assert_eq!(twin.structural_hash(), battery.structural_hash());

        let nudged_soh = (battery.so_h() + 1.0).min(100.0);
        prop_assume!(nudged_soh != battery.so_h());
        let other = BatteryData::new(
            battery.evse_id(),
            battery.serial_number().to_string(),
            battery.so_c(),
            nudged_soh,
            battery.production_date(),
            battery.vendor_info().map(str::to_string),
            battery.custom_data().cloned(),
        )
        .unwrap();
        prop_assert_ne!(&other, &battery);
    }

    /// Instances that differ only in extension content are unequal.
    #[test]
    fn extension_slot_participates_in_equality(
        battery in battery_data(),
        custom in custom_data(),
    ) {
        prop_assume!(battery.custom_data() != Some(&custom));
        let tagged = BatteryData::new(
            battery.evse_id(),
            battery.serial_number().to_string(),
            battery.so_c(),
            battery.so_h(),
            battery.production_date(),
            battery.vendor_info().map(str::to_string),
            Some(custom),
        )
        .unwrap();
        prop_assert_ne!(&tagged, &battery);
    }

    /// Dropping any one mandatory field fails the parse with a reason
    /// naming that field.
    #[test]
    fn missing_mandatory_field_is_rejected(
        battery in battery_data(),
        index in 0usize..4,
    ) {
        let mandatory = ["evseId", "serialNumber", "soC", "soH"];
        let field = mandatory[index];

        let mut record = battery.serialize();
        record.remove(field);

        let err = BatteryData::try_parse(&record).unwrap_err();
        prop_assert!(err.to_string().contains(field));
    }
}
