//! Concrete value types
//!
//! A representative slice of the OCPP 2.0.1 schema catalog. Every type
//! here is a mechanical application of the core contract; the full
//! catalog follows the same template.

pub mod charging;
pub mod common;
pub mod enums;
pub mod metering;
pub mod variable;

pub use charging::{
    ChargingProfile, ChargingSchedule, ChargingSchedulePeriod, ClearProfileResult,
};
pub use common::{AdditionalInfo, IdToken, StatusInfo};
pub use enums::{
    AttributeType, ChargingProfileKind, ChargingProfilePurpose, ChargingRateUnit,
    ClearProfileStatus, IdTokenType, Location, Measurand, MutabilityType, Phase, ReadingContext,
    RecurrencyKind,
};
pub use metering::{BatteryData, MeterValue, SampledValue, UnitOfMeasure};
pub use variable::VariableConfig;
