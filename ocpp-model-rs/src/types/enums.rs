//! Enumerated protocol tokens
//!
//! Each enumeration maps to and from its wire token. Unknown tokens are a
//! parse reason naming the enumeration; enumerations with a documented
//! default carry it as `Default`.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identification
// ============================================================================

/// Authorization token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdTokenType {
    Central,
    EMaid,
    Iso14443,
    Iso15693,
    KeyCode,
    Local,
    MacAddress,
    NoAuthorization,
}

impl IdTokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            IdTokenType::Central => "Central",
            IdTokenType::EMaid => "eMAID",
            IdTokenType::Iso14443 => "ISO14443",
            IdTokenType::Iso15693 => "ISO15693",
            IdTokenType::KeyCode => "KeyCode",
            IdTokenType::Local => "Local",
            IdTokenType::MacAddress => "MacAddress",
            IdTokenType::NoAuthorization => "NoAuthorization",
        }
    }
}

impl fmt::Display for IdTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdTokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Central" => Ok(IdTokenType::Central),
            "eMAID" => Ok(IdTokenType::EMaid),
            "ISO14443" => Ok(IdTokenType::Iso14443),
            "ISO15693" => Ok(IdTokenType::Iso15693),
            "KeyCode" => Ok(IdTokenType::KeyCode),
            "Local" => Ok(IdTokenType::Local),
            "MacAddress" => Ok(IdTokenType::MacAddress),
            "NoAuthorization" => Ok(IdTokenType::NoAuthorization),
            _ => Err(format!("unknown id token type '{s}'")),
        }
    }
}

// ============================================================================
// Metering
// ============================================================================

/// Measured quantity of a sampled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Measurand {
    CurrentImport,
    CurrentExport,
    #[default]
    EnergyActiveImportRegister,
    EnergyActiveExportRegister,
    PowerActiveImport,
    PowerActiveExport,
    Voltage,
    SoC,
}

impl Measurand {
    pub fn as_str(self) -> &'static str {
        match self {
            Measurand::CurrentImport => "Current.Import",
            Measurand::CurrentExport => "Current.Export",
            Measurand::EnergyActiveImportRegister => "Energy.Active.Import.Register",
            Measurand::EnergyActiveExportRegister => "Energy.Active.Export.Register",
            Measurand::PowerActiveImport => "Power.Active.Import",
            Measurand::PowerActiveExport => "Power.Active.Export",
            Measurand::Voltage => "Voltage",
            Measurand::SoC => "SoC",
        }
    }
}

impl fmt::Display for Measurand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measurand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Current.Import" => Ok(Measurand::CurrentImport),
            "Current.Export" => Ok(Measurand::CurrentExport),
            "Energy.Active.Import.Register" => Ok(Measurand::EnergyActiveImportRegister),
            "Energy.Active.Export.Register" => Ok(Measurand::EnergyActiveExportRegister),
            "Power.Active.Import" => Ok(Measurand::PowerActiveImport),
            "Power.Active.Export" => Ok(Measurand::PowerActiveExport),
            "Voltage" => Ok(Measurand::Voltage),
            "SoC" => Ok(Measurand::SoC),
            _ => Err(format!("unknown measurand '{s}'")),
        }
    }
}

/// Circumstance under which a value was sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadingContext {
    InterruptionBegin,
    InterruptionEnd,
    SampleClock,
    #[default]
    SamplePeriodic,
    TransactionBegin,
    TransactionEnd,
    Trigger,
}

impl ReadingContext {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadingContext::InterruptionBegin => "Interruption.Begin",
            ReadingContext::InterruptionEnd => "Interruption.End",
            ReadingContext::SampleClock => "Sample.Clock",
            ReadingContext::SamplePeriodic => "Sample.Periodic",
            ReadingContext::TransactionBegin => "Transaction.Begin",
            ReadingContext::TransactionEnd => "Transaction.End",
            ReadingContext::Trigger => "Trigger",
        }
    }
}

impl fmt::Display for ReadingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Interruption.Begin" => Ok(ReadingContext::InterruptionBegin),
            "Interruption.End" => Ok(ReadingContext::InterruptionEnd),
            "Sample.Clock" => Ok(ReadingContext::SampleClock),
            "Sample.Periodic" => Ok(ReadingContext::SamplePeriodic),
            "Transaction.Begin" => Ok(ReadingContext::TransactionBegin),
            "Transaction.End" => Ok(ReadingContext::TransactionEnd),
            "Trigger" => Ok(ReadingContext::Trigger),
            _ => Err(format!("unknown reading context '{s}'")),
        }
    }
}

/// Where a measurement was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    Body,
    Cable,
    Ev,
    Inlet,
    #[default]
    Outlet,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Body => "Body",
            Location::Cable => "Cable",
            Location::Ev => "EV",
            Location::Inlet => "Inlet",
            Location::Outlet => "Outlet",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Body" => Ok(Location::Body),
            "Cable" => Ok(Location::Cable),
            "EV" => Ok(Location::Ev),
            "Inlet" => Ok(Location::Inlet),
            "Outlet" => Ok(Location::Outlet),
            _ => Err(format!("unknown location '{s}'")),
        }
    }
}

/// Electrical phase a measurement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    L1,
    L2,
    L3,
    N,
    L1N,
    L2N,
    L3N,
    L1L2,
    L2L3,
    L3L1,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::L1 => "L1",
            Phase::L2 => "L2",
            Phase::L3 => "L3",
            Phase::N => "N",
            Phase::L1N => "L1-N",
            Phase::L2N => "L2-N",
            Phase::L3N => "L3-N",
            Phase::L1L2 => "L1-L2",
            Phase::L2L3 => "L2-L3",
            Phase::L3L1 => "L3-L1",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L1" => Ok(Phase::L1),
            "L2" => Ok(Phase::L2),
            "L3" => Ok(Phase::L3),
            "N" => Ok(Phase::N),
            "L1-N" => Ok(Phase::L1N),
            "L2-N" => Ok(Phase::L2N),
            "L3-N" => Ok(Phase::L3N),
            "L1-L2" => Ok(Phase::L1L2),
            "L2-L3" => Ok(Phase::L2L3),
            "L3-L1" => Ok(Phase::L3L1),
            _ => Err(format!("unknown phase '{s}'")),
        }
    }
}

// ============================================================================
// Charging profiles
// ============================================================================

/// Charging profile purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargingProfilePurpose {
    ChargingStationMaxProfile,
    TxDefaultProfile,
    TxProfile,
}

impl ChargingProfilePurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargingProfilePurpose::ChargingStationMaxProfile => "ChargingStationMaxProfile",
            ChargingProfilePurpose::TxDefaultProfile => "TxDefaultProfile",
            ChargingProfilePurpose::TxProfile => "TxProfile",
        }
    }
}

impl fmt::Display for ChargingProfilePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargingProfilePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ChargingStationMaxProfile" => Ok(ChargingProfilePurpose::ChargingStationMaxProfile),
            "TxDefaultProfile" => Ok(ChargingProfilePurpose::TxDefaultProfile),
            "TxProfile" => Ok(ChargingProfilePurpose::TxProfile),
            _ => Err(format!("unknown charging profile purpose '{s}'")),
        }
    }
}

/// Charging profile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargingProfileKind {
    Absolute,
    Recurring,
    Relative,
}

impl ChargingProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargingProfileKind::Absolute => "Absolute",
            ChargingProfileKind::Recurring => "Recurring",
            ChargingProfileKind::Relative => "Relative",
        }
    }
}

impl fmt::Display for ChargingProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargingProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Absolute" => Ok(ChargingProfileKind::Absolute),
            "Recurring" => Ok(ChargingProfileKind::Recurring),
            "Relative" => Ok(ChargingProfileKind::Relative),
            _ => Err(format!("unknown charging profile kind '{s}'")),
        }
    }
}

/// Recurrence period for recurring profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrencyKind {
    Daily,
    Weekly,
}

impl RecurrencyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecurrencyKind::Daily => "Daily",
            RecurrencyKind::Weekly => "Weekly",
        }
    }
}

impl fmt::Display for RecurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Daily" => Ok(RecurrencyKind::Daily),
            "Weekly" => Ok(RecurrencyKind::Weekly),
            _ => Err(format!("unknown recurrency kind '{s}'")),
        }
    }
}

/// Unit in which schedule limits are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargingRateUnit {
    W,
    A,
}

impl ChargingRateUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargingRateUnit::W => "W",
            ChargingRateUnit::A => "A",
        }
    }
}

impl fmt::Display for ChargingRateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargingRateUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "W" => Ok(ChargingRateUnit::W),
            "A" => Ok(ChargingRateUnit::A),
            _ => Err(format!("unknown charging rate unit '{s}'")),
        }
    }
}

/// Outcome of a profile clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearProfileStatus {
    Accepted,
    Unknown,
}

impl ClearProfileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ClearProfileStatus::Accepted => "Accepted",
            ClearProfileStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ClearProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClearProfileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Accepted" => Ok(ClearProfileStatus::Accepted),
            "Unknown" => Ok(ClearProfileStatus::Unknown),
            _ => Err(format!("unknown clear profile status '{s}'")),
        }
    }
}

// ============================================================================
// Device model variables
// ============================================================================

/// Which attribute of a variable is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeType {
    #[default]
    Actual,
    Target,
    MinSet,
    MaxSet,
}

impl AttributeType {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Actual => "Actual",
            AttributeType::Target => "Target",
            AttributeType::MinSet => "MinSet",
            AttributeType::MaxSet => "MaxSet",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Actual" => Ok(AttributeType::Actual),
            "Target" => Ok(AttributeType::Target),
            "MinSet" => Ok(AttributeType::MinSet),
            "MaxSet" => Ok(AttributeType::MaxSet),
            _ => Err(format!("unknown attribute type '{s}'")),
        }
    }
}

/// Whether a variable may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MutabilityType {
    ReadOnly,
    WriteOnly,
    #[default]
    ReadWrite,
}

impl MutabilityType {
    pub fn as_str(self) -> &'static str {
        match self {
            MutabilityType::ReadOnly => "ReadOnly",
            MutabilityType::WriteOnly => "WriteOnly",
            MutabilityType::ReadWrite => "ReadWrite",
        }
    }
}

impl fmt::Display for MutabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MutabilityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ReadOnly" => Ok(MutabilityType::ReadOnly),
            "WriteOnly" => Ok(MutabilityType::WriteOnly),
            "ReadWrite" => Ok(MutabilityType::ReadWrite),
            _ => Err(format!("unknown mutability '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_tokens_round_trip() {
        let m: Measurand = "Energy.Active.Import.Register".parse().unwrap();
        assert_eq!(m, Measurand::EnergyActiveImportRegister);
        assert_eq!(m.to_string(), "Energy.Active.Import.Register");

        let c: ReadingContext = "Sample.Periodic".parse().unwrap();
        assert_eq!(c, ReadingContext::SamplePeriodic);
    }

    #[test]
    fn test_unknown_token_names_enumeration() {
        let err = "Bogus".parse::<Measurand>().unwrap_err();
        assert!(err.contains("measurand"));
        assert!(err.contains("Bogus"));

        let err = "Bogus".parse::<Phase>().unwrap_err();
        assert!(err.contains("phase"));
    }

    #[test]
    fn test_documented_defaults() {
        assert_eq!(Measurand::default(), Measurand::EnergyActiveImportRegister);
        assert_eq!(ReadingContext::default(), ReadingContext::SamplePeriodic);
        assert_eq!(Location::default(), Location::Outlet);
        assert_eq!(AttributeType::default(), AttributeType::Actual);
        assert_eq!(MutabilityType::default(), MutabilityType::ReadWrite);
    }
}
