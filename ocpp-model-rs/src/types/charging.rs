//! Charging profile and schedule types

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::codec;
use crate::custom_data::CustomData;
use crate::error::{ConstructError, ParseError};
use crate::extract;
use crate::hash::{dedup, set_eq, FieldHasher};
use crate::record::Record;
use crate::types::common::StatusInfo;
use crate::types::enums::{
    ChargingProfileKind, ChargingProfilePurpose, ChargingRateUnit, ClearProfileStatus,
    RecurrencyKind,
};
use crate::value::ValueType;

// ============================================================================
// ChargingSchedulePeriod
// ============================================================================

/// One step of a charging schedule.
#[derive(Debug, Clone)]
pub struct ChargingSchedulePeriod {
    start_period: i32,
    limit: f64,
    number_phases: Option<i32>,
    phase_to_use: Option<i32>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl ChargingSchedulePeriod {
    /// `phase_to_use` is only meaningful for single-phase charging, so it
    /// requires `number_phases` to be 1.
    pub fn new(
        start_period: i32,
        limit: f64,
        number_phases: Option<i32>,
        phase_to_use: Option<i32>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        if start_period < 0 {
            return Err(ConstructError::out_of_range(
                "startPeriod",
                "must not be negative",
            ));
        }
        if !limit.is_finite() || limit < 0.0 {
            return Err(ConstructError::out_of_range(
                "limit",
                "must be a non-negative number",
            ));
        }
        if let Some(phases) = number_phases {
            if !(1..=3).contains(&phases) {
                return Err(ConstructError::out_of_range(
                    "numberPhases",
                    "must be between 1 and 3",
                ));
            }
        }
        if let Some(phase) = phase_to_use {
            if !(1..=3).contains(&phase) {
                return Err(ConstructError::out_of_range(
                    "phaseToUse",
                    "must be between 1 and 3",
                ));
            }
            if number_phases != Some(1) {
                return Err(ConstructError::only_allowed_when(
                    "phaseToUse",
                    "numberPhases is 1",
                ));
            }
        }

        let hash = FieldHasher::new()
            .field(&start_period)
            .decimal(limit)
            .field(&number_phases)
            .field(&phase_to_use)
            .field(&custom_data)
            .finish();

        Ok(Self {
            start_period,
            limit,
            number_phases,
            phase_to_use,
            custom_data,
            hash,
        })
    }

    /// Offset from the schedule start, seconds.
    pub fn start_period(&self) -> i32 {
        self.start_period
    }

    /// Limit in the schedule's rate unit.
    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn number_phases(&self) -> Option<i32> {
        self.number_phases
    }

    pub fn phase_to_use(&self) -> Option<i32> {
        self.phase_to_use
    }
}

impl ValueType for ChargingSchedulePeriod {
    const NAME: &'static str = "ChargingSchedulePeriod";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("startPeriod".to_string(), Value::from(self.start_period));
        record.insert("limit".to_string(), Value::from(self.limit));
        if let Some(phases) = self.number_phases {
            record.insert("numberPhases".to_string(), Value::from(phases));
        }
        if let Some(phase) = self.phase_to_use {
            record.insert("phaseToUse".to_string(), Value::from(phase));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let start_period = extract::required(record, "startPeriod", codec::int32)?;
        let limit = extract::required(record, "limit", codec::decimal)?;
        let number_phases = extract::optional(record, "numberPhases", codec::int32)?;
        let phase_to_use = extract::optional(record, "phaseToUse", codec::int32)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(
            start_period,
            limit,
            number_phases,
            phase_to_use,
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

impl PartialEq for ChargingSchedulePeriod {
    fn eq(&self, other: &Self) -> bool {
        self.start_period == other.start_period
            && self.limit == other.limit
            && self.number_phases == other.number_phases
            && self.phase_to_use == other.phase_to_use
            && self.custom_data == other.custom_data
    }
}

impl Eq for ChargingSchedulePeriod {}

impl std::hash::Hash for ChargingSchedulePeriod {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// ChargingSchedule
// ============================================================================

/// A sequence of limit periods within one charging profile.
#[derive(Debug, Clone)]
pub struct ChargingSchedule {
    id: i32,
    charging_rate_unit: ChargingRateUnit,
    charging_schedule_period: Vec<ChargingSchedulePeriod>,
    start_schedule: Option<DateTime<Utc>>,
    duration: Option<Duration>,
    min_charging_rate: Option<f64>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl ChargingSchedule {
    /// Periods are a set: duplicates collapse and equality ignores order.
    /// They are stored sorted by start offset for stable display.
    pub fn new(
        id: i32,
        charging_rate_unit: ChargingRateUnit,
        charging_schedule_period: Vec<ChargingSchedulePeriod>,
        start_schedule: Option<DateTime<Utc>>,
        duration: Option<Duration>,
        min_charging_rate: Option<f64>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let mut charging_schedule_period = dedup(charging_schedule_period);
        if charging_schedule_period.is_empty() {
            return Err(ConstructError::empty("chargingSchedulePeriod"));
        }
        charging_schedule_period.sort_by_key(ChargingSchedulePeriod::start_period);

        if let Some(duration) = duration {
            if duration < Duration::zero() {
                return Err(ConstructError::out_of_range(
                    "duration",
                    "must not be negative",
                ));
            }
        }
        if let Some(rate) = min_charging_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConstructError::out_of_range(
                    "minChargingRate",
                    "must be a non-negative number",
                ));
            }
        }

        let hash = FieldHasher::new()
            .field(&id)
            .field(&charging_rate_unit)
            .unordered(&charging_schedule_period)
            .field(&start_schedule)
            .field(&duration.map(|d| d.num_seconds()))
            .optional_decimal(min_charging_rate)
            .field(&custom_data)
            .finish();

        Ok(Self {
            id,
            charging_rate_unit,
            charging_schedule_period,
            start_schedule,
            duration,
            min_charging_rate,
            custom_data,
            hash,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn charging_rate_unit(&self) -> ChargingRateUnit {
        self.charging_rate_unit
    }

    /// Periods sorted by start offset.
    pub fn charging_schedule_period(&self) -> &[ChargingSchedulePeriod] {
        &self.charging_schedule_period
    }

    pub fn start_schedule(&self) -> Option<DateTime<Utc>> {
        self.start_schedule
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn min_charging_rate(&self) -> Option<f64> {
        self.min_charging_rate
    }

    /// Serialize with hooks for this record and for each nested period.
    pub fn serialize_with_hooks(
        &self,
        schedule_hook: Option<&dyn Fn(&ChargingSchedule, Record) -> Record>,
        period_hook: Option<&dyn Fn(&ChargingSchedulePeriod, Record) -> Record>,
    ) -> Record {
        let mut record = Record::new();
        record.insert("id".to_string(), Value::from(self.id));
        record.insert(
            "chargingRateUnit".to_string(),
            Value::String(self.charging_rate_unit.as_str().to_string()),
        );
        let rendered = self
            .charging_schedule_period
            .iter()
            .map(|period| Value::Object(period.serialize_with(period_hook)))
            .collect();
        record.insert("chargingSchedulePeriod".to_string(), Value::Array(rendered));
        if let Some(start) = &self.start_schedule {
            record.insert("startSchedule".to_string(), codec::render_timestamp(start));
        }
        if let Some(duration) = &self.duration {
            record.insert("duration".to_string(), codec::render_duration(duration));
        }
        if let Some(rate) = self.min_charging_rate {
            record.insert("minChargingRate".to_string(), Value::from(rate));
        }
        CustomData::emit(&self.custom_data, &mut record);
        match schedule_hook {
            Some(hook) => hook(self, record),
            None => record,
        }
    }
}

impl ValueType for ChargingSchedule {
    const NAME: &'static str = "ChargingSchedule";

    fn to_record(&self) -> Record {
        self.serialize_with_hooks(None, None)
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let id = extract::required(record, "id", codec::int32)?;
        let charging_rate_unit = extract::required(
            record,
            "chargingRateUnit",
            codec::token::<ChargingRateUnit>,
        )?;
        let charging_schedule_period = extract::required_set(
            record,
            "chargingSchedulePeriod",
            ChargingSchedulePeriod::from_value,
        )?;
        let start_schedule = extract::optional(record, "startSchedule", codec::timestamp)?;
        let duration = extract::optional(record, "duration", codec::duration)?;
        let min_charging_rate = extract::optional(record, "minChargingRate", codec::decimal)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(
            id,
            charging_rate_unit,
            charging_schedule_period,
            start_schedule,
            duration,
            min_charging_rate,
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

impl PartialEq for ChargingSchedule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.charging_rate_unit == other.charging_rate_unit
            && set_eq(&self.charging_schedule_period, &other.charging_schedule_period)
            && self.start_schedule == other.start_schedule
            && self.duration == other.duration
            && self.min_charging_rate == other.min_charging_rate
            && self.custom_data == other.custom_data
    }
}

impl Eq for ChargingSchedule {}

impl std::hash::Hash for ChargingSchedule {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// ChargingProfile
// ============================================================================

/// A stack of charging schedules with validity and recurrence rules.
#[derive(Debug, Clone)]
pub struct ChargingProfile {
    id: i32,
    stack_level: i32,
    charging_profile_purpose: ChargingProfilePurpose,
    charging_profile_kind: ChargingProfileKind,
    charging_schedule: Vec<ChargingSchedule>,
    recurrency_kind: Option<RecurrencyKind>,
    valid_from: Option<DateTime<Utc>>,
    valid_to: Option<DateTime<Utc>>,
    transaction_id: Option<String>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl ChargingProfile {
    /// Maximum number of alternative schedules.
    pub const MAX_SCHEDULES: usize = 3;
    /// Maximum transaction id length.
    pub const MAX_TRANSACTION_ID: usize = 36;

    /// `recurrency_kind` is required for recurring profiles and not
    /// allowed otherwise; `transaction_id` is only allowed for TxProfile.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        stack_level: i32,
        charging_profile_purpose: ChargingProfilePurpose,
        charging_profile_kind: ChargingProfileKind,
        charging_schedule: Vec<ChargingSchedule>,
        recurrency_kind: Option<RecurrencyKind>,
        valid_from: Option<DateTime<Utc>>,
        valid_to: Option<DateTime<Utc>>,
        transaction_id: Option<String>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        if stack_level < 0 {
            return Err(ConstructError::out_of_range(
                "stackLevel",
                "must not be negative",
            ));
        }
        let charging_schedule = dedup(charging_schedule);
        if charging_schedule.is_empty() {
            return Err(ConstructError::empty("chargingSchedule"));
        }
        if charging_schedule.len() > Self::MAX_SCHEDULES {
            return Err(ConstructError::out_of_range(
                "chargingSchedule",
                format!("at most {} schedules are allowed", Self::MAX_SCHEDULES),
            ));
        }
        match (charging_profile_kind, recurrency_kind) {
            (ChargingProfileKind::Recurring, None) => {
                return Err(ConstructError::required_when(
                    "recurrencyKind",
                    "chargingProfileKind is Recurring",
                ));
            }
            (ChargingProfileKind::Recurring, Some(_)) => {}
            (_, Some(_)) => {
                return Err(ConstructError::only_allowed_when(
                    "recurrencyKind",
                    "chargingProfileKind is Recurring",
                ));
            }
            (_, None) => {}
        }
        if let (Some(from), Some(to)) = (&valid_from, &valid_to) {
            if from >= to {
                return Err(ConstructError::invalid(
                    "validTo",
                    "must lie after validFrom",
                ));
            }
        }
        if let Some(tx) = &transaction_id {
            if charging_profile_purpose != ChargingProfilePurpose::TxProfile {
                return Err(ConstructError::only_allowed_when(
                    "transactionId",
                    "chargingProfilePurpose is TxProfile",
                ));
            }
            if tx.is_empty() {
                return Err(ConstructError::empty("transactionId"));
            }
            if tx.chars().count() > Self::MAX_TRANSACTION_ID {
                return Err(ConstructError::too_long(
                    "transactionId",
                    Self::MAX_TRANSACTION_ID,
                ));
            }
        }

        let hash = FieldHasher::new()
            .field(&id)
            .field(&stack_level)
            .field(&charging_profile_purpose)
            .field(&charging_profile_kind)
            .unordered(&charging_schedule)
            .field(&recurrency_kind)
            .field(&valid_from)
            .field(&valid_to)
            .field(&transaction_id)
            .field(&custom_data)
            .finish();

        Ok(Self {
            id,
            stack_level,
            charging_profile_purpose,
            charging_profile_kind,
            charging_schedule,
            recurrency_kind,
            valid_from,
            valid_to,
            transaction_id,
            custom_data,
            hash,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn stack_level(&self) -> i32 {
        self.stack_level
    }

    pub fn charging_profile_purpose(&self) -> ChargingProfilePurpose {
        self.charging_profile_purpose
    }

    pub fn charging_profile_kind(&self) -> ChargingProfileKind {
        self.charging_profile_kind
    }

    pub fn charging_schedule(&self) -> &[ChargingSchedule] {
        &self.charging_schedule
    }

    pub fn recurrency_kind(&self) -> Option<RecurrencyKind> {
        self.recurrency_kind
    }

    pub fn valid_from(&self) -> Option<DateTime<Utc>> {
        self.valid_from
    }

    pub fn valid_to(&self) -> Option<DateTime<Utc>> {
        self.valid_to
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    /// Serialize with hooks for this record, each nested schedule, and
    /// each period inside those schedules. Every level receives
    /// already-serialized child content.
    pub fn serialize_with_hooks(
        &self,
        profile_hook: Option<&dyn Fn(&ChargingProfile, Record) -> Record>,
        schedule_hook: Option<&dyn Fn(&ChargingSchedule, Record) -> Record>,
        period_hook: Option<&dyn Fn(&ChargingSchedulePeriod, Record) -> Record>,
    ) -> Record {
        let mut record = Record::new();
        record.insert("id".to_string(), Value::from(self.id));
        record.insert("stackLevel".to_string(), Value::from(self.stack_level));
        record.insert(
            "chargingProfilePurpose".to_string(),
            Value::String(self.charging_profile_purpose.as_str().to_string()),
        );
        record.insert(
            "chargingProfileKind".to_string(),
            Value::String(self.charging_profile_kind.as_str().to_string()),
        );
        let rendered = self
            .charging_schedule
            .iter()
            .map(|schedule| Value::Object(schedule.serialize_with_hooks(schedule_hook, period_hook)))
            .collect();
        record.insert("chargingSchedule".to_string(), Value::Array(rendered));
        if let Some(kind) = self.recurrency_kind {
            record.insert(
                "recurrencyKind".to_string(),
                Value::String(kind.as_str().to_string()),
            );
        }
        if let Some(from) = &self.valid_from {
            record.insert("validFrom".to_string(), codec::render_timestamp(from));
        }
        if let Some(to) = &self.valid_to {
            record.insert("validTo".to_string(), codec::render_timestamp(to));
        }
        if let Some(tx) = &self.transaction_id {
            record.insert("transactionId".to_string(), Value::String(tx.clone()));
        }
        CustomData::emit(&self.custom_data, &mut record);
        match profile_hook {
            Some(hook) => hook(self, record),
            None => record,
        }
    }
}

impl ValueType for ChargingProfile {
    const NAME: &'static str = "ChargingProfile";

    fn to_record(&self) -> Record {
        self.serialize_with_hooks(None, None, None)
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let id = extract::required(record, "id", codec::int32)?;
        let stack_level = extract::required(record, "stackLevel", codec::int32)?;
        let charging_profile_purpose = extract::required(
            record,
            "chargingProfilePurpose",
            codec::token::<ChargingProfilePurpose>,
        )?;
        let charging_profile_kind = extract::required(
            record,
            "chargingProfileKind",
            codec::token::<ChargingProfileKind>,
        )?;
        let charging_schedule =
            extract::required_set(record, "chargingSchedule", ChargingSchedule::from_value)?;
        let recurrency_kind =
            extract::optional(record, "recurrencyKind", codec::token::<RecurrencyKind>)?;
        let valid_from = extract::optional(record, "validFrom", codec::timestamp)?;
        let valid_to = extract::optional(record, "validTo", codec::timestamp)?;
        let transaction_id = extract::optional(record, "transactionId", codec::string)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(
            id,
            stack_level,
            charging_profile_purpose,
            charging_profile_kind,
            charging_schedule,
            recurrency_kind,
            valid_from,
            valid_to,
            transaction_id,
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

impl PartialEq for ChargingProfile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.stack_level == other.stack_level
            && self.charging_profile_purpose == other.charging_profile_purpose
            && self.charging_profile_kind == other.charging_profile_kind
            && set_eq(&self.charging_schedule, &other.charging_schedule)
            && self.recurrency_kind == other.recurrency_kind
            && self.valid_from == other.valid_from
            && self.valid_to == other.valid_to
            && self.transaction_id == other.transaction_id
            && self.custom_data == other.custom_data
    }
}

impl Eq for ChargingProfile {}

impl std::hash::Hash for ChargingProfile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// ClearProfileResult
// ============================================================================

/// Outcome of clearing charging profiles, optionally naming the profile
/// and carrying status detail.
#[derive(Debug, Clone)]
pub struct ClearProfileResult {
    status: ClearProfileStatus,
    charging_profile_id: Option<i32>,
    status_info: Option<StatusInfo>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl ClearProfileResult {
    pub fn new(
        status: ClearProfileStatus,
        charging_profile_id: Option<i32>,
        status_info: Option<StatusInfo>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        if let Some(id) = charging_profile_id {
            if id < 1 {
                return Err(ConstructError::out_of_range(
                    "chargingProfileId",
                    "must be a positive integer",
                ));
            }
        }

        let hash = FieldHasher::new()
            .field(&status)
            .field(&charging_profile_id)
            .field(&status_info)
            .field(&custom_data)
            .finish();

        Ok(Self {
            status,
            charging_profile_id,
            status_info,
            custom_data,
            hash,
        })
    }

    pub fn status(&self) -> ClearProfileStatus {
        self.status
    }

    pub fn charging_profile_id(&self) -> Option<i32> {
        self.charging_profile_id
    }

    pub fn status_info(&self) -> Option<&StatusInfo> {
        self.status_info.as_ref()
    }
}

impl ValueType for ClearProfileResult {
    const NAME: &'static str = "ClearProfileResult";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "status".to_string(),
            Value::String(self.status.as_str().to_string()),
        );
        if let Some(id) = self.charging_profile_id {
            record.insert("chargingProfileId".to_string(), Value::from(id));
        }
        if let Some(info) = &self.status_info {
            record.insert("statusInfo".to_string(), Value::Object(info.to_record()));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let status = extract::required(record, "status", codec::token::<ClearProfileStatus>)?;
        let charging_profile_id = extract::optional(record, "chargingProfileId", codec::int32)?;
        let status_info = extract::optional(record, "statusInfo", StatusInfo::from_value)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(status, charging_profile_id, status_info, custom_data)?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for ClearProfileResult {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && self.charging_profile_id == other.charging_profile_id
            && self.status_info == other.status_info
            && self.custom_data == other.custom_data
    }
}

impl Eq for ClearProfileResult {}

impl std::hash::Hash for ClearProfileResult {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}
