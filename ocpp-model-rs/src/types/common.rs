//! Common identification and status types

use crate::binary::{BinaryFormat, ByteReader, ByteWriter};
use crate::codec;
use crate::custom_data::CustomData;
use crate::error::{ConstructError, ParseError};
use crate::extract;
use crate::hash::{dedup, set_eq, FieldHasher};
use crate::record::Record;
use crate::types::enums::IdTokenType;
use crate::value::ValueType;
use serde_json::Value;

// ============================================================================
// StatusInfo
// ============================================================================

/// Machine-readable status detail with an optional human-readable note.
#[derive(Debug, Clone)]
pub struct StatusInfo {
    reason_code: String,
    additional_info: Option<String>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl StatusInfo {
    /// Maximum reason code length.
    pub const MAX_REASON_CODE: usize = 20;
    /// Maximum additional info length.
    pub const MAX_ADDITIONAL_INFO: usize = 512;

    pub fn new(
        reason_code: impl Into<String>,
        additional_info: Option<String>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let reason_code = reason_code.into();
        if reason_code.is_empty() {
            return Err(ConstructError::empty("reasonCode"));
        }
        if reason_code.chars().count() > Self::MAX_REASON_CODE {
            return Err(ConstructError::too_long("reasonCode", Self::MAX_REASON_CODE));
        }
        if let Some(info) = &additional_info {
            if info.chars().count() > Self::MAX_ADDITIONAL_INFO {
                return Err(ConstructError::too_long(
                    "additionalInfo",
                    Self::MAX_ADDITIONAL_INFO,
                ));
            }
        }

        let hash = FieldHasher::new()
            .field(&reason_code)
            .field(&additional_info)
            .field(&custom_data)
            .finish();

        Ok(Self {
            reason_code,
            additional_info,
            custom_data,
            hash,
        })
    }

    pub fn reason_code(&self) -> &str {
        &self.reason_code
    }

    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }
}

impl ValueType for StatusInfo {
    const NAME: &'static str = "StatusInfo";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "reasonCode".to_string(),
            Value::String(self.reason_code.clone()),
        );
        if let Some(info) = &self.additional_info {
            record.insert("additionalInfo".to_string(), Value::String(info.clone()));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let reason_code = extract::required(record, "reasonCode", codec::non_empty_string)?;
        let additional_info = extract::optional(record, "additionalInfo", codec::string)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(reason_code, additional_info, custom_data)?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for StatusInfo {
    fn eq(&self, other: &Self) -> bool {
        self.reason_code == other.reason_code
            && self.additional_info == other.additional_info
            && self.custom_data == other.custom_data
    }
}

impl Eq for StatusInfo {}

impl std::hash::Hash for StatusInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// AdditionalInfo
// ============================================================================

/// Extra identification attached to an [`IdToken`].
#[derive(Debug, Clone)]
pub struct AdditionalInfo {
    additional_id_token: String,
    info_type: String,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl AdditionalInfo {
    /// Maximum additional token length.
    pub const MAX_TOKEN: usize = 36;
    /// Maximum type label length.
    pub const MAX_TYPE: usize = 50;

    pub fn new(
        additional_id_token: impl Into<String>,
        info_type: impl Into<String>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let additional_id_token = additional_id_token.into();
        let info_type = info_type.into();
        if additional_id_token.is_empty() {
            return Err(ConstructError::empty("additionalIdToken"));
        }
        if additional_id_token.chars().count() > Self::MAX_TOKEN {
            return Err(ConstructError::too_long("additionalIdToken", Self::MAX_TOKEN));
        }
        if info_type.is_empty() {
            return Err(ConstructError::empty("type"));
        }
        if info_type.chars().count() > Self::MAX_TYPE {
            return Err(ConstructError::too_long("type", Self::MAX_TYPE));
        }

        let hash = FieldHasher::new()
            .field(&additional_id_token)
            .field(&info_type)
            .field(&custom_data)
            .finish();

        Ok(Self {
            additional_id_token,
            info_type,
            custom_data,
            hash,
        })
    }

    pub fn additional_id_token(&self) -> &str {
        &self.additional_id_token
    }

    pub fn info_type(&self) -> &str {
        &self.info_type
    }
}

impl ValueType for AdditionalInfo {
    const NAME: &'static str = "AdditionalInfo";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "additionalIdToken".to_string(),
            Value::String(self.additional_id_token.clone()),
        );
        record.insert("type".to_string(), Value::String(self.info_type.clone()));
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let additional_id_token =
            extract::required(record, "additionalIdToken", codec::non_empty_string)?;
        let info_type = extract::required(record, "type", codec::non_empty_string)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(additional_id_token, info_type, custom_data)?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for AdditionalInfo {
    fn eq(&self, other: &Self) -> bool {
        self.additional_id_token == other.additional_id_token
            && self.info_type == other.info_type
            && self.custom_data == other.custom_data
    }
}

impl Eq for AdditionalInfo {}

impl std::hash::Hash for AdditionalInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// ============================================================================
// IdToken
// ============================================================================

/// Authorization token, optionally carrying additional identification.
///
/// Also encodes to the compact binary layout; see [`IdToken::to_binary`].
#[derive(Debug, Clone)]
pub struct IdToken {
    id_token: String,
    token_type: IdTokenType,
    additional_info: Option<Vec<AdditionalInfo>>,
    custom_data: Option<CustomData>,
    hash: u64,
}

impl IdToken {
    /// Maximum token length.
    pub const MAX_TOKEN: usize = 36;

    /// `id_token` may be empty for `NoAuthorization`; `additional_info`
    /// is a set: duplicates collapse and order is not significant.
    pub fn new(
        id_token: impl Into<String>,
        token_type: IdTokenType,
        additional_info: Option<Vec<AdditionalInfo>>,
        custom_data: Option<CustomData>,
    ) -> Result<Self, ConstructError> {
        let id_token = id_token.into();
        if id_token.chars().count() > Self::MAX_TOKEN {
            return Err(ConstructError::too_long("idToken", Self::MAX_TOKEN));
        }
        let additional_info = match additional_info {
            Some(infos) => {
                let infos = dedup(infos);
                if infos.is_empty() {
                    return Err(ConstructError::empty("additionalInfo"));
                }
                Some(infos)
            }
            None => None,
        };

        let hash = FieldHasher::new()
            .field(&id_token)
            .field(&token_type)
            .unordered(additional_info.as_deref().unwrap_or(&[]))
            .field(&custom_data)
            .finish();

        Ok(Self {
            id_token,
            token_type,
            additional_info,
            custom_data,
            hash,
        })
    }

    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    pub fn token_type(&self) -> IdTokenType {
        self.token_type
    }

    pub fn additional_info(&self) -> Option<&[AdditionalInfo]> {
        self.additional_info.as_deref()
    }

    /// Encode into the chosen binary layout.
    ///
    /// The extension slot does not travel in binary form; a future format
    /// can add it without breaking `Compact` decoders.
    pub fn to_binary(&self, format: BinaryFormat) -> Vec<u8> {
        self.to_binary_with(format, None)
    }

    /// Encode, passing the produced bytes through `hook` last.
    pub fn to_binary_with(
        &self,
        format: BinaryFormat,
        hook: Option<&dyn Fn(&Self, Vec<u8>) -> Vec<u8>>,
    ) -> Vec<u8> {
        let bytes = match format {
            BinaryFormat::Compact => {
                let mut writer = ByteWriter::new();
                writer.str_field(&self.id_token);
                writer.str_field(self.token_type.as_str());
                let infos = self.additional_info.as_deref().unwrap_or(&[]);
                writer.count(infos.len());
                for info in infos {
                    writer.str_field(info.additional_id_token());
                    writer.str_field(info.info_type());
                }
                writer.finish()
            }
        };
        match hook {
            Some(hook) => hook(self, bytes),
            None => bytes,
        }
    }

    /// Decode from the chosen binary layout.
    ///
    /// Yields a value equal to the one the JSON form of the same content
    /// parses to.
    pub fn try_parse_binary(bytes: &[u8], format: BinaryFormat) -> Result<Self, ParseError> {
        match format {
            BinaryFormat::Compact => {
                let mut reader = ByteReader::new(bytes);
                let id_token = reader.str_field("idToken")?;
                let token_type: IdTokenType = reader
                    .str_field("type")?
                    .parse()
                    .map_err(ParseError::Binary)?;
                let count = reader.byte("additionalInfo count")? as usize;
                let mut infos = Vec::with_capacity(count);
                for index in 0..count {
                    let token =
                        reader.str_field(&format!("additionalInfo[{index}].additionalIdToken"))?;
                    let info_type = reader.str_field(&format!("additionalInfo[{index}].type"))?;
                    infos.push(AdditionalInfo::new(token, info_type, None)?);
                }
                let additional_info = if infos.is_empty() { None } else { Some(infos) };
                Ok(Self::new(id_token, token_type, additional_info, None)?)
            }
        }
    }
}

impl ValueType for IdToken {
    const NAME: &'static str = "IdToken";

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("idToken".to_string(), Value::String(self.id_token.clone()));
        record.insert(
            "type".to_string(),
            Value::String(self.token_type.as_str().to_string()),
        );
        if let Some(infos) = &self.additional_info {
            let rendered = infos
                .iter()
                .map(|info| Value::Object(info.to_record()))
                .collect();
            record.insert("additionalInfo".to_string(), Value::Array(rendered));
        }
        CustomData::emit(&self.custom_data, &mut record);
        record
    }

    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let id_token = extract::required(record, "idToken", codec::string)?;
        let token_type = extract::required(record, "type", codec::token::<IdTokenType>)?;
        let additional_info =
            extract::optional_set(record, "additionalInfo", AdditionalInfo::from_value)?;
        let custom_data = CustomData::extract(record)?;
        Ok(Self::new(id_token, token_type, additional_info, custom_data)?)
    }

    fn structural_hash(&self) -> u64 {
        self.hash
    }

    fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }
}

impl PartialEq for IdToken {
    fn eq(&self, other: &Self) -> bool {
        let infos_equal = match (&self.additional_info, &other.additional_info) {
            (None, None) => true,
            (Some(a), Some(b)) => set_eq(a, b),
            _ => false,
        };
        self.id_token == other.id_token
            && self.token_type == other.token_type
            && infos_equal
            && self.custom_data == other.custom_data
    }
}

impl Eq for IdToken {}

impl std::hash::Hash for IdToken {
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
    fn test_status_info_round_trip() {
        let info = StatusInfo::new("NoProfile", Some("nothing to clear".to_string()), None).unwrap();
        let parsed = StatusInfo::try_parse(&info.serialize()).unwrap();
        assert_eq!(parsed, info);
        assert_eq!(parsed.structural_hash(), info.structural_hash());
    }

    #[test]
    fn test_status_info_rejects_long_reason_code() {
        let err = StatusInfo::new("X".repeat(21), None, None).unwrap_err();
        assert!(err.to_string().contains("reasonCode"));
    }

    #[test]
    fn test_id_token_parses_with_additional_info() {
        let rec = record(json!({
            "idToken": "04E1D6A2B33C80",
            "type": "ISO14443",
            "additionalInfo": [
                {"additionalIdToken": "ALT-1", "type": "licensePlate"},
            ],
        }));

        let token = IdToken::try_parse(&rec).unwrap();
        assert_eq!(token.id_token(), "04E1D6A2B33C80");
        assert_eq!(token.token_type(), IdTokenType::Iso14443);
        assert_eq!(token.additional_info().unwrap().len(), 1);
        assert_eq!(IdToken::try_parse(&token.serialize()).unwrap(), token);
    }

    #[test]
    fn test_id_token_additional_info_order_irrelevant() {
        let a = AdditionalInfo::new("A", "t", None).unwrap();
        let b = AdditionalInfo::new("B", "t", None).unwrap();

        let left = IdToken::new("TOK", IdTokenType::Local, Some(vec![a.clone(), b.clone()]), None)
            .unwrap();
        let right = IdToken::new("TOK", IdTokenType::Local, Some(vec![b, a]), None).unwrap();

        assert_eq!(left, right);
        assert_eq!(left.structural_hash(), right.structural_hash());
    }

    #[test]
    fn test_id_token_unknown_type_rejected() {
        let rec = record(json!({"idToken": "TOK", "type": "Telepathy"}));
        let err = IdToken::try_parse(&rec).unwrap_err();
        assert!(err.to_string().contains("type"));
        assert!(err.to_string().contains("Telepathy"));
    }

    #[test]
    fn test_binary_round_trip_matches_json() {
        let info = AdditionalInfo::new("ALT-1", "licensePlate", None).unwrap();
        let token =
            IdToken::new("04E1D6A2B33C80", IdTokenType::Iso14443, Some(vec![info]), None).unwrap();

        let bytes = token.to_binary(BinaryFormat::Compact);
        let decoded = IdToken::try_parse_binary(&bytes, BinaryFormat::Compact).unwrap();
        assert_eq!(decoded, token);

        let via_json = IdToken::try_parse(&token.serialize()).unwrap();
        assert_eq!(decoded, via_json);
    }

    #[test]
    fn test_binary_truncation_is_a_parse_failure() {
        let token = IdToken::new("TOK", IdTokenType::Local, None, None).unwrap();
        let mut bytes = token.to_binary(BinaryFormat::Compact);
        bytes.truncate(bytes.len() - 1);
        assert!(IdToken::try_parse_binary(&bytes, BinaryFormat::Compact).is_err());
    }

    #[test]
    fn test_binary_hook_sees_finished_bytes() {
        let token = IdToken::new("TOK", IdTokenType::Local, None, None).unwrap();
        let plain = token.to_binary(BinaryFormat::Compact);

        let framed = token.to_binary_with(
            BinaryFormat::Compact,
            Some(&|_t: &IdToken, mut bytes: Vec<u8>| {
                bytes.insert(0, BinaryFormat::Compact.tag());
                bytes
            }),
        );
        assert_eq!(framed[0], 0x01);
        assert_eq!(&framed[1..], &plain[..]);
    }
}
