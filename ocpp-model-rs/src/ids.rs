//! Identifier scalars

use crate::error::ConstructError;
use std::fmt;
use std::str::FromStr;

/// EVSE identifier; positive, carried as a string token in records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EvseId(u32);

impl EvseId {
    pub fn new(value: u32) -> Result<Self, ConstructError> {
        if value == 0 {
            return Err(ConstructError::out_of_range(
                "evseId",
                "must be a positive integer",
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EvseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EvseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .parse()
            .map_err(|_| format!("expected a positive integer EVSE id, got '{s}'"))?;
        EvseId::new(value).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_from_string_token() {
        let id: EvseId = "1".parse().unwrap();
        assert_eq!(id.value(), 1);
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        assert!("0".parse::<EvseId>().is_err());
        assert!("-3".parse::<EvseId>().is_err());
        assert!("one".parse::<EvseId>().is_err());
        assert!(EvseId::new(0).is_err());
    }
}
