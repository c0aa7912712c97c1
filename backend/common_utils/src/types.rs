//! Types that can be used in other crates

use error_stack::report;
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ValidationError};

/// Amount in the smallest currency unit (paise for INR).
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Gateways reject zero and negative amounts, so catch them before the call.
    pub fn validate_positive(self) -> CustomResult<Self, ValidationError> {
        if self.0 >= 1 {
            Ok(self)
        } else {
            Err(report!(ValidationError::InvalidValue {
                message: format!("amount must be at least 1 minor unit, got {}", self.0),
            }))
        }
    }
}

impl std::fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_integer() {
        let value = serde_json::to_value(MinorUnit::new(10000)).unwrap();
        assert_eq!(value, serde_json::json!(10000));
    }

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(MinorUnit::new(1).validate_positive().is_ok());
        assert!(MinorUnit::new(0).validate_positive().is_err());
        assert!(MinorUnit::new(-500).validate_positive().is_err());
    }
}
