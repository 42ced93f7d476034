//! Geography payloads: countries and multi-country regions.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoamError};

/// A country the store sells bundles for.
///
/// `name` is localized server-side; the same country carries a different
/// name per display language, which is why locale is part of every cache key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, e.g. "HK".
    pub code: String,
    /// Localized display name, e.g. "Hong Kong".
    pub name: String,
}

impl Country {
    /// Creates a country payload.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Validates the payload.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(RoamError::Validation("country code cannot be empty".into()));
        }
        Ok(())
    }
}

/// A multi-country region, e.g. "Europe" or "Asia Pacific".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region code, e.g. "apac".
    pub code: String,
    /// Localized display name.
    pub name: String,
}

impl Region {
    /// Creates a region payload.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Validates the payload.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(RoamError::Validation("region code cannot be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_validate() {
        assert!(Country::new("HK", "Hong Kong").validate().is_ok());
        assert!(Country::new("  ", "nameless").validate().is_err());
    }

    #[test]
    fn test_region_validate() {
        assert!(Region::new("apac", "Asia Pacific").validate().is_ok());
        assert!(Region::new("", "Europe").validate().is_err());
    }

    #[test]
    fn test_country_deserializes_from_api_shape() {
        let country: Country =
            serde_json::from_str(r#"{"code":"HK","name":"Hong Kong"}"#).unwrap();
        assert_eq!(country, Country::new("HK", "Hong Kong"));
    }
}
