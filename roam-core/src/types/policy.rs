//! Remote-configurable cache policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BUNDLE_DETAIL_TTL_SECS, DEFAULT_BUNDLE_LIST_TTL_SECS, DEFAULT_COUNTRIES_TTL_SECS,
    DEFAULT_REGIONS_TTL_SECS,
};

/// Per-endpoint cache TTLs, in seconds.
///
/// The policy is served by the remote config endpoint and may change at any
/// time, which is why caches take the TTL at read time instead of stamping
/// it into entries at write time. Fields missing from the remote payload
/// fall back to the compiled-in defaults. A TTL of zero disables caching
/// for that endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// TTL for the country list.
    pub countries_ttl_secs: u64,
    /// TTL for the region list.
    pub regions_ttl_secs: u64,
    /// TTL for bundle listing pages.
    pub bundle_list_ttl_secs: u64,
    /// TTL for bundle detail payloads.
    pub bundle_detail_ttl_secs: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            countries_ttl_secs: DEFAULT_COUNTRIES_TTL_SECS,
            regions_ttl_secs: DEFAULT_REGIONS_TTL_SECS,
            bundle_list_ttl_secs: DEFAULT_BUNDLE_LIST_TTL_SECS,
            bundle_detail_ttl_secs: DEFAULT_BUNDLE_DETAIL_TTL_SECS,
        }
    }
}

impl CachePolicy {
    /// A policy with every TTL set to zero, disabling all caching.
    pub fn disabled() -> Self {
        Self {
            countries_ttl_secs: 0,
            regions_ttl_secs: 0,
            bundle_list_ttl_secs: 0,
            bundle_detail_ttl_secs: 0,
        }
    }

    /// TTL for the country list.
    pub fn countries_ttl(&self) -> Duration {
        Duration::from_secs(self.countries_ttl_secs)
    }

    /// TTL for the region list.
    pub fn regions_ttl(&self) -> Duration {
        Duration::from_secs(self.regions_ttl_secs)
    }

    /// TTL for bundle listing pages.
    pub fn bundle_list_ttl(&self) -> Duration {
        Duration::from_secs(self.bundle_list_ttl_secs)
    }

    /// TTL for bundle detail payloads.
    pub fn bundle_detail_ttl(&self) -> Duration {
        Duration::from_secs(self.bundle_detail_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let policy = CachePolicy::default();
        assert_eq!(policy.countries_ttl(), Duration::from_secs(DEFAULT_COUNTRIES_TTL_SECS));
        assert_eq!(policy.bundle_detail_ttl_secs, DEFAULT_BUNDLE_DETAIL_TTL_SECS);
    }

    #[test]
    fn test_partial_remote_payload_fills_defaults() {
        // The config endpoint may ship only the fields it overrides.
        let policy: CachePolicy = serde_json::from_str(r#"{"countries_ttl_secs":60}"#).unwrap();
        assert_eq!(policy.countries_ttl_secs, 60);
        assert_eq!(policy.regions_ttl_secs, DEFAULT_REGIONS_TTL_SECS);
        assert_eq!(policy.bundle_list_ttl_secs, DEFAULT_BUNDLE_LIST_TTL_SECS);
    }

    #[test]
    fn test_disabled_policy() {
        let policy = CachePolicy::disabled();
        assert_eq!(policy.countries_ttl(), Duration::ZERO);
        assert_eq!(policy.bundle_list_ttl(), Duration::ZERO);
    }
}
