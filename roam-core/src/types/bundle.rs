//! Data-bundle payloads and listing queries.

use serde::{Deserialize, Serialize};

use crate::constants::FIRST_PAGE;
use crate::error::{Result, RoamError};
use crate::types::Country;

/// One bundle as it appears in a listing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSummary {
    /// Stable bundle code, e.g. "hk-5gb-30d".
    pub code: String,
    /// Localized display name.
    pub name: String,
    /// Included data allowance in megabytes.
    pub data_mb: u32,
    /// Validity window in days, counted from activation.
    pub validity_days: u16,
    /// Price in the currency's minor unit.
    pub price_cents: u64,
    /// ISO 4217 currency code, e.g. "USD".
    pub currency: String,
}

/// Full bundle payload served by the detail endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleDetail {
    /// Stable bundle code.
    pub code: String,
    /// Localized display name.
    pub name: String,
    /// Localized marketing description.
    pub description: String,
    /// Included data allowance in megabytes.
    pub data_mb: u32,
    /// Validity window in days.
    pub validity_days: u16,
    /// Price in the currency's minor unit.
    pub price_cents: u64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Countries the bundle covers.
    pub countries: Vec<Country>,
    /// Whether the bundle can be topped up after purchase.
    pub supports_top_up: bool,
}

impl BundleDetail {
    /// Validates the payload.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(RoamError::Validation("bundle code cannot be empty".into()));
        }
        for country in &self.countries {
            country.validate()?;
        }
        Ok(())
    }
}

/// One page of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Page size the server applied.
    pub page_size: u32,
    /// Total items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Returns true if no page follows this one.
    pub fn is_last(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) >= self.total
    }
}

/// Parameters of a bundle-listing request.
///
/// This is the logical identity of a listing call: the page plus the
/// optional country/region filters. The typed cache keys serialize it
/// deterministically, with absent filters written as the sentinel token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleQuery {
    /// 1-based page number.
    pub page: u32,
    /// Restrict the listing to one country code.
    pub country: Option<String>,
    /// Restrict the listing to one region code.
    pub region: Option<String>,
}

impl Default for BundleQuery {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            country: None,
            region: None,
        }
    }
}

impl BundleQuery {
    /// Moves the query to the given 1-based page.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Restricts the listing to one country.
    pub fn for_country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    /// Restricts the listing to one region.
    pub fn for_region(mut self, code: impl Into<String>) -> Self {
        self.region = Some(code.into());
        self
    }

    /// Validates the query.
    pub fn validate(&self) -> Result<()> {
        if self.page < FIRST_PAGE {
            return Err(RoamError::Validation(format!(
                "page must be >= {}, got {}",
                FIRST_PAGE, self.page
            )));
        }
        Ok(())
    }
}
