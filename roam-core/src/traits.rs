//! Common traits for the Roam catalog core.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BundleDetail, BundleQuery, BundleSummary, CachePolicy, Country, Page, Region};

// ═══════════════════════════════════════════════════════════════════════════════
// CATALOG SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for fetching catalog data.
///
/// Implementations might be:
/// - The HTTP client against the store's catalog API (production)
/// - Instrumented stubs with fixed payloads and invocation counters (tests)
///
/// The repository layer never talks to a transport directly; it coalesces
/// and caches calls to this trait. Implementations perform no caching and
/// no retries of their own.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the list of countries, localized for `locale`.
    async fn countries(&self, locale: &str) -> Result<Vec<Country>>;

    /// Fetches the list of regions, localized for `locale`.
    async fn regions(&self, locale: &str) -> Result<Vec<Region>>;

    /// Fetches one page of bundle listings matching `query`.
    async fn bundles(&self, locale: &str, query: &BundleQuery) -> Result<Page<BundleSummary>>;

    /// Fetches the detail payload for one bundle code.
    async fn bundle(&self, locale: &str, code: &str) -> Result<BundleDetail>;

    /// Fetches the current cache policy from remote configuration.
    async fn cache_policy(&self) -> Result<CachePolicy>;
}
