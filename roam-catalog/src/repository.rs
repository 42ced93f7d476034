//! Catalog repository: coalesced, cached reads over a catalog source.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use roam_cache::TtlCache;
use roam_core::constants::DEFAULT_LOCALE;
use roam_core::error::{Result, RoamError};
use roam_core::traits::CatalogSource;
use roam_core::types::{
    BundleDetail, BundleQuery, BundleSummary, CachePolicy, Country, Page, Region,
};
use roam_flight::{FlightConfig, SingleFlight};

use crate::keys::{BundleDetailKey, BundleListKey, CountriesKey, RegionsKey};

/// Repository configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// TTL policy used until [`CatalogRepository::refresh_policy`] succeeds.
    pub policy: CachePolicy,
    /// Whether coalescing diagnostics are logged.
    pub log_requests: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            policy: CachePolicy::default(),
            log_requests: true,
        }
    }
}

/// Read side of the store catalog.
///
/// Every operation follows the same path: build the endpoint's typed key,
/// run it through the endpoint's single-flight registry, and inside the
/// producer consult the TTL cache before falling back to the source. The
/// TTL for each read comes from the current [`CachePolicy`], which remote
/// configuration may change at any time between a write and a later read.
///
/// Construct one repository at the application's composition root and share
/// it (`Arc<CatalogRepository>`) with every consumer; the coalescing
/// guarantee is per instance.
pub struct CatalogRepository {
    source: Arc<dyn CatalogSource>,
    policy: RwLock<CachePolicy>,
    countries: Arc<TtlCache<Vec<Country>>>,
    regions: Arc<TtlCache<Vec<Region>>>,
    bundle_pages: Arc<TtlCache<Page<BundleSummary>>>,
    bundle_details: Arc<TtlCache<BundleDetail>>,
    country_flights: SingleFlight<Vec<Country>>,
    region_flights: SingleFlight<Vec<Region>>,
    bundle_page_flights: SingleFlight<Page<BundleSummary>>,
    bundle_detail_flights: SingleFlight<BundleDetail>,
}

impl CatalogRepository {
    /// Creates a repository with default configuration.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_config(source, RepositoryConfig::default())
    }

    /// Creates a repository with custom configuration.
    pub fn with_config(source: Arc<dyn CatalogSource>, config: RepositoryConfig) -> Self {
        let flights = FlightConfig {
            log_events: config.log_requests,
        };
        Self {
            source,
            policy: RwLock::new(config.policy),
            countries: Arc::new(TtlCache::new()),
            regions: Arc::new(TtlCache::new()),
            bundle_pages: Arc::new(TtlCache::new()),
            bundle_details: Arc::new(TtlCache::new()),
            country_flights: SingleFlight::with_config(flights.clone()),
            region_flights: SingleFlight::with_config(flights.clone()),
            bundle_page_flights: SingleFlight::with_config(flights.clone()),
            bundle_detail_flights: SingleFlight::with_config(flights),
        }
    }

    /// Returns the localized country list.
    #[instrument(skip(self))]
    pub async fn countries(&self, locale: &str) -> Result<Vec<Country>> {
        let locale = effective_locale(locale);
        let key = CountriesKey { locale: &locale }.build();
        let ttl = self.policy.read().countries_ttl();

        let cache = Arc::clone(&self.countries);
        let source = Arc::clone(&self.source);
        let producer_key = key.clone();
        self.country_flights
            .run(&key, move || async move {
                if let Some(cached) = cache.load(&producer_key, ttl) {
                    debug!(key = producer_key.as_str(), "catalog cache hit");
                    return Ok(cached);
                }
                let fresh = source.countries(&locale).await?;
                cache.save(&producer_key, fresh.clone());
                Ok(fresh)
            })
            .await
    }

    /// Returns the localized region list.
    #[instrument(skip(self))]
    pub async fn regions(&self, locale: &str) -> Result<Vec<Region>> {
        let locale = effective_locale(locale);
        let key = RegionsKey { locale: &locale }.build();
        let ttl = self.policy.read().regions_ttl();

        let cache = Arc::clone(&self.regions);
        let source = Arc::clone(&self.source);
        let producer_key = key.clone();
        self.region_flights
            .run(&key, move || async move {
                if let Some(cached) = cache.load(&producer_key, ttl) {
                    debug!(key = producer_key.as_str(), "catalog cache hit");
                    return Ok(cached);
                }
                let fresh = source.regions(&locale).await?;
                cache.save(&producer_key, fresh.clone());
                Ok(fresh)
            })
            .await
    }

    /// Returns one page of bundle listings matching `query`.
    #[instrument(skip(self))]
    pub async fn bundles(&self, locale: &str, query: &BundleQuery) -> Result<Page<BundleSummary>> {
        query.validate()?;
        let locale = effective_locale(locale);
        let key = BundleListKey { locale: &locale, query }.build();
        let ttl = self.policy.read().bundle_list_ttl();

        let cache = Arc::clone(&self.bundle_pages);
        let source = Arc::clone(&self.source);
        let producer_key = key.clone();
        let query = query.clone();
        self.bundle_page_flights
            .run(&key, move || async move {
                if let Some(cached) = cache.load(&producer_key, ttl) {
                    debug!(key = producer_key.as_str(), "catalog cache hit");
                    return Ok(cached);
                }
                let fresh = source.bundles(&locale, &query).await?;
                cache.save(&producer_key, fresh.clone());
                Ok(fresh)
            })
            .await
    }

    /// Returns the detail payload for one bundle code.
    ///
    /// Codes are case-insensitive; the canonical lowercase form is used for
    /// both the cache key and the fetch.
    #[instrument(skip(self))]
    pub async fn bundle(&self, locale: &str, code: &str) -> Result<BundleDetail> {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return Err(RoamError::Validation("bundle code cannot be empty".into()));
        }
        let locale = effective_locale(locale);
        let key = BundleDetailKey { locale: &locale, code: &code }.build();
        let ttl = self.policy.read().bundle_detail_ttl();

        let cache = Arc::clone(&self.bundle_details);
        let source = Arc::clone(&self.source);
        let producer_key = key.clone();
        self.bundle_detail_flights
            .run(&key, move || async move {
                if let Some(cached) = cache.load(&producer_key, ttl) {
                    debug!(key = producer_key.as_str(), "catalog cache hit");
                    return Ok(cached);
                }
                let fresh = source.bundle(&locale, &code).await?;
                cache.save(&producer_key, fresh.clone());
                Ok(fresh)
            })
            .await
    }

    /// Reloads the cache policy from remote configuration.
    ///
    /// The new TTLs apply to every subsequent read, including reads of
    /// entries cached under the old policy.
    #[instrument(skip(self))]
    pub async fn refresh_policy(&self) -> Result<CachePolicy> {
        let fresh = self.source.cache_policy().await?;
        *self.policy.write() = fresh.clone();
        info!(?fresh, "cache policy refreshed");
        Ok(fresh)
    }

    /// Returns the currently active cache policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy.read().clone()
    }

    /// Drops every cached catalog payload.
    ///
    /// The next read per key fetches from the source. Used by the
    /// pull-to-refresh path.
    pub fn clear_cache(&self) {
        self.countries.clear();
        self.regions.clear();
        self.bundle_pages.clear();
        self.bundle_details.clear();
    }
}

fn effective_locale(raw: &str) -> String {
    let locale = raw.trim().to_lowercase();
    if locale.is_empty() {
        DEFAULT_LOCALE.to_owned()
    } else {
        locale
    }
}
