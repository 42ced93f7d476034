//! HTTP client for the Roam catalog API.
//!
//! Thin transport: builds requests, maps failures onto [`RoamError`], and
//! decodes JSON payloads. Caching, coalescing, and retries all live above
//! this layer.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use roam_core::constants::DEFAULT_TIMEOUT_SECONDS;
use roam_core::error::{Result, RoamError};
use roam_core::traits::CatalogSource;
use roam_core::types::{
    BundleDetail, BundleQuery, BundleSummary, CachePolicy, Country, Page, Region,
};

/// Catalog client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the catalog API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Production catalog API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.roam.app";

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP client for the catalog API.
pub struct CatalogClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl CatalogClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Issues a GET and decodes the JSON response body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoamError::Timeout(e.to_string())
                } else {
                    RoamError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(path, status = status.as_u16(), "catalog API error");
            return Err(RoamError::Api {
                status: status.as_u16(),
                message: message.trim().to_owned(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RoamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    #[instrument(skip(self))]
    async fn countries(&self, locale: &str) -> Result<Vec<Country>> {
        let countries: Vec<Country> = self
            .get_json("v1/catalog/countries", &[("locale", locale.to_owned())])
            .await?;
        debug!(locale, count = countries.len(), "fetched countries");
        Ok(countries)
    }

    #[instrument(skip(self))]
    async fn regions(&self, locale: &str) -> Result<Vec<Region>> {
        let regions: Vec<Region> = self
            .get_json("v1/catalog/regions", &[("locale", locale.to_owned())])
            .await?;
        debug!(locale, count = regions.len(), "fetched regions");
        Ok(regions)
    }

    #[instrument(skip(self))]
    async fn bundles(&self, locale: &str, query: &BundleQuery) -> Result<Page<BundleSummary>> {
        let mut params = vec![
            ("locale", locale.to_owned()),
            ("page", query.page.to_string()),
        ];
        if let Some(country) = &query.country {
            params.push(("country", country.clone()));
        }
        if let Some(region) = &query.region {
            params.push(("region", region.clone()));
        }

        let page: Page<BundleSummary> = self.get_json("v1/catalog/bundles", &params).await?;
        debug!(locale, page = page.page, count = page.items.len(), "fetched bundle page");
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn bundle(&self, locale: &str, code: &str) -> Result<BundleDetail> {
        let path = format!("v1/catalog/bundles/{code}");
        match self
            .get_json::<BundleDetail>(&path, &[("locale", locale.to_owned())])
            .await
        {
            Err(RoamError::Api { status: 404, .. }) => Err(RoamError::NotFound(code.to_owned())),
            other => other,
        }
    }

    #[instrument(skip(self))]
    async fn cache_policy(&self) -> Result<CachePolicy> {
        let policy: CachePolicy = self.get_json("v1/config/cache", &[]).await?;
        debug!(?policy, "fetched cache policy");
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::new(server.uri())
    }

    #[tokio::test]
    async fn test_countries_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/catalog/countries"))
            .and(query_param("locale", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"code": "HK", "name": "Hong Kong"},
                {"code": "JP", "name": "Japan"}
            ])))
            .mount(&server)
            .await;

        let countries = client_for(&server).countries("en").await.unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0], Country::new("HK", "Hong Kong"));
    }

    #[tokio::test]
    async fn test_bundles_forwards_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/catalog/bundles"))
            .and(query_param("locale", "en"))
            .and(query_param("page", "2"))
            .and(query_param("country", "hk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "code": "hk-5gb-30d",
                    "name": "Hong Kong 5 GB",
                    "data_mb": 5120,
                    "validity_days": 30,
                    "price_cents": 1299,
                    "currency": "USD"
                }],
                "page": 2,
                "page_size": 20,
                "total": 21
            })))
            .mount(&server)
            .await;

        let query = BundleQuery::default().on_page(2).for_country("hk");
        let page = client_for(&server).bundles("en", &query).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.items[0].code, "hk-5gb-30d");
        assert!(page.is_last());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/catalog/regions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance\n"))
            .mount(&server)
            .await;

        let err = client_for(&server).regions("en").await.unwrap_err();
        match err {
            RoamError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_bundle_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/catalog/bundles/xx-0gb"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such bundle"))
            .mount(&server)
            .await;

        let err = client_for(&server).bundle("en", "xx-0gb").await.unwrap_err();
        assert!(matches!(err, RoamError::NotFound(code) if code == "xx-0gb"));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/catalog/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).countries("en").await.unwrap_err();
        assert!(matches!(err, RoamError::Decode(_)));
    }

    #[tokio::test]
    async fn test_cache_policy_partial_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/config/cache"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"countries_ttl_secs": 60})),
            )
            .mount(&server)
            .await;

        let policy = client_for(&server).cache_policy().await.unwrap();
        assert_eq!(policy.countries_ttl_secs, 60);
        assert_eq!(policy, CachePolicy { countries_ttl_secs: 60, ..Default::default() });
    }
}
