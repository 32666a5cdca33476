//! Polygon aggregates client.
//!
//! One GET per call, no retries and no caching at this layer. Failures are
//! classified into [`MarketDataError`] variants so callers never see raw
//! status codes.
//!
//! # API Endpoint
//!
//! `GET {base}/v2/aggs/ticker/{symbol}/range/1/day/{from}/{to}?adjusted=true&sort=asc&limit={n}&apiKey={key}`

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};
use reqwest::{Client, StatusCode};

use crate::errors::MarketDataError;

const BASE_URL: &str = "https://api.polygon.io";
const PROVIDER_ID: &str = "POLYGON";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of results requested when the caller does not specify a limit.
pub const DEFAULT_AGGS_LIMIT: u32 = 120;

/// Environment variable holding the Polygon API key.
const API_KEY_ENV: &str = "POLYGON_API_KEY";
/// Optional environment override for the provider base URL (used by tests).
const BASE_URL_ENV: &str = "POLYGON_BASE_URL";

/// Connection settings for the Polygon client.
#[derive(Debug, Clone)]
pub struct PolygonConfig {
    pub api_key: String,
    pub base_url: String,
}

impl PolygonConfig {
    /// Create a config for the production Polygon endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read the configuration from the environment.
    ///
    /// `POLYGON_API_KEY` is required; `POLYGON_BASE_URL` optionally overrides
    /// the endpoint.
    pub fn from_env() -> Result<Self, MarketDataError> {
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| MarketDataError::InvalidRequest(format!("{} is not set", API_KEY_ENV)))?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

/// Seam between the domain layer and a concrete provider client.
///
/// The ingestion service depends on this trait, not on [`PolygonClient`],
/// so tests can substitute a canned-response stub.
#[async_trait]
pub trait BarDataClient: Send + Sync {
    /// Fetch the raw aggregates response body for one symbol and date range.
    ///
    /// `from`/`to` are ISO `YYYY-MM-DD` strings; `limit` defaults to
    /// [`DEFAULT_AGGS_LIMIT`] when `None`.
    async fn fetch_aggregates(
        &self,
        symbol: &str,
        from: &str,
        to: &str,
        limit: Option<u32>,
    ) -> Result<String, MarketDataError>;
}

/// Polygon client holding an explicitly constructed HTTP client.
///
/// This is a plain value injected into the ingestion service at construction
/// time; there is no shared process-wide instance.
pub struct PolygonClient {
    client: Client,
    config: PolygonConfig,
}

impl PolygonClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PolygonConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    fn aggregates_url(&self, symbol: &str, from: &str, to: &str, limit: u32) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}?adjusted=true&sort=asc&limit={}&apiKey={}",
            self.config.base_url,
            urlencoding::encode(symbol),
            from,
            to,
            limit,
            self.config.api_key
        )
    }
}

#[async_trait]
impl BarDataClient for PolygonClient {
    async fn fetch_aggregates(
        &self,
        symbol: &str,
        from: &str,
        to: &str,
        limit: Option<u32>,
    ) -> Result<String, MarketDataError> {
        if symbol.trim().is_empty() {
            return Err(MarketDataError::InvalidRequest(
                "Stock symbol cannot be empty".to_string(),
            ));
        }
        if from.trim().is_empty() {
            return Err(MarketDataError::InvalidRequest(
                "From date cannot be empty".to_string(),
            ));
        }
        if to.trim().is_empty() {
            return Err(MarketDataError::InvalidRequest(
                "To date cannot be empty".to_string(),
            ));
        }

        let limit = limit.unwrap_or(DEFAULT_AGGS_LIMIT);
        if limit == 0 {
            return Err(MarketDataError::InvalidRequest(
                "Limit must be greater than zero".to_string(),
            ));
        }

        let url = self.aggregates_url(symbol, from, to, limit);

        info!(
            "Fetching daily bars for symbol {} from {} to {}",
            symbol, from, to
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let err = classify_status(status, symbol, detail);
            error!("{} request failed for {}: {}", PROVIDER_ID, symbol, err);
            return Err(err);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            error!("{} returned an empty body for {}", PROVIDER_ID, symbol);
            return Err(MarketDataError::EmptyResponse);
        }

        Ok(body)
    }
}

/// Map a non-2xx HTTP status to its error variant.
fn classify_status(status: StatusCode, symbol: &str, detail: String) -> MarketDataError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MarketDataError::Unauthorized(
            "Authentication error with provider. Check your API key.".to_string(),
        ),
        StatusCode::NOT_FOUND => MarketDataError::SymbolNotFound(symbol.to_string()),
        StatusCode::TOO_MANY_REQUESTS => MarketDataError::RateLimited,
        s if s.is_client_error() => MarketDataError::ClientError {
            status: s.as_u16(),
            message: detail,
        },
        s if s.is_server_error() => MarketDataError::ServerError {
            status: s.as_u16(),
            message: detail,
        },
        s => MarketDataError::Unexpected(format!(
            "unhandled response status {} from provider: {}",
            s, detail
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> PolygonClient {
        PolygonClient::new(PolygonConfig::new("key-123"))
    }

    #[test]
    fn test_aggregates_url_shape() {
        let client = test_client();
        let url = client.aggregates_url("AAPL", "2023-01-01", "2023-01-31", 120);
        assert_eq!(
            url,
            "https://api.polygon.io/v2/aggs/ticker/AAPL/range/1/day/2023-01-01/2023-01-31\
             ?adjusted=true&sort=asc&limit=120&apiKey=key-123"
        );
    }

    #[test]
    fn test_aggregates_url_encodes_symbol() {
        let client = test_client();
        let url = client.aggregates_url("BRK/B", "2023-01-01", "2023-01-31", 50);
        assert!(url.contains("/v2/aggs/ticker/BRK%2FB/range/1/day/"));
    }

    #[test]
    fn test_base_url_override() {
        let client = PolygonClient::new(
            PolygonConfig::new("key-123").with_base_url("http://localhost:8080"),
        );
        let url = client.aggregates_url("AAPL", "2023-01-01", "2023-01-02", 1);
        assert!(url.starts_with("http://localhost:8080/v2/aggs/ticker/"));
    }

    #[tokio::test]
    async fn test_blank_inputs_are_rejected_before_any_network_call() {
        let client = test_client();

        let err = client
            .fetch_aggregates("  ", "2023-01-01", "2023-01-31", None)
            .await
            .expect_err("blank symbol must be rejected");
        assert!(matches!(err, MarketDataError::InvalidRequest(_)));

        let err = client
            .fetch_aggregates("AAPL", "", "2023-01-31", None)
            .await
            .expect_err("blank from date must be rejected");
        assert!(matches!(err, MarketDataError::InvalidRequest(_)));

        let err = client
            .fetch_aggregates("AAPL", "2023-01-01", " ", None)
            .await
            .expect_err("blank to date must be rejected");
        assert!(matches!(err, MarketDataError::InvalidRequest(_)));

        let err = client
            .fetch_aggregates("AAPL", "2023-01-01", "2023-01-31", Some(0))
            .await
            .expect_err("zero limit must be rejected");
        assert!(matches!(err, MarketDataError::InvalidRequest(_)));
    }

    #[test]
    fn test_classify_auth_statuses() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = classify_status(status, "AAPL", String::new());
            assert!(matches!(err, MarketDataError::Unauthorized(_)));
        }
    }

    #[test]
    fn test_classify_not_found_names_the_symbol() {
        let err = classify_status(StatusCode::NOT_FOUND, "MISSING", String::new());
        match err {
            MarketDataError::SymbolNotFound(symbol) => assert_eq!(symbol, "MISSING"),
            other => panic!("expected SymbolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_rate_limited() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "AAPL", String::new());
        assert!(matches!(err, MarketDataError::RateLimited));
    }

    #[test]
    fn test_classify_other_client_error_keeps_detail() {
        let err = classify_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            "AAPL",
            "unknown query parameter".to_string(),
        );
        match err {
            MarketDataError::ClientError { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "unknown query parameter");
            }
            other => panic!("expected ClientError, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_server_error() {
        let err = classify_status(StatusCode::BAD_GATEWAY, "AAPL", "bad gateway".to_string());
        match err {
            MarketDataError::ServerError { status, .. } => assert_eq!(status, 502),
            other => panic!("expected ServerError, got {:?}", other),
        }
    }
}
