//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers every way a provider interaction can fail:
//! request validation, transport, HTTP status classification, payload-level
//! upstream errors, and undecodable responses. Per-record malformation during
//! parsing is deliberately NOT an error here; it is returned as skip metadata
//! on [`crate::models::ParsedBars`].

use thiserror::Error;

/// Errors that can occur while fetching or decoding provider data.
///
/// Each variant corresponds to one observable failure condition, so callers
/// can map them to distinct outcomes without string matching.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request was rejected before any network call was made
    /// (blank symbol, blank date, zero limit, missing API key).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered 2xx with an empty body.
    #[error("Received empty response from provider")]
    EmptyResponse,

    /// The provider rejected our credentials (HTTP 401/403).
    #[error("Authentication error with provider: {0}")]
    Unauthorized(String),

    /// The requested symbol or resource does not exist (HTTP 404).
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    /// The core never retries; surfacing this lets the boundary decide.
    #[error("Rate limit exceeded for provider")]
    RateLimited,

    /// Any other 4xx response, with the upstream detail preserved.
    #[error("Provider client error ({status}): {message}")]
    ClientError {
        /// The HTTP status code returned by the provider
        status: u16,
        /// The upstream response detail
        message: String,
    },

    /// A 5xx response from the provider.
    #[error("Provider server error ({status}): {message}")]
    ServerError {
        /// The HTTP status code returned by the provider
        status: u16,
        /// The upstream response detail
        message: String,
    },

    /// A transport-level failure (connect, TLS, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload carried an embedded `error` field.
    #[error("Provider error: {message}")]
    UpstreamError {
        /// The message embedded in the provider payload
        message: String,
    },

    /// The payload carried a `status` field that was not "OK".
    #[error("Provider returned status: {status}")]
    UpstreamStatus {
        /// The non-OK status value
        status: String,
    },

    /// The response body could not be decoded as JSON at all.
    /// Distinct from per-record skips, which never abort a batch.
    #[error("Response parsing failure: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// Anything that does not fit the taxonomy above, wrapping the cause.
    #[error("Unexpected provider error: {0}")]
    Unexpected(String),
}
