//! Brokerage client error types.

use thiserror::Error;

/// Errors from the Alpaca client.
#[derive(Debug, Error, Clone)]
pub enum AlpacaError {
    /// Credentials were rejected (or absent).
    #[error("brokerage authentication failed")]
    AuthenticationFailed,

    /// The API quota was exhausted.
    #[error("brokerage rate limit exceeded")]
    RateLimited,

    /// The request did not complete within the timeout bound.
    #[error("brokerage request timed out: {0}")]
    Timeout(String),

    /// Network-level failure.
    #[error("brokerage network error: {0}")]
    Network(String),

    /// The API answered with an error payload.
    #[error("brokerage API error {code}: {message}")]
    Api {
        /// HTTP status or Alpaca error code.
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("brokerage response parse error: {0}")]
    JsonParse(String),
}

impl AlpacaError {
    /// Whether this failure must fail the whole aggregated response.
    ///
    /// Auth and quota failures affect every resource identically, so
    /// continuing with per-source defaults would only hide the problem.
    /// Everything else degrades locally to an empty substitute.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::AuthenticationFailed | Self::RateLimited)
    }
}
