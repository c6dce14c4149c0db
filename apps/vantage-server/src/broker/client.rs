//! HTTP client for the Alpaca trading API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::api_types::{AlpacaApiError, AlpacaOrder, AlpacaPosition, PortfolioHistory};
use super::error::AlpacaError;
use crate::config::Credentials;

/// Client for the Alpaca trading REST API.
///
/// Holds the credential headers and the per-request timeout. There is no
/// retry loop: a failed or stalled call is reported as a failure for that
/// call, and the caller decides whether to degrade or abort.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl AlpacaClient {
    /// Create a client against the given base endpoint.
    ///
    /// Fails with [`AlpacaError::AuthenticationFailed`] when either
    /// credential is empty; there is no point issuing requests that the
    /// upstream will reject wholesale.
    pub fn new(
        credentials: Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AlpacaError> {
        if credentials.api_key().is_empty() || credentials.api_secret().is_empty() {
            return Err(AlpacaError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AlpacaError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            credentials,
        })
    }

    /// Fetch open positions.
    pub async fn positions(&self) -> Result<Vec<AlpacaPosition>, AlpacaError> {
        self.get("/v2/positions").await
    }

    /// Fetch one year of daily portfolio equity history.
    pub async fn portfolio_history(&self) -> Result<PortfolioHistory, AlpacaError> {
        self.get("/v2/account/portfolio/history?period=1A&timeframe=1D")
            .await
    }

    /// Fetch recent orders, newest first, fills included.
    pub async fn orders(&self) -> Result<Vec<AlpacaOrder>, AlpacaError> {
        self.get("/v2/orders?status=all&limit=100&nested=true")
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlpacaError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("APCA-API-KEY-ID", self.credentials.api_key())
            .header("APCA-API-SECRET-KEY", self.credentials.api_secret())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AlpacaError::Timeout(e.to_string())
                } else {
                    AlpacaError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| AlpacaError::Network(e.to_string()))?;
            return serde_json::from_str(&text).map_err(|e| AlpacaError::JsonParse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        Err(categorize_failure(status, &body))
    }
}

/// Map an HTTP failure to the client error taxonomy.
fn categorize_failure(status: StatusCode, body: &str) -> AlpacaError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AlpacaError::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => AlpacaError::RateLimited,
        _ => {
            let (code, message) = match serde_json::from_str::<AlpacaApiError>(body) {
                Ok(err) => (
                    err.code
                        .map_or_else(|| status.as_u16().to_string(), |c| c.to_string()),
                    err.message,
                ),
                Err(_) => (status.as_u16().to_string(), body.to_string()),
            };
            AlpacaError::Api { code, message }
        }
    }
}
