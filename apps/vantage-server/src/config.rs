//! Server configuration, loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default HTTP listen port.
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default trade history lookback, three months.
const DEFAULT_TRADE_WINDOW_DAYS: i64 = 90;

/// Upstream request timeout bound.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Trading environment (paper vs live).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Paper trading environment (simulated).
    #[default]
    Paper,
    /// Live trading environment (real money).
    Live,
}

impl Environment {
    /// Parse environment from string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "LIVE" => Self::Live,
            _ => Self::Paper,
        }
    }

    /// Base URL of the trading API for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Paper => "https://paper-api.alpaca.markets",
            Self::Live => "https://api.alpaca.markets",
        }
    }

    /// Check if this is the live environment.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Get the environment name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "PAPER",
            Self::Live => "LIVE",
        }
    }
}

/// Brokerage API credentials.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credential pair is absent.
    #[error(
        "missing brokerage credentials: set APCA_API_KEY_ID and APCA_API_SECRET_KEY in the environment"
    )]
    MissingCredentials,
}

/// Parsed server configuration.
///
/// None of these options affect the numeric semantics of the dashboard
/// computation; they only select endpoints, paths, and windows.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Brokerage credentials.
    pub credentials: Credentials,
    /// Trading environment.
    pub environment: Environment,
    /// Base endpoint of the trading API.
    pub base_url: String,
    /// HTTP listen port.
    pub http_port: u16,
    /// Directory holding the flat-file data sources.
    pub data_dir: PathBuf,
    /// Directory with the browser assets.
    pub static_dir: PathBuf,
    /// Trade history lookback in days.
    pub trade_window_days: i64,
    /// Upstream request timeout.
    pub timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Uses the original Alpaca variable names (`APCA_API_KEY_ID`,
    /// `APCA_API_SECRET_KEY`, optional `APCA_API_BASE_URL` override);
    /// `VANTAGE_ENV` selects the paper or live endpoint when no explicit
    /// override is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("APCA_API_KEY_ID").unwrap_or_default();
        let api_secret = std::env::var("APCA_API_SECRET_KEY").unwrap_or_default();
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        let environment = std::env::var("VANTAGE_ENV")
            .map(|v| Environment::from_str_case_insensitive(&v))
            .unwrap_or_default();

        let base_url = std::env::var("APCA_API_BASE_URL")
            .unwrap_or_else(|_| environment.base_url().to_string());

        let http_port: u16 = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into()));
        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()));

        let trade_window_days: i64 = std::env::var("TRADE_WINDOW_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TRADE_WINDOW_DAYS);

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
            environment,
            base_url,
            http_port,
            data_dir,
            static_dir,
            trade_window_days,
            timeout: UPSTREAM_TIMEOUT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_environment_is_default() {
        assert_eq!(Environment::from_str_case_insensitive("anything"), Environment::Paper);
        assert_eq!(Environment::from_str_case_insensitive("live"), Environment::Live);
        assert_eq!(Environment::from_str_case_insensitive("LIVE"), Environment::Live);
    }

    #[test]
    fn environment_base_urls() {
        assert!(Environment::Paper.base_url().contains("paper"));
        assert!(!Environment::Live.base_url().contains("paper"));
        assert!(Environment::Live.is_live());
        assert!(!Environment::Paper.is_live());
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = Credentials::new("real-key".to_string(), "real-secret".to_string());
        let output = format!("{creds:?}");
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("real-key"));
        assert!(!output.contains("real-secret"));
    }
}
