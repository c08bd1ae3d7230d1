//! Client configuration. The API key comes from the environment (or a
//! `.env` file next to the binary), never from source.

use std::time::Duration;

use thiserror::Error;

pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key: set ALPHAVANTAGE_API_KEY in the environment or a .env file")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load `.env` if present, then read the API key from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_err() {
            tracing::debug!("no .env file loaded");
        }
        Self::from_key(std::env::var(API_KEY_VAR).ok())
    }

    fn from_key(key: Option<String>) -> Result<Self, ConfigError> {
        match key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(ConfigError::MissingApiKey),
        }
    }
}

// Keep the key out of logs and panic messages.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
