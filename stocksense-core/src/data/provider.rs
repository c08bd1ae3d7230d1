//! Market-data trait, transport seam and structured error types.
//!
//! `MarketData` is what the UI worker talks to. `HttpTransport` is the single
//! network collaborator underneath the Alpha Vantage client, so tests can
//! script provider responses and count outbound calls.

use thiserror::Error;

use crate::domain::{StockInfo, StockSuggestion};

/// Shown for any network or HTTP failure that carries no provider message.
pub const GENERIC_FETCH_MESSAGE: &str =
    "Failed to fetch stock data. Please check the symbol and try again.";

/// Failure of a daily-series fetch.
///
/// `Display` is the exact user-facing message shown in the error panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Please enter a stock symbol")]
    Validation,

    /// The provider's `Error Message` field, verbatim.
    #[error("{0}")]
    Provider(String),

    /// The provider's rate-limit sentinel (`Note`) was present.
    #[error("API call frequency limit reached. Please try again in a minute.")]
    RateLimited,

    /// HTTP 429 from the transport.
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    #[error("No data available for this symbol")]
    NoData,

    #[error("Invalid API response format")]
    MalformedResponse,

    /// Network or HTTP failure other than 429.
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether the failure is a rate limit of either kind.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, FetchError::RateLimited | FetchError::RateLimitExceeded)
    }
}

/// Raw HTTP response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure below the HTTP layer (DNS, connect, timeout, body read).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// One GET against the provider's query endpoint.
pub trait HttpTransport: Send + Sync {
    fn get(&self, query: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;
}

/// The two operations the dashboard needs from a market-data provider.
pub trait MarketData: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Best-effort symbol lookup. Never fails; degrades to an empty list.
    fn search_symbols(&self, query: &str) -> Vec<StockSuggestion>;

    /// Fetch the most recent daily closes for a symbol, oldest first.
    fn fetch_daily_series(&self, symbol: &str) -> Result<StockInfo, FetchError>;
}
