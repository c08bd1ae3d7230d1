//! Alpha Vantage market-data client.
//!
//! Two operations over one query endpoint: `SYMBOL_SEARCH` for autocomplete
//! and `TIME_SERIES_DAILY` for the chart. Each call makes exactly one request;
//! there is no retry and no cache.

use super::http::ReqwestTransport;
use super::provider::{
    FetchError, HttpTransport, MarketData, GENERIC_FETCH_MESSAGE,
};
use super::response::{self, RawMatch, SearchResponse, SeriesResponse};
use crate::config::{ClientConfig, ConfigError};
use crate::domain::{PricePoint, SeriesMetadata, StockInfo, StockSuggestion, SERIES_LEN};

/// Only matches listed on this region are offered as suggestions.
pub const TARGET_REGION: &str = "India";

/// Exchange suffix the provider expects for Indian equities.
pub const EXCHANGE_SUFFIX: &str = ".BSE";

/// Suffixes a user may type that are replaced by [`EXCHANGE_SUFFIX`].
const KNOWN_SUFFIXES: [&str; 2] = [".NS", ".BSE"];

pub struct AlphaVantageClient<T: HttpTransport> {
    transport: T,
    api_key: String,
}

impl AlphaVantageClient<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ReqwestTransport::new(config)?, config.api_key.clone()))
    }
}

impl<T: HttpTransport> AlphaVantageClient<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn search(&self, query: &str) -> Result<Vec<StockSuggestion>, String> {
        let params = [
            ("function", "SYMBOL_SEARCH"),
            ("keywords", query),
            ("apikey", self.api_key.as_str()),
        ];
        tracing::debug!(query, "symbol search");

        let resp = self.transport.get(&params).map_err(|e| e.to_string())?;
        if !resp.is_success() {
            return Err(format!("HTTP {}", resp.status));
        }

        match response::decode_search(&resp.body) {
            SearchResponse::Matches(matches) => Ok(matches
                .into_iter()
                .filter(|m| m.region == TARGET_REGION)
                .map(to_suggestion)
                .collect()),
            SearchResponse::RateLimitField(note) => Err(format!("rate limited: {note}")),
            SearchResponse::ErrorField(msg) => Err(format!("provider error: {msg}")),
            SearchResponse::Malformed(reason) => Err(format!("malformed response: {reason}")),
        }
    }

    fn fetch_series(&self, symbol: &str) -> Result<StockInfo, FetchError> {
        let provider_symbol = normalize_symbol(symbol);
        let params = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", provider_symbol.as_str()),
            ("outputsize", "compact"),
            ("apikey", self.api_key.as_str()),
        ];
        tracing::debug!(symbol, provider_symbol = %provider_symbol, "daily series fetch");

        let resp = self.transport.get(&params).map_err(|e| {
            tracing::warn!(symbol, error = %e, "series transport failure");
            FetchError::Transport(GENERIC_FETCH_MESSAGE.to_string())
        })?;

        if resp.status == 429 {
            return Err(FetchError::RateLimitExceeded);
        }
        if !resp.is_success() {
            tracing::warn!(symbol, status = resp.status, "series HTTP failure");
            let message = response::embedded_message(&resp.body)
                .unwrap_or_else(|| GENERIC_FETCH_MESSAGE.to_string());
            return Err(FetchError::Transport(message));
        }

        match response::decode_series(&resp.body) {
            SeriesResponse::ErrorField(msg) => Err(FetchError::Provider(msg)),
            SeriesResponse::RateLimitField(_) => Err(FetchError::RateLimited),
            SeriesResponse::MissingTimeSeries => Err(FetchError::NoData),
            SeriesResponse::MissingMetadata => Err(FetchError::MalformedResponse),
            SeriesResponse::Malformed(reason) => {
                tracing::warn!(symbol, reason = %reason, "malformed series response");
                Err(FetchError::MalformedResponse)
            }
            SeriesResponse::Series { meta, closes } => {
                let mut data: Vec<PricePoint> = closes
                    .iter()
                    .rev()
                    .take(SERIES_LEN)
                    .map(|(date, &price)| PricePoint {
                        date: display_date(*date),
                        price,
                    })
                    .collect();
                data.reverse();

                Ok(StockInfo {
                    symbol: symbol.to_string(),
                    data,
                    metadata: SeriesMetadata {
                        last_updated: meta.last_refreshed,
                        timezone: meta.time_zone,
                    },
                })
            }
        }
    }
}

impl<T: HttpTransport> MarketData for AlphaVantageClient<T> {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn search_symbols(&self, query: &str) -> Vec<StockSuggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.search(query) {
            Ok(suggestions) => suggestions,
            Err(reason) => {
                tracing::warn!(query, reason = %reason, "symbol search failed");
                Vec::new()
            }
        }
    }

    fn fetch_daily_series(&self, symbol: &str) -> Result<StockInfo, FetchError> {
        self.fetch_series(symbol)
    }
}

/// Upper-case, strip one known exchange suffix, append [`EXCHANGE_SUFFIX`].
pub fn normalize_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    let base = KNOWN_SUFFIXES
        .iter()
        .find_map(|suffix| upper.strip_suffix(suffix))
        .unwrap_or(upper.as_str());
    format!("{base}{EXCHANGE_SUFFIX}")
}

/// Indian-locale short date: day/month/year without zero padding.
pub fn display_date(date: chrono::NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

fn to_suggestion(m: RawMatch) -> StockSuggestion {
    StockSuggestion {
        symbol: m.symbol,
        name: m.name,
        kind: m.kind,
        region: m.region,
        market_open: m.market_open,
        market_close: m.market_close,
        timezone: m.timezone,
        currency: m.currency,
    }
}
