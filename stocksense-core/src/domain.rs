//! Domain types shared by the client, the insight generator and the UI.
//!
//! Everything here is immutable once built and crosses the worker channel,
//! so all types are `Send + Sync` plain data.

use serde::{Deserialize, Serialize};

/// Number of daily observations kept from a provider response (one trading month).
pub const SERIES_LEN: usize = 30;

/// One daily closing price, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Display-formatted date (`d/m/yyyy`).
    pub date: String,
    pub price: f64,
}

/// Provider metadata copied verbatim from the series response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub last_updated: String,
    pub timezone: String,
}

/// A successfully fetched daily series for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    /// The symbol exactly as the caller supplied it (not exchange-normalized).
    pub symbol: String,
    /// Ascending by date, oldest first, at most [`SERIES_LEN`] points.
    pub data: Vec<PricePoint>,
    pub metadata: SeriesMetadata,
}

impl StockInfo {
    pub fn latest(&self) -> Option<&PricePoint> {
        self.data.last()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.data.iter().map(|p| p.price).collect()
    }
}

/// A symbol-search match, restricted to the Indian market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSuggestion {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub region: String,
    pub market_open: String,
    pub market_close: String,
    pub timezone: String,
    pub currency: String,
}

/// Direction of the series from its first to its last close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Neutral => "neutral",
        }
    }
}

/// Templated commentary derived from a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub trend: Trend,
    pub analysis: String,
    pub metrics: Vec<String>,
    pub recommendations: Vec<String>,
}
