//! Test helpers: a canned `MarketData` and sample domain values.

use stocksense_core::{FetchError, MarketData, PricePoint, SeriesMetadata, StockInfo, StockSuggestion};

/// In-memory provider. Every fetch returns the same series (or error) with
/// the requested symbol; every lookup returns the same matches.
pub struct MockMarketData {
    series: Result<Vec<f64>, FetchError>,
    matches: Vec<StockSuggestion>,
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self {
            series: Err(FetchError::NoData),
            matches: Vec::new(),
        }
    }
}

impl MockMarketData {
    pub fn rising() -> Self {
        Self {
            series: Ok((0..30).map(|i| 100.0 + i as f64).collect()),
            matches: vec![suggestion("TCS.BSE", "Tata Consultancy Services Limited")],
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            series: Err(err),
            matches: Vec::new(),
        }
    }
}

impl MarketData for MockMarketData {
    fn name(&self) -> &str {
        "mock"
    }

    fn search_symbols(&self, _query: &str) -> Vec<StockSuggestion> {
        self.matches.clone()
    }

    fn fetch_daily_series(&self, symbol: &str) -> Result<StockInfo, FetchError> {
        self.series
            .clone()
            .map(|prices| sample_info(symbol, &prices))
    }
}

pub fn sample_info(symbol: &str, prices: &[f64]) -> StockInfo {
    StockInfo {
        symbol: symbol.to_string(),
        data: prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: format!("{}/3/2024", i + 1),
                price,
            })
            .collect(),
        metadata: SeriesMetadata {
            last_updated: "2024-03-30".into(),
            timezone: "US/Eastern".into(),
        },
    }
}

pub fn suggestion(symbol: &str, name: &str) -> StockSuggestion {
    StockSuggestion {
        symbol: symbol.to_string(),
        name: name.to_string(),
        kind: "Equity".into(),
        region: "India".into(),
        market_open: "09:15".into(),
        market_close: "15:30".into(),
        timezone: "UTC+5.5".into(),
        currency: "INR".into(),
    }
}
