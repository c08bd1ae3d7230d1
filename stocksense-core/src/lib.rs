//! StockSense core: market-data client, insight generator and request state.
//!
//! This crate holds everything the dashboard does that is not rendering:
//! - Domain types (price points, series metadata, suggestions, insights)
//! - Alpha Vantage client with typed response decoding and error mapping
//! - Templated insight generation over a daily series
//! - Trailing-edge debounce for autocomplete
//! - Sequenced request state machines that drop stale completions

pub mod config;
pub mod controller;
pub mod data;
pub mod debounce;
pub mod domain;
pub mod insight;

pub use config::{ClientConfig, ConfigError};
pub use controller::{FetchTicket, RequestId, RequestState, SearchController, SuggestionTracker};
pub use data::{AlphaVantageClient, FetchError, MarketData};
pub use debounce::Debouncer;
pub use domain::{Insight, PricePoint, SeriesMetadata, StockInfo, StockSuggestion, Trend};
pub use insight::{generate_insight, InsightError};
