//! Market-data access: provider trait, Alpha Vantage client, HTTP transport.

pub mod alpha_vantage;
pub mod http;
pub mod provider;
pub mod response;

pub use alpha_vantage::{normalize_symbol, AlphaVantageClient};
pub use http::ReqwestTransport;
pub use provider::{FetchError, HttpResponse, HttpTransport, MarketData, TransportError};
