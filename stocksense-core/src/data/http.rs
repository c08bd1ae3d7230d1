//! Blocking reqwest transport for the provider's query endpoint.

use super::provider::{HttpResponse, HttpTransport, TransportError};
use crate::config::{ClientConfig, ConfigError};

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("stocksense/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, query: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(query)
            .send()
            .map_err(map_reqwest_error)?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(map_reqwest_error)?;
        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    // The URL carries the API key; strip it before the message reaches logs.
    let e = e.without_url();
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::NetworkUnreachable(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
