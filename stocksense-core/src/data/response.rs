//! Alpha Vantage response decoding.
//!
//! Provider JSON is decoded once, here, into explicit variants. Sentinel
//! fields (`Error Message`, `Note`, `Information`) short-circuit payload
//! parsing regardless of what else the object contains.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

const ERROR_FIELD: &str = "Error Message";
const NOTE_FIELD: &str = "Note";
const INFORMATION_FIELD: &str = "Information";
const TIME_SERIES_FIELD: &str = "Time Series (Daily)";
const META_FIELD: &str = "Meta Data";
const MATCHES_FIELD: &str = "bestMatches";

/// `Meta Data` block of a `TIME_SERIES_DAILY` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMetaData {
    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: String,
    #[serde(rename = "5. Time Zone", default)]
    pub time_zone: String,
}

#[derive(Debug, Deserialize)]
struct RawDailyEntry {
    #[serde(rename = "4. close")]
    close: String,
}

/// One entry of `bestMatches` in a `SYMBOL_SEARCH` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name")]
    pub name: String,
    #[serde(rename = "3. type")]
    pub kind: String,
    #[serde(rename = "4. region")]
    pub region: String,
    #[serde(rename = "5. marketOpen")]
    pub market_open: String,
    #[serde(rename = "6. marketClose")]
    pub market_close: String,
    #[serde(rename = "7. timezone")]
    pub timezone: String,
    #[serde(rename = "8. currency")]
    pub currency: String,
}

/// Decoded `TIME_SERIES_DAILY` response.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesResponse {
    ErrorField(String),
    RateLimitField(String),
    MissingTimeSeries,
    MissingMetadata,
    Series {
        meta: RawMetaData,
        /// Closing prices keyed by trading day, ascending.
        closes: BTreeMap<NaiveDate, f64>,
    },
    Malformed(String),
}

/// Decoded `SYMBOL_SEARCH` response.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    ErrorField(String),
    RateLimitField(String),
    Matches(Vec<RawMatch>),
    Malformed(String),
}

enum Sentinel {
    Error(String),
    RateLimit(String),
}

fn sentinel(obj: &Map<String, Value>) -> Option<Sentinel> {
    if let Some(v) = obj.get(ERROR_FIELD) {
        return Some(Sentinel::Error(field_text(v)));
    }
    obj.get(NOTE_FIELD)
        .or_else(|| obj.get(INFORMATION_FIELD))
        .map(|v| Sentinel::RateLimit(field_text(v)))
}

fn field_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_object(body: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(obj)) => Ok(obj),
        Ok(other) => Err(format!("expected a JSON object, got {other}")),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

pub fn decode_series(body: &str) -> SeriesResponse {
    let mut obj = match parse_object(body) {
        Ok(obj) => obj,
        Err(reason) => return SeriesResponse::Malformed(reason),
    };

    match sentinel(&obj) {
        Some(Sentinel::Error(msg)) => return SeriesResponse::ErrorField(msg),
        Some(Sentinel::RateLimit(msg)) => return SeriesResponse::RateLimitField(msg),
        None => {}
    }

    // A null container counts as absent.
    let Some(series) = obj.remove(TIME_SERIES_FIELD).filter(|v| !v.is_null()) else {
        return SeriesResponse::MissingTimeSeries;
    };
    let Some(meta) = obj.remove(META_FIELD).filter(|v| !v.is_null()) else {
        return SeriesResponse::MissingMetadata;
    };

    let meta: RawMetaData = match serde_json::from_value(meta) {
        Ok(meta) => meta,
        Err(e) => return SeriesResponse::Malformed(format!("meta data: {e}")),
    };
    let entries: BTreeMap<String, RawDailyEntry> = match serde_json::from_value(series) {
        Ok(entries) => entries,
        Err(e) => return SeriesResponse::Malformed(format!("time series: {e}")),
    };

    let mut closes = BTreeMap::new();
    for (day, entry) in entries {
        let date = match NaiveDate::parse_from_str(&day, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => return SeriesResponse::Malformed(format!("date key '{day}': {e}")),
        };
        let close = match entry.close.trim().parse::<f64>() {
            Ok(close) if close.is_finite() => close,
            _ => {
                return SeriesResponse::Malformed(format!(
                    "close price '{}' on {day}",
                    entry.close
                ))
            }
        };
        closes.insert(date, close);
    }

    SeriesResponse::Series { meta, closes }
}

pub fn decode_search(body: &str) -> SearchResponse {
    let mut obj = match parse_object(body) {
        Ok(obj) => obj,
        Err(reason) => return SearchResponse::Malformed(reason),
    };

    match sentinel(&obj) {
        Some(Sentinel::Error(msg)) => return SearchResponse::ErrorField(msg),
        Some(Sentinel::RateLimit(msg)) => return SearchResponse::RateLimitField(msg),
        None => {}
    }

    match obj.remove(MATCHES_FIELD) {
        None | Some(Value::Null) => SearchResponse::Matches(Vec::new()),
        Some(matches) => match serde_json::from_value(matches) {
            Ok(matches) => SearchResponse::Matches(matches),
            Err(e) => SearchResponse::Malformed(format!("best matches: {e}")),
        },
    }
}

/// Error text a provider embedded in a failed HTTP response, if any.
pub fn embedded_message(body: &str) -> Option<String> {
    let obj = parse_object(body).ok()?;
    obj.get(ERROR_FIELD)
        .or_else(|| obj.get(NOTE_FIELD))
        .map(field_text)
}
