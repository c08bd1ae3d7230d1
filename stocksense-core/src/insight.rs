//! Templated commentary over a daily price series.
//!
//! Pure arithmetic: first/last/min/max of the closes, formatted into fixed
//! sentences. No network, no state.

use std::cmp::Ordering;

use thiserror::Error;

use crate::domain::{Insight, PricePoint, Trend};

/// Currency glyph prefixed to every price.
pub const CURRENCY: &str = "₹";

/// Above this absolute percent change the move is labelled "significant".
pub const SIGNIFICANT_MOVE_PCT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightError {
    #[error("No price history available to analyse")]
    EmptySeries,

    #[error("Price history starts at an invalid price ({0}). Please try another symbol.")]
    InvalidBasePrice(f64),
}

fn endpoints(data: &[PricePoint]) -> Result<(f64, f64), InsightError> {
    match (data.first(), data.last()) {
        (Some(first), Some(last)) if first.price.is_finite() && first.price > 0.0 => {
            Ok((first.price, last.price))
        }
        (Some(first), Some(_)) => Err(InsightError::InvalidBasePrice(first.price)),
        _ => Err(InsightError::EmptySeries),
    }
}

/// Percent change from the first to the last point.
pub fn percent_change(data: &[PricePoint]) -> Result<f64, InsightError> {
    let (first, last) = endpoints(data)?;
    Ok((last - first) / first * 100.0)
}

pub fn generate_insight(symbol: &str, data: &[PricePoint]) -> Result<Insight, InsightError> {
    let (first, last) = endpoints(data)?;
    let change = percent_change(data)?;
    let high = data.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
    let low = data.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);

    let trend = match last.partial_cmp(&first) {
        Some(Ordering::Greater) => Trend::Up,
        Some(Ordering::Less) => Trend::Down,
        _ => Trend::Neutral,
    };

    // Only an uptrend reads as an increase; a flat series is worded as a decrease.
    let direction = match trend {
        Trend::Up => "increase",
        Trend::Down | Trend::Neutral => "decrease",
    };
    let volatility = if change.abs() > SIGNIFICANT_MOVE_PCT {
        "significant"
    } else {
        "moderate"
    };
    let analysis = format!(
        "{symbol} has shown a {:.2}% {direction} over the analyzed period. \
         The stock has been displaying {volatility} volatility.",
        change.abs()
    );

    let metrics = vec![
        format!("Current Price: {}", money(last)),
        format!("Price Change: {change:.2}%"),
        format!("30-Day High: {}", money(high)),
        format!("30-Day Low: {}", money(low)),
    ];

    let recommendations = vec![
        format!(
            "Monitor {symbol}'s price movement around {} level",
            money(last)
        ),
        "Consider the overall market sentiment before making investment decisions".to_string(),
        "Watch for any upcoming corporate announcements or events".to_string(),
        "Diversify your portfolio to manage risk".to_string(),
    ];

    Ok(Insight {
        trend,
        analysis,
        metrics,
        recommendations,
    })
}

/// `₹` followed by the amount to two decimals.
pub fn money(amount: f64) -> String {
    format!("{CURRENCY}{amount:.2}")
}
