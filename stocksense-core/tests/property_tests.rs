//! Property tests for insight and request-state invariants.
//!
//! Uses proptest to verify:
//! 1. Shape: four metrics and four recommendations for any non-empty series
//! 2. Trend sign: Up/Down/Neutral follow last vs first exactly
//! 3. High/low bracket every price and the current price
//! 4. Debounce: bursts faster than the delay emit only the final value
//! 5. Sequencing: only the latest request's completion is ever applied

use std::time::{Duration, Instant};

use proptest::prelude::*;
use stocksense_core::debounce::Debouncer;
use stocksense_core::insight::{generate_insight, percent_change};
use stocksense_core::{
    FetchError, PricePoint, RequestState, SearchController, SeriesMetadata, StockInfo, Trend,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (0.01..100_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_series() -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec(arb_price(), 1..=30).prop_map(|prices| {
        prices
            .into_iter()
            .enumerate()
            .map(|(i, price)| PricePoint {
                date: format!("{}/3/2024", i + 1),
                price,
            })
            .collect()
    })
}

fn stock_info(symbol: &str, data: Vec<PricePoint>) -> StockInfo {
    StockInfo {
        symbol: symbol.to_string(),
        data,
        metadata: SeriesMetadata {
            last_updated: "2024-03-30".into(),
            timezone: "US/Eastern".into(),
        },
    }
}

// ── 1–3. Insight invariants ──────────────────────────────────────────

proptest! {
    #[test]
    fn always_four_metrics_and_recommendations(series in arb_series()) {
        let insight = generate_insight("TCS", &series).unwrap();
        prop_assert_eq!(insight.metrics.len(), 4);
        prop_assert_eq!(insight.recommendations.len(), 4);
    }

    #[test]
    fn trend_follows_last_versus_first(series in arb_series()) {
        let insight = generate_insight("INFY", &series).unwrap();
        let first = series[0].price;
        let last = series[series.len() - 1].price;
        let expected = if last > first {
            Trend::Up
        } else if last < first {
            Trend::Down
        } else {
            Trend::Neutral
        };
        prop_assert_eq!(insight.trend, expected);

        let change = percent_change(&series).unwrap();
        match insight.trend {
            Trend::Up => prop_assert!(change > 0.0),
            Trend::Down => prop_assert!(change < 0.0),
            Trend::Neutral => prop_assert!(change == 0.0),
        }
    }

    #[test]
    fn flat_series_is_neutral(price in arb_price(), len in 1usize..=30) {
        let series: Vec<PricePoint> = (0..len)
            .map(|i| PricePoint { date: format!("{}/3/2024", i + 1), price })
            .collect();
        let insight = generate_insight("HDFCBANK", &series).unwrap();
        prop_assert_eq!(insight.trend, Trend::Neutral);
    }

    #[test]
    fn analysis_names_symbol_and_current_price(series in arb_series()) {
        let insight = generate_insight("WIPRO", &series).unwrap();
        let last = series[series.len() - 1].price;
        prop_assert!(insight.analysis.starts_with("WIPRO has shown a "));
        prop_assert_eq!(&insight.metrics[0], &format!("Current Price: ₹{last:.2}"));
    }

    #[test]
    fn high_and_low_bracket_the_series(series in arb_series()) {
        let insight = generate_insight("SBIN", &series).unwrap();
        let high = series.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
        let low = series.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        prop_assert_eq!(&insight.metrics[2], &format!("30-Day High: ₹{high:.2}"));
        prop_assert_eq!(&insight.metrics[3], &format!("30-Day Low: ₹{low:.2}"));
        prop_assert!(low <= high);
    }
}

// ── 4. Debounce ──────────────────────────────────────────────────────

proptest! {
    /// Changes arriving faster than the delay never emit anything but the last value.
    #[test]
    fn burst_emits_only_final_value(
        values in prop::collection::vec(0u32..1000, 1..20),
        gap_ms in 1u64..299,
    ) {
        let delay = Duration::from_millis(300);
        let t0 = Instant::now();
        let mut d = Debouncer::new(delay);
        let mut emitted = Vec::new();

        // Make consecutive values distinct so every update is a real change.
        let distinct: Vec<u32> = values
            .iter()
            .enumerate()
            .map(|(i, v)| v * 100 + i as u32)
            .collect();

        let mut at = t0;
        for v in &distinct {
            d.update(*v, at);
            emitted.extend(d.poll(at));
            at += Duration::from_millis(gap_ms);
        }
        let last_update = at - Duration::from_millis(gap_ms);
        emitted.extend(d.poll(last_update + delay));

        prop_assert_eq!(emitted, vec![*distinct.last().unwrap()]);
    }
}

// ── 5. Sequencing ────────────────────────────────────────────────────

proptest! {
    /// Completing requests in any order leaves the state reflecting the newest one.
    #[test]
    fn newest_request_wins_regardless_of_completion_order(
        order in Just((0usize..5).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let mut c = SearchController::new();
        let tickets: Vec<_> = ["TCS", "INFY", "WIPRO", "SBIN", "ITC"]
            .iter()
            .map(|s| c.submit(s).unwrap())
            .collect();

        for idx in order {
            let t = &tickets[idx];
            let data = vec![
                PricePoint { date: "1/3/2024".into(), price: 100.0 },
                PricePoint { date: "2/3/2024".into(), price: 100.0 + idx as f64 },
            ];
            let applied = c.complete(t.id, Ok(stock_info(&t.symbol, data)));
            prop_assert_eq!(applied, idx == 4);
        }

        match c.state() {
            RequestState::Success { info, .. } => prop_assert_eq!(info.symbol.as_str(), "ITC"),
            other => prop_assert!(false, "expected ITC success, got {:?}", other),
        }
    }

    /// A stale failure never replaces a newer success.
    #[test]
    fn stale_error_never_overwrites_success(symbol in "[A-Z]{2,8}") {
        let mut c = SearchController::new();
        let old = c.submit("OLD").unwrap();
        let new = c.submit(&symbol).unwrap();
        let data = vec![PricePoint { date: "1/3/2024".into(), price: 10.0 }];
        prop_assert!(c.complete(new.id, Ok(stock_info(&symbol, data))));
        prop_assert!(!c.complete(old.id, Err(FetchError::RateLimited)));
        let is_success = matches!(c.state(), RequestState::Success { .. });
        prop_assert!(is_success);
    }
}
