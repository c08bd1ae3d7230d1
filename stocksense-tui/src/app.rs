//! Application state: single owner on the main thread.
//!
//! Holds the query being typed, the suggestion dropdown, the request state
//! machines from `stocksense_core`, and the channels to the two workers.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use stocksense_core::debounce::SUGGESTION_DEBOUNCE;
use stocksense_core::{
    Debouncer, FetchError, FetchTicket, RequestState, SearchController, StockSuggestion,
    SuggestionTracker,
};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

pub struct AppState {
    pub running: bool,
    pub query: String,
    pub dropdown_open: bool,
    pub highlighted: Option<usize>,
    pub search: SearchController,
    pub suggestions: SuggestionTracker,
    pub status_message: Option<(String, StatusLevel)>,
    pub worker_rx: Receiver<WorkerResponse>,
    debouncer: Debouncer<String>,
    series_tx: Sender<WorkerCommand>,
    suggest_tx: Sender<WorkerCommand>,
}

impl AppState {
    pub fn new(
        series_tx: Sender<WorkerCommand>,
        suggest_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            running: true,
            query: String::new(),
            dropdown_open: false,
            highlighted: None,
            search: SearchController::new(),
            suggestions: SuggestionTracker::new(),
            status_message: None,
            worker_rx,
            debouncer: Debouncer::new(SUGGESTION_DEBOUNCE),
            series_tx,
            suggest_tx,
        }
    }

    pub fn state(&self) -> &RequestState {
        self.search.state()
    }

    /// Suggestions currently shown, empty when the dropdown is closed.
    pub fn visible_suggestions(&self) -> &[StockSuggestion] {
        if self.dropdown_open {
            self.suggestions.suggestions()
        } else {
            &[]
        }
    }

    // ── Query editing ──────────────────────────────────────────────────

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.on_query_changed(now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        if self.query.pop().is_some() {
            self.on_query_changed(now);
        }
    }

    pub fn clear_query(&mut self, now: Instant) {
        if !self.query.is_empty() {
            self.query.clear();
            self.on_query_changed(now);
        }
    }

    /// Typing never searches; it only schedules a debounced suggestion lookup.
    fn on_query_changed(&mut self, now: Instant) {
        self.highlighted = None;
        if self.query.trim().is_empty() {
            self.debouncer.reset();
            self.suggestions.clear();
            self.dropdown_open = false;
            return;
        }
        self.debouncer.update(self.query.clone(), now);
        self.dropdown_open = true;
    }

    /// Drive time-based work from the event loop.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.request_suggestions(&query);
        }
    }

    fn request_suggestions(&mut self, query: &str) {
        let Some(id) = self.suggestions.begin(query) else {
            return;
        };
        tracing::debug!(id = id.0, query, "requesting suggestions");
        let cmd = WorkerCommand::SearchSymbols {
            id,
            query: query.to_string(),
        };
        if self.suggest_tx.send(cmd).is_err() {
            self.suggestions.clear();
            self.set_warning("Suggestion worker is not running");
        }
    }

    // ── Dropdown ───────────────────────────────────────────────────────

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
        self.highlighted = None;
    }

    pub fn highlight_next(&mut self) {
        let len = self.visible_suggestions().len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        let len = self.visible_suggestions().len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    // ── Searching ──────────────────────────────────────────────────────

    /// Explicit search for the current query.
    pub fn submit_search(&mut self) {
        self.debouncer.cancel();
        self.suggestions.clear();
        self.close_dropdown();
        let query = self.query.clone();
        let ticket = self.search.submit(&query);
        self.dispatch(ticket);
    }

    /// Replace the query with the chosen suggestion's symbol and search it.
    pub fn pick_suggestion(&mut self, index: usize) {
        let Some(symbol) = self
            .visible_suggestions()
            .get(index)
            .map(|s| s.symbol.clone())
        else {
            return;
        };
        self.query = symbol;
        self.debouncer.reset();
        self.suggestions.clear();
        self.close_dropdown();
        let ticket = self.search.submit(&self.query.clone());
        self.dispatch(ticket);
    }

    /// Re-run the last search, e.g. from the error panel.
    pub fn retry(&mut self) {
        if self.search.state().is_loading() {
            return;
        }
        let ticket = self.search.retry();
        self.dispatch(ticket);
    }

    fn dispatch(&mut self, ticket: Option<FetchTicket>) {
        let Some(FetchTicket { id, symbol }) = ticket else {
            return;
        };
        self.set_status(format!("Fetching {symbol}..."));
        if self
            .series_tx
            .send(WorkerCommand::FetchSeries { id, symbol })
            .is_err()
        {
            let err = FetchError::Unknown("Series worker is not running".into());
            self.search.complete(id, Err(err));
            self.set_error("Series worker is not running");
        }
    }

    // ── Worker responses ───────────────────────────────────────────────

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Series { id, result } => {
                let rate_limited = matches!(&result, Err(e) if e.is_rate_limit());
                if !self.search.complete(id, result) {
                    return;
                }
                match self.search.state() {
                    RequestState::Success { info, insight } => {
                        let msg = format!(
                            "{}: {} days loaded, trend {}",
                            info.symbol,
                            info.data.len(),
                            insight.trend.label()
                        );
                        self.set_status(msg);
                    }
                    RequestState::Error { message } => {
                        let msg = message.clone();
                        if rate_limited {
                            self.set_warning(msg);
                        } else {
                            self.set_error(msg);
                        }
                    }
                    _ => {}
                }
            }
            WorkerResponse::Suggestions { id, matches } => {
                if !self.suggestions.complete(id, matches) {
                    return;
                }
                self.highlighted = None;
                self.dropdown_open = !self.query.trim().is_empty();
            }
        }
    }

    // ── Status bar ─────────────────────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use stocksense_core::RequestId;

    use crate::test_helpers::{sample_info, suggestion};

    pub(crate) struct Harness {
        pub app: AppState,
        pub series_rx: Receiver<WorkerCommand>,
        pub suggest_rx: Receiver<WorkerCommand>,
        #[allow(dead_code)]
        pub resp_tx: Sender<WorkerResponse>,
    }

    pub(crate) fn harness() -> Harness {
        let (series_tx, series_rx) = mpsc::channel();
        let (suggest_tx, suggest_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        Harness {
            app: AppState::new(series_tx, suggest_tx, resp_rx),
            series_rx,
            suggest_rx,
            resp_tx,
        }
    }

    fn type_str(app: &mut AppState, s: &str, now: Instant) {
        for c in s.chars() {
            app.push_char(c, now);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn typing_never_fetches_series() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "tcs", t0);
        h.app.tick(t0 + ms(1000));
        assert!(h.series_rx.try_recv().is_err());
        assert_eq!(h.app.state(), &RequestState::Idle);
    }

    #[test]
    fn suggestions_requested_after_debounce() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "tc", t0);
        h.app.tick(t0 + ms(100));
        assert!(h.suggest_rx.try_recv().is_err());

        h.app.push_char('s', t0 + ms(150));
        h.app.tick(t0 + ms(449));
        assert!(h.suggest_rx.try_recv().is_err());
        h.app.tick(t0 + ms(450));
        match h.suggest_rx.try_recv().unwrap() {
            WorkerCommand::SearchSymbols { query, .. } => assert_eq!(query, "tcs"),
            other => panic!("expected lookup, got {other:?}"),
        }
        assert!(h.suggest_rx.try_recv().is_err());
    }

    #[test]
    fn clearing_query_clears_suggestions_immediately() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "tc", t0);
        h.app.tick(t0 + ms(300));
        let id = match h.suggest_rx.try_recv().unwrap() {
            WorkerCommand::SearchSymbols { id, .. } => id,
            other => panic!("expected lookup, got {other:?}"),
        };
        h.app.handle_response(WorkerResponse::Suggestions {
            id,
            matches: vec![suggestion("TCS.BSE", "TCS")],
        });
        assert_eq!(h.app.visible_suggestions().len(), 1);

        h.app.pop_char(t0 + ms(400));
        h.app.pop_char(t0 + ms(400));
        assert!(h.app.visible_suggestions().is_empty());
        h.app.tick(t0 + ms(2000));
        assert!(h.suggest_rx.try_recv().is_err());
    }

    #[test]
    fn retyping_same_query_after_clear_looks_up_again() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "tcs", t0);
        h.app.tick(t0 + ms(300));
        assert!(h.suggest_rx.try_recv().is_ok());

        h.app.clear_query(t0 + ms(400));
        type_str(&mut h.app, "tcs", t0 + ms(450));
        h.app.tick(t0 + ms(750));
        assert!(h.suggest_rx.try_recv().is_ok());
    }

    #[test]
    fn submit_dispatches_uppercased_symbol() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "infy", t0);
        h.app.submit_search();
        match h.series_rx.try_recv().unwrap() {
            WorkerCommand::FetchSeries { symbol, .. } => assert_eq!(symbol, "INFY"),
            other => panic!("expected fetch, got {other:?}"),
        }
        assert!(h.app.state().is_loading());
        // Pending lookup is cancelled by the submit.
        h.app.tick(t0 + ms(1000));
        assert!(h.suggest_rx.try_recv().is_err());
    }

    #[test]
    fn in_flight_lookup_does_not_reopen_dropdown_after_submit() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "tcs", t0);
        h.app.tick(t0 + ms(300));
        let WorkerCommand::SearchSymbols { id, .. } = h.suggest_rx.try_recv().unwrap() else {
            panic!("expected lookup");
        };

        h.app.submit_search();
        h.app.handle_response(WorkerResponse::Suggestions {
            id,
            matches: vec![suggestion("TCS.BSE", "TCS")],
        });

        assert!(!h.app.dropdown_open);
        assert!(h.app.visible_suggestions().is_empty());
        assert!(h.app.state().is_loading());
    }

    #[test]
    fn blank_submit_shows_validation_error() {
        let mut h = harness();
        h.app.submit_search();
        assert!(h.series_rx.try_recv().is_err());
        assert_eq!(
            h.app.state().error_message(),
            Some("Please enter a stock symbol")
        );
    }

    #[test]
    fn pick_suggestion_sets_query_and_searches() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "tata", t0);
        h.app.tick(t0 + ms(300));
        let id = match h.suggest_rx.try_recv().unwrap() {
            WorkerCommand::SearchSymbols { id, .. } => id,
            other => panic!("expected lookup, got {other:?}"),
        };
        h.app.handle_response(WorkerResponse::Suggestions {
            id,
            matches: vec![
                suggestion("TATAMOTORS.BSE", "Tata Motors"),
                suggestion("TATASTEEL.BSE", "Tata Steel"),
            ],
        });

        h.app.highlight_next();
        h.app.highlight_next();
        assert_eq!(h.app.highlighted, Some(1));
        h.app.pick_suggestion(1);

        assert_eq!(h.app.query, "TATASTEEL.BSE");
        assert!(h.app.visible_suggestions().is_empty());
        match h.series_rx.try_recv().unwrap() {
            WorkerCommand::FetchSeries { symbol, .. } => assert_eq!(symbol, "TATASTEEL.BSE"),
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn highlight_wraps() {
        let mut h = harness();
        let t0 = Instant::now();
        type_str(&mut h.app, "t", t0);
        h.app.tick(t0 + ms(300));
        let WorkerCommand::SearchSymbols { id, .. } = h.suggest_rx.try_recv().unwrap() else {
            panic!("expected lookup");
        };
        h.app.handle_response(WorkerResponse::Suggestions {
            id,
            matches: vec![suggestion("A.BSE", "A"), suggestion("B.BSE", "B")],
        });
        h.app.highlight_prev();
        assert_eq!(h.app.highlighted, Some(1));
        h.app.highlight_next();
        assert_eq!(h.app.highlighted, Some(0));
    }

    proptest::proptest! {
        /// Any walk over the dropdown keeps the highlight on a real row.
        #[test]
        fn highlight_stays_in_range(
            len in 1usize..10,
            moves in proptest::collection::vec(proptest::bool::ANY, 0..40),
        ) {
            let mut h = harness();
            let t0 = Instant::now();
            h.app.push_char('a', t0);
            h.app.tick(t0 + ms(300));
            let WorkerCommand::SearchSymbols { id, .. } = h.suggest_rx.try_recv().unwrap() else {
                panic!("expected lookup");
            };
            let matches = (0..len)
                .map(|i| suggestion(&format!("S{i}.BSE"), "Stock"))
                .collect();
            h.app.handle_response(WorkerResponse::Suggestions { id, matches });

            for down in moves {
                if down {
                    h.app.highlight_next();
                } else {
                    h.app.highlight_prev();
                }
                let i = h.app.highlighted.unwrap();
                proptest::prop_assert!(i < len);
            }
        }
    }

    #[test]
    fn series_success_updates_status() {
        let mut h = harness();
        h.app.query = "TCS".into();
        h.app.submit_search();
        let WorkerCommand::FetchSeries { id, .. } = h.series_rx.try_recv().unwrap() else {
            panic!("expected fetch");
        };
        h.app.handle_response(WorkerResponse::Series {
            id,
            result: Ok(sample_info("TCS", &[100.0, 110.0])),
        });
        assert!(matches!(h.app.state(), RequestState::Success { .. }));
        let (msg, level) = h.app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Info);
        assert!(msg.contains("TCS"));
    }

    #[test]
    fn stale_series_response_is_ignored() {
        let mut h = harness();
        h.app.query = "TCS".into();
        h.app.submit_search();
        h.app.query = "INFY".into();
        h.app.submit_search();

        h.app.handle_response(WorkerResponse::Series {
            id: RequestId(1),
            result: Err(FetchError::RateLimited),
        });
        assert!(h.app.state().is_loading());
    }

    #[test]
    fn error_then_retry() {
        let mut h = harness();
        h.app.query = "WIPRO".into();
        h.app.submit_search();
        let WorkerCommand::FetchSeries { id, .. } = h.series_rx.try_recv().unwrap() else {
            panic!("expected fetch");
        };
        h.app.handle_response(WorkerResponse::Series {
            id,
            result: Err(FetchError::RateLimitExceeded),
        });
        assert_eq!(
            h.app.state().error_message(),
            Some("API rate limit exceeded. Please try again later.")
        );
        assert_eq!(h.app.status_message.as_ref().unwrap().1, StatusLevel::Warning);

        h.app.retry();
        match h.series_rx.try_recv().unwrap() {
            WorkerCommand::FetchSeries { symbol, .. } => assert_eq!(symbol, "WIPRO"),
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn dead_worker_surfaces_error() {
        let mut h = harness();
        drop(h.series_rx);
        h.app.query = "TCS".into();
        h.app.submit_search();
        assert_eq!(
            h.app.state().error_message(),
            Some("Series worker is not running")
        );
    }
}
