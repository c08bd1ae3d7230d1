//! Request state machines for the dashboard.
//!
//! `SearchController` owns the single top-level `RequestState`
//! (Idle → Loading → Success | Error → Loading → …). `SuggestionTracker`
//! owns the autocomplete list. Both tag every outbound request with a
//! `RequestId` and drop completions that are not for the latest request,
//! so a slow earlier response can never overwrite a newer one.

use crate::data::provider::FetchError;
use crate::domain::{Insight, StockInfo, StockSuggestion};
use crate::insight::generate_insight;

/// Monotonic tag for an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// A series fetch the caller must perform and report back via `complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: RequestId,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading { request: FetchTicket },
    Success { info: StockInfo, insight: Insight },
    Error { message: String },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SearchController {
    state: RequestState,
    next_id: u64,
    latest: Option<RequestId>,
    last_query: Option<String>,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            next_id: 0,
            latest: None,
            last_query: None,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Explicit search action. A blank query goes straight to `Error`
    /// without issuing a ticket.
    pub fn submit(&mut self, query: &str) -> Option<FetchTicket> {
        let symbol = query.trim().to_uppercase();
        if symbol.is_empty() {
            self.latest = None;
            self.last_query = None;
            self.state = RequestState::Error {
                message: FetchError::Validation.to_string(),
            };
            return None;
        }

        self.next_id += 1;
        let ticket = FetchTicket {
            id: RequestId(self.next_id),
            symbol: symbol.clone(),
        };
        self.latest = Some(ticket.id);
        self.last_query = Some(symbol);
        self.state = RequestState::Loading {
            request: ticket.clone(),
        };
        tracing::info!(id = ticket.id.0, symbol = %ticket.symbol, "search submitted");
        Some(ticket)
    }

    /// Re-trigger the last submitted search. After a blank submit there is
    /// nothing to retry and the validation error stays on screen.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let query = self.last_query.clone()?;
        self.submit(&query)
    }

    /// Apply a fetch completion. Returns `false` when the completion is stale
    /// and was discarded.
    pub fn complete(&mut self, id: RequestId, result: Result<StockInfo, FetchError>) -> bool {
        if self.latest != Some(id) {
            tracing::debug!(id = id.0, "discarding stale series completion");
            return false;
        }
        self.latest = None;

        self.state = match result {
            Ok(info) => match generate_insight(&info.symbol, &info.data) {
                Ok(insight) => RequestState::Success { info, insight },
                Err(e) => RequestState::Error {
                    message: e.to_string(),
                },
            },
            Err(e) => {
                tracing::warn!(id = id.0, error = %e, "series fetch failed");
                RequestState::Error {
                    message: e.to_string(),
                }
            }
        };
        true
    }
}

/// Autocomplete list with its own request sequence.
#[derive(Debug, Default)]
pub struct SuggestionTracker {
    suggestions: Vec<StockSuggestion>,
    next_id: u64,
    latest: Option<RequestId>,
}

impl SuggestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suggestions(&self) -> &[StockSuggestion] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.latest.is_some()
    }

    /// Start a lookup for a debounced query. A blank query clears the list,
    /// supersedes any in-flight lookup, and issues no request.
    pub fn begin(&mut self, query: &str) -> Option<RequestId> {
        if query.trim().is_empty() {
            self.clear();
            return None;
        }
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.latest = Some(id);
        Some(id)
    }

    /// Apply a lookup result. Returns `false` when it was stale.
    pub fn complete(&mut self, id: RequestId, suggestions: Vec<StockSuggestion>) -> bool {
        if self.latest != Some(id) {
            return false;
        }
        self.latest = None;
        self.suggestions = suggestions;
        true
    }

    pub fn clear(&mut self) {
        self.latest = None;
        self.suggestions.clear();
    }
}
