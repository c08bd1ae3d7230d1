//! Background worker threads: every network call runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The main
//! thread runs two workers, one per lane (series fetches, suggestion
//! lookups), so a slow suggestion never queues behind a chart fetch or the
//! reverse. Every command carries the `RequestId` the main thread issued;
//! the worker echoes it back and never inspects it.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use stocksense_core::{FetchError, MarketData, RequestId, StockInfo, StockSuggestion};

/// Commands sent from the TUI to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    FetchSeries { id: RequestId, symbol: String },
    SearchSymbols { id: RequestId, query: String },
    Shutdown,
}

/// Responses sent from a worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Series {
        id: RequestId,
        result: Result<StockInfo, FetchError>,
    },
    Suggestions {
        id: RequestId,
        matches: Vec<StockSuggestion>,
    },
}

/// Spawn one worker thread serving `rx` until `Shutdown` or disconnect.
pub fn spawn_worker(
    name: &str,
    provider: Arc<dyn MarketData>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("stocksense-{name}"))
        .spawn(move || worker_loop(provider.as_ref(), rx, tx))
}

fn worker_loop(provider: &dyn MarketData, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                if let Some(resp) = handle_command(provider, cmd) {
                    if tx.send(resp).is_err() {
                        // UI is gone.
                        break;
                    }
                }
            }
        }
    }
    tracing::debug!(provider = provider.name(), "worker exiting");
}

fn handle_command(provider: &dyn MarketData, cmd: WorkerCommand) -> Option<WorkerResponse> {
    match cmd {
        WorkerCommand::FetchSeries { id, symbol } => {
            let result = provider.fetch_daily_series(&symbol);
            Some(WorkerResponse::Series { id, result })
        }
        WorkerCommand::SearchSymbols { id, query } => {
            let matches = provider.search_symbols(&query);
            Some(WorkerResponse::Suggestions { id, matches })
        }
        WorkerCommand::Shutdown => None,
    }
}
