//! StockSense India: terminal dashboard for Indian equities.
//!
//! Type a symbol to get suggestions, press Enter to load its last 30 daily
//! closes as a chart with a templated insight card underneath.

mod app;
mod input;
mod logging;
mod theme;
mod ui;
mod worker;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use stocksense_core::{AlphaVantageClient, ClientConfig, MarketData};

use crate::app::AppState;
use crate::worker::WorkerCommand;

/// Event poll timeout; also the debounce resolution.
const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "stocksense", version, about = "Stock charts and insights for Indian equities")]
struct Args {
    /// Search this symbol as soon as the dashboard opens.
    #[arg(long)]
    symbol: Option<String>,

    /// Directory for log files (defaults to the user cache dir).
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = args.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    let _log_guard = logging::init(&log_dir)?;

    let config = ClientConfig::from_env().context("loading Alpha Vantage configuration")?;
    tracing::info!(config = ?config, "starting stocksense");
    let client = AlphaVantageClient::from_config(&config)?;
    let provider: Arc<dyn MarketData> = Arc::new(client);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // One worker per lane, sharing a response channel.
    let (series_tx, series_rx) = mpsc::channel();
    let (suggest_tx, suggest_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let series_worker =
        worker::spawn_worker("series", provider.clone(), series_rx, resp_tx.clone())?;
    let suggest_worker = worker::spawn_worker("suggest", provider, suggest_rx, resp_tx)?;

    let mut app = AppState::new(series_tx.clone(), suggest_tx.clone(), resp_rx);
    if let Some(symbol) = args.symbol {
        app.query = symbol;
        app.submit_search();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Shutdown workers. An in-flight request finishes first; its result is dropped.
    let _ = series_tx.send(WorkerCommand::Shutdown);
    let _ = suggest_tx.send(WorkerCommand::Shutdown);
    let _ = series_worker.join();
    let _ = suggest_worker.join();

    tracing::info!("stocksense exited");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }

        // 3. Poll for input events
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key, Instant::now());
            }
        }

        // 4. Debounced suggestion lookups
        app.tick(Instant::now());

        if !app.running {
            break;
        }
    }
    Ok(())
}
