//! Top-level UI layout: header, search line, content area, status bar.
//!
//! The suggestion dropdown is drawn last so it floats over the content.

pub mod chart_panel;
pub mod insight_panel;
pub mod search_bar;
pub mod state_panels;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use stocksense_core::RequestState;

use crate::app::AppState;
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    search_bar::render(f, chunks[1], app);
    render_content(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    search_bar::render_dropdown(f, chunks[1], chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" StockSense India ", theme::accent_bold()),
        Span::styled("daily closes and insights for Indian equities", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_content(f: &mut Frame, area: Rect, app: &AppState) {
    match app.state() {
        RequestState::Idle => state_panels::render_idle(f, area),
        RequestState::Loading { request } => state_panels::render_loading(f, area, &request.symbol),
        RequestState::Error { message } => state_panels::render_error(f, area, message),
        RequestState::Success { info, insight } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            chart_panel::render(f, rows[0], info, insight.trend);
            insight_panel::render(f, rows[1], insight);
        }
    }
}
