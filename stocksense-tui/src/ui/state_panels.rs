//! Placeholder panels for the idle, loading and error states.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;

pub fn render_idle(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Search for an Indian stock to see its last 30 trading days.",
            theme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Try TCS, INFY, RELIANCE or HDFCBANK and press Enter.",
            theme::muted(),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false));
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

pub fn render_loading(f: &mut Frame, area: Rect, symbol: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("Loading {symbol}..."), theme::warning())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning());
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

pub fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::negative())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", theme::muted()),
            Span::styled("Ctrl+R", theme::accent_bold()),
            Span::styled(" to try again", theme::muted()),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(Span::styled(" Error ", theme::negative()));
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
