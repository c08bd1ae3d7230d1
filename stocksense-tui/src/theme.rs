//! Indigo theme tokens for the StockSense dashboard.
//!
//! # Color Palette
//! - **Accent**: Indigo (focus, titles, chart line)
//! - **Positive**: Green (uptrend)
//! - **Negative**: Rose (downtrend, errors)
//! - **Warning**: Amber (loading, rate limits)
//! - **Neutral**: Violet (flat trend, secondary info)
//! - **Muted**: Slate (hints, axis labels)

use ratatui::style::{Color, Modifier, Style};

use stocksense_core::Trend;

pub const ACCENT: Color = Color::Rgb(99, 102, 241);
pub const POSITIVE: Color = Color::Rgb(34, 197, 94);
pub const NEGATIVE: Color = Color::Rgb(244, 63, 94);
pub const WARNING: Color = Color::Rgb(245, 158, 11);
pub const NEUTRAL: Color = Color::Rgb(167, 139, 250);
pub const MUTED: Color = Color::Rgb(148, 163, 184);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Border style for a focused / unfocused block.
pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Up => POSITIVE,
        Trend::Down => NEGATIVE,
        Trend::Neutral => NEUTRAL,
    }
}

/// Arrow glyph shown next to the trend label.
pub fn trend_glyph(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Neutral => "■",
    }
}
