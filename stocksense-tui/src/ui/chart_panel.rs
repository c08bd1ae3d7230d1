//! Line chart of daily closes: dates along x, rupee prices along y.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use stocksense_core::insight::money;
use stocksense_core::{StockInfo, Trend};

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, info: &StockInfo, trend: Trend) {
    let prices = info.prices();
    let (y_min, y_max) = y_bounds(&prices);
    let x_max = prices.len().saturating_sub(1) as f64;

    let data: Vec<(f64, f64)> = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as f64, p))
        .collect();

    let dataset = Dataset::default()
        .name(info.symbol.as_str())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::trend_color(trend)))
        .graph_type(GraphType::Line)
        .data(&data);

    let latest = info.latest().map(|p| money(p.price)).unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(Span::styled(
            format!(" {} · {latest} · last {} days ", info.symbol, prices.len()),
            theme::accent_bold(),
        ))
        .title_bottom(Line::from(Span::styled(
            format!(
                " Last updated: {} ({}) ",
                info.metadata.last_updated, info.metadata.timezone
            ),
            theme::muted(),
        )));

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels(info)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price (₹)", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(money(y_min), theme::muted()),
                    Span::styled(money((y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(money(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Price range with 5% headroom; a flat series still gets a visible band.
fn y_bounds(prices: &[f64]) -> (f64, f64) {
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let padding = match (max - min).abs() * 0.05 {
        p if p > 0.0 => p,
        _ => (max.abs() * 0.05).max(1.0),
    };
    (min - padding, max + padding)
}

/// First, middle and last dates of the series.
fn x_labels(info: &StockInfo) -> Vec<Span<'_>> {
    let data = &info.data;
    match data.len() {
        0 => Vec::new(),
        1 => vec![Span::styled(data[0].date.as_str(), theme::muted())],
        n => vec![
            Span::styled(data[0].date.as_str(), theme::muted()),
            Span::styled(data[n / 2].date.as_str(), theme::muted()),
            Span::styled(data[n - 1].date.as_str(), theme::muted()),
        ],
    }
}
