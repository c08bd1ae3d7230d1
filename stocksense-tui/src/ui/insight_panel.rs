//! Insight card: analysis paragraph, trend badge, then metrics and
//! recommendations side by side.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use stocksense_core::Insight;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, insight: &Insight) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(Span::styled(" Insights ", theme::accent_bold()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(inner);

    let color = theme::trend_color(insight.trend);
    let header = vec![
        Line::from(vec![
            Span::styled("Trend: ", theme::muted()),
            Span::styled(
                format!(
                    "{} {}",
                    theme::trend_glyph(insight.trend),
                    insight.trend.label().to_uppercase()
                ),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(insight.analysis.as_str(), theme::text())),
    ];
    f.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    f.render_widget(bullet_list("Key Metrics", &insight.metrics), cols[0]);
    f.render_widget(bullet_list("Recommendations", &insight.recommendations), cols[1]);
}

fn bullet_list<'a>(title: &'a str, items: &'a [String]) -> Paragraph<'a> {
    let mut lines = vec![Line::from(Span::styled(title, theme::accent_bold()))];
    lines.extend(items.iter().map(|item| {
        Line::from(vec![
            Span::styled("• ", theme::accent()),
            Span::styled(item.as_str(), theme::text()),
        ])
    }));
    Paragraph::new(lines).wrap(Wrap { trim: true })
}
