//! Query input line and the suggestion dropdown beneath it.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

/// Rows the dropdown may occupy, borders included.
const DROPDOWN_MAX_ROWS: u16 = 8;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let loading = app.suggestions.is_loading();
    let title = if loading {
        " Symbol (looking up...) "
    } else {
        " Symbol "
    };

    let line = if app.query.is_empty() {
        Line::from(Span::styled("Enter stock symbol (e.g. TCS, INFY)", theme::muted()))
    } else {
        Line::from(vec![
            Span::styled(app.query.as_str(), theme::text()),
            Span::styled("_", theme::accent()),
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(Span::styled(title, theme::accent_bold()));
    f.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the dropdown directly under the input, over the top of `content`.
pub fn render_dropdown(f: &mut Frame, input: Rect, content: Rect, app: &AppState) {
    let suggestions = app.visible_suggestions();
    if suggestions.is_empty() || content.height < 3 {
        return;
    }

    let rows = (suggestions.len() as u16 + 2)
        .min(DROPDOWN_MAX_ROWS)
        .min(content.height);
    let area = Rect {
        x: input.x,
        y: content.y,
        width: input.width,
        height: rows,
    };

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|s| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", s.symbol), theme::accent_bold()),
                Span::styled(s.name.as_str(), theme::text()),
                Span::styled(format!("  {} · {}", s.region, s.currency), theme::muted()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::accent())
                .title(Span::styled(" Suggestions ", theme::muted())),
        )
        .highlight_style(theme::accent().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.highlighted);

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
