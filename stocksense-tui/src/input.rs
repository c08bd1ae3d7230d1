//! Keyboard input dispatch: global keys, then the dropdown, then the query line.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global chords.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.running = false,
            KeyCode::Char('r') => app.retry(),
            KeyCode::Char('u') => app.clear_query(now),
            _ => {}
        }
        return;
    }

    let dropdown_visible = !app.visible_suggestions().is_empty();

    // 2. Dropdown navigation.
    if dropdown_visible {
        match key.code {
            KeyCode::Down => {
                app.highlight_next();
                return;
            }
            KeyCode::Up => {
                app.highlight_prev();
                return;
            }
            KeyCode::Esc => {
                app.close_dropdown();
                return;
            }
            KeyCode::Enter => {
                if let Some(i) = app.highlighted {
                    app.pick_suggestion(i);
                    return;
                }
            }
            _ => {}
        }
    }

    // 3. Query line.
    match key.code {
        KeyCode::Esc => app.running = false,
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => app.pop_char(now),
        KeyCode::Char(c) => app.push_char(c, now),
        _ => {}
    }
}
