use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;
use crate::tui::form::FormField;

use super::*;

/// Keys while the creation popup is open
pub(super) fn handle_form_key(app: &mut App, key: KeyEvent) {
    let in_detail = app.form.as_ref().is_some_and(|f| f.field == FormField::Detail);
    if key.code == KeyCode::Enter && in_detail {
        if let Some((buf, cursor)) = app.form.as_mut().and_then(|f| f.focused_text_mut()) {
            insert_newline(buf, cursor);
        }
        return;
    }
    if key.code == KeyCode::Enter || is_commit(&key) {
        app.submit_form();
        return;
    }
    if key.code == KeyCode::Esc {
        app.cancel_form();
        return;
    }

    let Some(form) = app.form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        _ if form.field.is_text() => {
            if let Some((buf, cursor)) = form.focused_text_mut() {
                edit_text(buf, cursor, key);
            }
        }
        _ => {
            if let Some(forward) = selector_direction(&key) {
                form.cycle_selector(forward);
            }
        }
    }
}
