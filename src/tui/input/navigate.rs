use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::sort::SortKey;
use crate::tui::app::{App, Mode, RowField, today};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.display.len().saturating_sub(1);
        }

        KeyCode::Char('a') | KeyCode::Char('+') => app.open_form(today()),

        KeyCode::Char('e') => enter_edit(app),
        KeyCode::Enter => {
            let Some(id) = app.cursor_task_id() else {
                return;
            };
            if app.row(id).is_some_and(|row| row.is_editing()) {
                app.save_row(id);
            } else {
                enter_edit(app);
            }
        }

        KeyCode::Char('s') | KeyCode::Char(' ') => cycle_status(app, true),
        KeyCode::Char('S') => cycle_status(app, false),

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.cursor_task_id() {
                app.delete_task(id);
            }
        }

        KeyCode::Char('1') => app.sort_by(SortKey::Title),
        KeyCode::Char('2') => app.sort_by(SortKey::Importance),
        KeyCode::Char('3') => app.sort_by(SortKey::Deadline),
        KeyCode::Char('4') => app.sort_by(SortKey::Status),
        KeyCode::Char('0') => app.clear_sort(),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    if app.display.is_empty() {
        return;
    }
    let max = app.display.len() - 1;
    app.cursor = app.cursor.saturating_add_signed(delta).min(max);
}

/// Put the row under the cursor into Editing (if it is not already) and focus its title
fn enter_edit(app: &mut App) {
    let Some(id) = app.cursor_task_id() else {
        return;
    };
    app.begin_edit(id);
    app.mode = Mode::Edit;
    app.field = RowField::Title;
    app.edit_cursor = app.row(id).map_or(0, |row| row.draft().title.len());
}

/// Step the status of the row under the cursor; works whether or not the row is editing
pub(super) fn cycle_status(app: &mut App, forward: bool) {
    let Some(id) = app.cursor_task_id() else {
        return;
    };
    let Some(current) = app.row(id).map(|row| row.draft().status) else {
        return;
    };
    let next = if forward {
        current.next()
    } else {
        current.prev()
    };
    app.set_row_status(id, next, Instant::now());
}
