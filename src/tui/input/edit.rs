use crossterm::event::{KeyCode, KeyEvent};

use crate::model::TaskId;
use crate::tui::app::{App, Mode, RowField};
use crate::tui::row::RowController;

use super::*;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(id) = app.cursor_task_id() else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        // Leave the keyboard focus; the row keeps its draft and stays in Editing
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter if app.field == RowField::Detail => {
            insert_row_newline(app, id);
        }
        _ if key.code == KeyCode::Enter || is_commit(&key) => {
            app.save_row(id);
            app.mode = Mode::Navigate;
        }
        KeyCode::Tab => focus_field(app, id, app.field.step(true)),
        KeyCode::BackTab => focus_field(app, id, app.field.step(false)),
        _ => match app.field {
            RowField::Status => {
                if let Some(forward) = selector_direction(&key) {
                    cycle_status(app, forward);
                }
            }
            RowField::Importance => {
                if let Some(forward) = selector_direction(&key) {
                    cycle_importance(app, id, forward);
                }
            }
            RowField::Title | RowField::Deadline | RowField::Detail => {
                edit_row_text(app, id, key);
            }
        },
    }
}

/// Left steps a selector back; Right or Space steps it forward
pub(super) fn selector_direction(key: &KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Right | KeyCode::Char(' ') => Some(true),
        KeyCode::Left => Some(false),
        _ => None,
    }
}

fn focus_field(app: &mut App, id: TaskId, field: RowField) {
    app.field = field;
    app.edit_cursor = app
        .row(id)
        .and_then(|row| row_text(row, field))
        .map_or(0, |text| text.len());
}

fn row_text(row: &RowController, field: RowField) -> Option<&str> {
    match field {
        RowField::Title => Some(&row.draft().title),
        RowField::Deadline => Some(row.deadline_text()),
        RowField::Detail => Some(&row.draft().detail),
        RowField::Importance | RowField::Status => None,
    }
}

fn cycle_importance(app: &mut App, id: TaskId, forward: bool) {
    if let Some(row) = app.rows.get_mut(&id) {
        let current = row.draft().importance;
        row.set_importance(if forward {
            current.next()
        } else {
            current.prev()
        });
    }
}

fn insert_row_newline(app: &mut App, id: TaskId) {
    let Some(row) = app.rows.get_mut(&id) else {
        return;
    };
    let mut detail = row.draft().detail.clone();
    insert_newline(&mut detail, &mut app.edit_cursor);
    row.set_detail(detail);
}

fn edit_row_text(app: &mut App, id: TaskId, key: KeyEvent) {
    let field = app.field;
    let Some(row) = app.rows.get_mut(&id) else {
        return;
    };
    let Some(mut buf) = row_text(row, field).map(str::to_string) else {
        return;
    };
    if !edit_text(&mut buf, &mut app.edit_cursor, key) {
        return;
    }
    match field {
        RowField::Title => row.set_title(buf),
        RowField::Deadline => row.set_deadline_text(buf),
        RowField::Detail => row.set_detail(buf),
        RowField::Importance | RowField::Status => false,
    };
}
