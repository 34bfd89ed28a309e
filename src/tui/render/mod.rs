pub mod form_popup;
pub mod help_overlay;
pub mod status_row;
pub mod table_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar (2 rows) | table | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // table
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_title_bar(frame, app, chunks[0]);
    table_view::render_table_view(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    if app.form.is_some() {
        form_popup::render_form_popup(frame, app, frame.area());
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let bg = app.theme.background;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                " taskpad",
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} open", open_count(app)),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ]),
        Line::from(Span::styled(
            "\u{2500}".repeat(area.width as usize),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn open_count(app: &App) -> usize {
    app.store
        .tasks()
        .iter()
        .filter(|t| t.status != crate::model::Status::Done)
        .count()
}

/// Show line breaks as `↵` so multi-line text fits on one row
pub(super) fn single_line(text: &str) -> String {
    text.replace('\n', "\u{21B5}")
}

/// Insert a block cursor into `text` at byte offset `cursor` (clamped to a char boundary)
pub(super) fn text_with_cursor(text: &str, cursor: usize) -> String {
    let mut at = cursor.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    let mut out = String::with_capacity(text.len() + 3);
    out.push_str(&text[..at]);
    out.push('\u{258C}');
    out.push_str(&text[at..]);
    out
}
