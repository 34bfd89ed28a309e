use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::sort::SortKey;
use crate::tui::app::{App, Mode, RowField};
use crate::tui::row::RowController;
use crate::util::unicode::{fit_to_width, truncate_to_width};

use super::{single_line, text_with_cursor};

const GUTTER_W: usize = 2;
const IMPORTANCE_W: usize = 10;
const DEADLINE_W: usize = 10;
const STATUS_W: usize = 11;
const ACTIONS_W: usize = 12;
const MIN_TITLE_W: usize = 8;
/// Each task takes a main line and a detail line
const LINES_PER_TASK: usize = 2;

fn title_width(total: usize) -> usize {
    let fixed = GUTTER_W + IMPORTANCE_W + DEADLINE_W + STATUS_W + ACTIONS_W + 4;
    total.saturating_sub(fixed).max(MIN_TITLE_W)
}

/// Render the header, the task rows and their detail lines
pub fn render_table_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let title_w = title_width(width);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(header_line(app, title_w));
    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    if app.display.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No tasks yet. Press a to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    // Keep the cursor row on screen
    let body_h = (area.height as usize).saturating_sub(lines.len());
    let visible = (body_h / LINES_PER_TASK).max(1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible {
        app.scroll_offset = app.cursor + 1 - visible;
    }

    for (idx, id) in app
        .display
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
    {
        let Some(row) = app.rows.get(id) else {
            continue;
        };
        let is_cursor = idx == app.cursor;
        let focus = if is_cursor && app.mode == Mode::Edit {
            Some(app.field)
        } else {
            None
        };
        lines.extend(task_lines(app, row, is_cursor, focus, title_w, width));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn header_line(app: &App, title_w: usize) -> Line<'static> {
    let bg = app.theme.background;
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let label = |key: SortKey| -> String {
        match app.sort {
            Some(d) if d.key == key => {
                let arrow = if d.ascending { "\u{25B2}" } else { "\u{25BC}" };
                format!("{} {}", key.label(), arrow)
            }
            _ => key.label().to_string(),
        }
    };

    let text = format!(
        "{}{} {} {} {} {}",
        " ".repeat(GUTTER_W),
        fit_to_width(&label(SortKey::Title), title_w),
        fit_to_width(&label(SortKey::Importance), IMPORTANCE_W),
        fit_to_width(&label(SortKey::Deadline), DEADLINE_W),
        fit_to_width(&label(SortKey::Status), STATUS_W),
        fit_to_width("Actions", ACTIONS_W),
    );
    Line::from(Span::styled(text, style))
}

fn task_lines(
    app: &App,
    row: &RowController,
    is_cursor: bool,
    focus: Option<RowField>,
    title_w: usize,
    width: usize,
) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let text_fg = if row.is_editing() {
        theme.text_bright
    } else {
        theme.text
    };
    let base = Style::default().fg(text_fg).bg(bg);
    let focused = |field: RowField, style: Style| {
        if focus == Some(field) {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    };
    let cell_text = |field: RowField, text: &str| -> String {
        if focus == Some(field) {
            text_with_cursor(text, app.edit_cursor)
        } else {
            text.to_string()
        }
    };

    let draft = row.draft();
    let gutter = if is_cursor {
        Span::styled("\u{258E} ", Style::default().fg(theme.selection_border).bg(bg))
    } else {
        Span::styled("  ", base)
    };

    let status_style = if row.is_highlighted() {
        Style::default().fg(theme.background).bg(theme.flash_bg)
    } else {
        Style::default().fg(theme.status_color(draft.status)).bg(bg)
    };
    let actions = if row.is_editing() {
        "save  delete"
    } else {
        "edit  delete"
    };

    let main = Line::from(vec![
        gutter.clone(),
        Span::styled(
            fit_to_width(&cell_text(RowField::Title, &draft.title), title_w),
            focused(RowField::Title, base),
        ),
        Span::styled(" ", base),
        Span::styled(
            fit_to_width(draft.importance.label(), IMPORTANCE_W),
            focused(
                RowField::Importance,
                Style::default()
                    .fg(theme.importance_color(draft.importance))
                    .bg(bg),
            ),
        ),
        Span::styled(" ", base),
        Span::styled(
            fit_to_width(&cell_text(RowField::Deadline, row.deadline_text()), DEADLINE_W),
            focused(RowField::Deadline, base),
        ),
        Span::styled(" ", base),
        Span::styled(
            fit_to_width(draft.status.label(), STATUS_W),
            focused(RowField::Status, status_style),
        ),
        Span::styled(" ", base),
        Span::styled(
            fit_to_width(actions, ACTIONS_W),
            Style::default().fg(theme.dim).bg(bg),
        ),
    ]);

    let detail_w = width.saturating_sub(GUTTER_W + 2);
    let detail = Line::from(vec![
        gutter,
        Span::styled("  ", base),
        Span::styled(
            truncate_to_width(
                &single_line(&cell_text(RowField::Detail, &draft.detail)),
                detail_w,
            ),
            focused(RowField::Detail, base.fg(theme.dim)),
        ),
    ]);

    vec![main, detail]
}
