use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (label, hint) = if app.form.is_some() {
        ("NEW TASK", "Ctrl+S add  Tab field  Esc cancel")
    } else {
        match app.mode {
            Mode::Navigate => ("NAVIGATE", "a add  e edit  s status  1-4 sort  ? help"),
            Mode::Edit => ("EDIT", "Tab field  Ctrl+S save  Esc done"),
        }
    };

    let count = app.store.len();
    let mut summary = format!(
        "  {} task{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    if let Some(directive) = app.sort {
        let arrow = if directive.ascending {
            "\u{25B2}"
        } else {
            "\u{25BC}"
        };
        summary.push_str(&format!("  sorted by {} {}", directive.key.label(), arrow));
    }

    let mut spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(summary, Style::default().fg(app.theme.text).bg(bg)),
    ];

    if app.show_key_hints {
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
