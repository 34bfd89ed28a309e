use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::form::{CreateForm, FormField};
use crate::util::unicode::truncate_to_width;

use super::{single_line, text_with_cursor};

const LABEL_W: usize = 12;

/// Render the task creation popup
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let focus_label_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default().fg(app.theme.cyan).bg(bg);

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let value_w = (popup_w as usize).saturating_sub(LABEL_W + 6);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" New Task", header_style)));
    lines.push(Line::from(Span::styled("", text_style)));

    for field in FormField::ALL {
        let focused = form.field == field;
        let marker = if focused { "\u{203A} " } else { "  " };
        let label = format!("{:<width$}", field.label(), width = LABEL_W);
        lines.push(Line::from(vec![
            Span::styled(" ", text_style),
            Span::styled(marker, focus_label_style),
            Span::styled(
                label,
                if focused {
                    focus_label_style
                } else {
                    label_style
                },
            ),
            Span::styled(
                truncate_to_width(&field_value(form, field, focused), value_w),
                value_style,
            ),
        ]));
    }

    lines.push(Line::from(Span::styled("", text_style)));
    lines.push(Line::from(vec![
        Span::styled("  ", text_style),
        Span::styled("Ctrl+S", key_style),
        Span::styled(" add  ", text_style),
        Span::styled("Tab", key_style),
        Span::styled(" next field  ", text_style),
        Span::styled("Esc", key_style),
        Span::styled(" cancel", text_style),
    ]));

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn field_value(form: &CreateForm, field: FormField, focused: bool) -> String {
    match field {
        FormField::Status => selector(form.status.label(), focused),
        FormField::Importance => selector(form.importance.label(), focused),
        _ => {
            let text = form.text_of(field).unwrap_or_default();
            if focused {
                single_line(&text_with_cursor(text, form.cursor))
            } else {
                single_line(text)
            }
        }
    }
}

fn selector(label: &str, focused: bool) -> String {
    if focused {
        format!("\u{25C2} {} \u{25B8}", label)
    } else {
        label.to_string()
    }
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
