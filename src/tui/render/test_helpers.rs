use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{AppConfig, Importance, Status};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App with default config and no tasks.
pub fn empty_app() -> App {
    App::new(&AppConfig::default())
}

/// An App holding the two tasks used across render tests:
/// "Write report" (High, 2024-03-01, In Progress) and "Water plants" (Low, 2024-01-15, Not Started).
pub fn app_with_tasks() -> App {
    let mut app = empty_app();
    app.add_task(
        "Write report".into(),
        "numbers for Q1".into(),
        Status::InProgress,
        NaiveDate::from_ymd_opt(2024, 3, 1),
        Importance::High,
    );
    app.add_task(
        "Water plants".into(),
        String::new(),
        Status::NotStarted,
        NaiveDate::from_ymd_opt(2024, 1, 15),
        Importance::Low,
    );
    app.cursor = 0;
    app
}
