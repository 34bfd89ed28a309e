use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::{AppConfig, Importance, Status, TaskId};
use crate::ops::sort::{SortDirective, SortKey, sorted_view};
use crate::ops::store::{Change, TaskStore};

use super::form::CreateForm;
use super::input;
use super::render;
use super::row::RowController;
use super::theme::Theme;
use super::timer::Scheduler;

/// Upper bound on how long the loop sleeps waiting for input
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving around the table
    Navigate,
    /// Typing into the fields of the row under the cursor
    Edit,
}

/// Editable field of a table row, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Title,
    Importance,
    Deadline,
    Status,
    Detail,
}

impl RowField {
    pub const ALL: [RowField; 5] = [
        RowField::Title,
        RowField::Importance,
        RowField::Deadline,
        RowField::Status,
        RowField::Detail,
    ];

    pub fn is_text(self) -> bool {
        matches!(
            self,
            RowField::Title | RowField::Deadline | RowField::Detail
        )
    }

    pub fn step(self, forward: bool) -> RowField {
        let all = Self::ALL;
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        all[next]
    }
}

/// Main application state: owns the store and routes every user intent to it
pub struct App {
    pub store: TaskStore,
    /// One controller per stored task
    pub rows: HashMap<TaskId, RowController>,
    /// Task ids in display order
    pub display: Vec<TaskId>,
    pub sort: Option<SortDirective>,
    /// Status highlight timers, keyed back to their task
    pub timers: Scheduler<TaskId>,
    pub highlight_window: Duration,
    /// Creation popup; `Some` while it is visible
    pub form: Option<CreateForm>,
    pub mode: Mode,
    /// Index into `display`
    pub cursor: usize,
    /// First visible task (in display order)
    pub scroll_offset: usize,
    /// Focused field in Edit mode
    pub field: RowField,
    /// Byte offset of the text cursor in the focused text field
    pub edit_cursor: usize,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub should_quit: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            store: TaskStore::new(),
            rows: HashMap::new(),
            display: Vec::new(),
            sort: None,
            timers: Scheduler::new(),
            highlight_window: Duration::from_millis(config.ui.highlight_ms),
            form: None,
            mode: Mode::Navigate,
            cursor: 0,
            scroll_offset: 0,
            field: RowField::Title,
            edit_cursor: 0,
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
        }
    }

    /// Task id under the cursor
    pub fn cursor_task_id(&self) -> Option<TaskId> {
        self.display.get(self.cursor).copied()
    }

    pub fn row(&self, id: TaskId) -> Option<&RowController> {
        self.rows.get(&id)
    }

    /// Rows in display order
    pub fn display_rows(&self) -> impl Iterator<Item = &RowController> {
        self.display.iter().filter_map(|id| self.rows.get(id))
    }

    // -----------------------------------------------------------------------
    // Creation popup
    // -----------------------------------------------------------------------

    pub fn open_form(&mut self, today: NaiveDate) {
        self.form = Some(CreateForm::new(today));
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Create a task from the popup's fields and hide the popup
    pub fn submit_form(&mut self) -> Option<TaskId> {
        let form = self.form.take()?;
        let deadline = form.deadline();
        let id = self.add_task(
            form.title,
            form.detail,
            form.status,
            deadline,
            form.importance,
        );
        Some(id)
    }

    /// Create a task and put the cursor on it
    pub fn add_task(
        &mut self,
        title: String,
        detail: String,
        status: Status,
        deadline: Option<NaiveDate>,
        importance: Importance,
    ) -> TaskId {
        let id = self
            .store
            .create(title, detail, status, deadline, importance)
            .id;
        self.sync();
        if let Some(pos) = self.display.iter().position(|d| *d == id) {
            self.cursor = pos;
        }
        id
    }

    // -----------------------------------------------------------------------
    // Sorting
    // -----------------------------------------------------------------------

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = Some(SortDirective::toggled(self.sort, key));
        self.refresh_display();
    }

    /// Back to insertion order
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.refresh_display();
    }

    // -----------------------------------------------------------------------
    // Row intents
    // -----------------------------------------------------------------------

    pub fn delete_task(&mut self, id: TaskId) {
        self.store.delete(id);
        self.sync();
    }

    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        self.rows.get_mut(&id).is_some_and(|row| row.begin_edit())
    }

    pub fn save_row(&mut self, id: TaskId) -> bool {
        let saved = match self.rows.get_mut(&id) {
            Some(row) => row.save(&mut self.store),
            None => false,
        };
        self.sync();
        saved
    }

    pub fn set_row_status(&mut self, id: TaskId, status: Status, now: Instant) -> bool {
        let clear_at = now + self.highlight_window;
        let changed = match self.rows.get_mut(&id) {
            Some(row) => row.set_status(status, &mut self.store, &mut self.timers, clear_at),
            None => false,
        };
        self.sync();
        changed
    }

    /// Deliver expired highlight timers to their rows
    pub fn tick(&mut self, now: Instant) {
        for (timer, id) in self.timers.fire_due(now) {
            if let Some(row) = self.rows.get_mut(&id) {
                row.on_timer(timer);
            }
        }
    }

    /// How long the event loop may block before the next timer is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.timers.next_deadline() {
            Some(at) => at.saturating_duration_since(now).min(IDLE_TICK),
            None => IDLE_TICK,
        }
    }

    // -----------------------------------------------------------------------
    // Store synchronization
    // -----------------------------------------------------------------------

    /// Apply pending store changes to the row controllers and rebuild the display order
    pub fn sync(&mut self) {
        for change in self.store.drain_changes() {
            match change {
                Change::Created(id) => {
                    if let Some(task) = self.store.get(id) {
                        self.rows.insert(id, RowController::new(task));
                    }
                }
                Change::Updated { id, writer } => {
                    if let (Some(row), Some(task)) = (self.rows.get_mut(&id), self.store.get(id)) {
                        row.reconcile(task, writer);
                    }
                }
                Change::Deleted(id) => {
                    if let Some(mut row) = self.rows.remove(&id) {
                        row.cancel_highlight(&mut self.timers);
                    }
                }
            }
        }
        self.refresh_display();
    }

    /// Recompute the display order, keeping the cursor on the same task when possible
    fn refresh_display(&mut self) {
        let focused = self.cursor_task_id();
        self.display = sorted_view(self.store.tasks(), self.sort)
            .into_iter()
            .map(|t| t.id)
            .collect();

        if let Some(pos) = focused.and_then(|id| self.display.iter().position(|d| *d == id)) {
            self.cursor = pos;
        } else {
            self.cursor = self.cursor.min(self.display.len().saturating_sub(1));
        }

        if self.mode == Mode::Edit
            && !self
                .cursor_task_id()
                .and_then(|id| self.rows.get(&id))
                .is_some_and(|row| row.is_editing())
        {
            self.mode = Mode::Navigate;
        }
    }
}

/// Today's date in local time; creation-form deadlines default to it
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Run the TUI application
pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    info!("session started");
    let result = run_event_loop(&mut terminal, &mut app);
    info!("session ended with {} task(s)", app.store.len());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::store::Writer;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn app() -> App {
        App::new(&AppConfig::default())
    }

    fn titles(app: &App) -> Vec<String> {
        app.display_rows().map(|r| r.draft().title.clone()).collect()
    }

    fn app_with_ab() -> (App, TaskId, TaskId) {
        let mut app = app();
        let a = app.add_task("A".into(), String::new(), Status::NotStarted, date(2024, 1, 1), Importance::Low);
        let b = app.add_task("B".into(), String::new(), Status::NotStarted, date(2023, 1, 1), Importance::High);
        (app, a, b)
    }

    #[test]
    fn test_submit_creates_and_hides_popup() {
        let mut app = app();
        app.open_form(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        if let Some(form) = app.form.as_mut() {
            form.title = "Buy milk".into();
            form.importance = Importance::High;
        }
        let id = app.submit_form().unwrap();
        assert!(app.form.is_none());
        let task = app.store.get(id).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.deadline, date(2024, 5, 1));
        assert_eq!(task.importance, Importance::High);
        assert!(app.row(id).is_some());
        assert_eq!(app.cursor_task_id(), Some(id));
    }

    #[test]
    fn test_cancel_form_has_no_side_effect() {
        let mut app = app();
        app.open_form(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        app.cancel_form();
        assert!(app.form.is_none());
        assert!(app.store.is_empty());
        assert_eq!(app.submit_form(), None);
    }

    #[test]
    fn test_sort_toggle_and_clear() {
        let (mut app, _, _) = app_with_ab();
        assert_eq!(titles(&app), vec!["A", "B"]);
        app.sort_by(SortKey::Deadline);
        assert_eq!(titles(&app), vec!["B", "A"]);
        app.sort_by(SortKey::Deadline);
        assert_eq!(titles(&app), vec!["A", "B"]);
        app.sort_by(SortKey::Importance);
        assert_eq!(titles(&app), vec!["B", "A"]);
        app.clear_sort();
        assert_eq!(titles(&app), vec!["A", "B"]);
        // Authoritative order never moved
        let stored: Vec<&str> = app.store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(stored, vec!["A", "B"]);
    }

    #[test]
    fn test_cursor_follows_task_across_resort() {
        let (mut app, a, _) = app_with_ab();
        app.cursor = 0;
        assert_eq!(app.cursor_task_id(), Some(a));
        app.sort_by(SortKey::Deadline);
        assert_eq!(app.cursor_task_id(), Some(a));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_delete_drops_row_and_timer() {
        let (mut app, a, b) = app_with_ab();
        app.set_row_status(a, Status::Done, Instant::now());
        assert_eq!(app.timers.len(), 1);
        app.delete_task(a);
        assert!(app.row(a).is_none());
        assert!(app.timers.is_empty());
        assert_eq!(app.display, vec![b]);
    }

    #[test]
    fn test_status_change_saves_editing_draft() {
        let (mut app, a, _) = app_with_ab();
        app.begin_edit(a);
        if let Some(row) = app.rows.get_mut(&a) {
            row.set_title("edited".into());
        }
        app.set_row_status(a, Status::Done, Instant::now());

        let stored = app.store.get(a).unwrap();
        assert_eq!(stored, app.row(a).unwrap().draft());
        assert_eq!(stored.title, "edited");
        assert_eq!(stored.status, Status::Done);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (mut app, _, _) = app_with_ab();
        app.delete_task(TaskId::new());
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.display.len(), 2);
    }

    #[test]
    fn test_status_change_resorts_and_highlights() {
        let (mut app, a, b) = app_with_ab();
        app.sort_by(SortKey::Status);
        let t0 = Instant::now();
        assert!(app.set_row_status(a, Status::Done, t0));
        assert_eq!(app.display, vec![b, a]);
        assert!(app.row(a).unwrap().is_highlighted());

        app.tick(t0 + Duration::from_millis(999));
        assert!(app.row(a).unwrap().is_highlighted());
        app.tick(t0 + Duration::from_secs(1));
        assert!(!app.row(a).unwrap().is_highlighted());
    }

    #[test]
    fn test_external_update_resyncs_editing_row() {
        let (mut app, a, _) = app_with_ab();
        app.begin_edit(a);
        app.rows.get_mut(&a).unwrap().set_title("draft".into());

        let mut record = app.store.get(a).unwrap().clone();
        record.title = "external".into();
        app.store.update_as(Writer::Shell, record);
        app.sync();

        assert_eq!(app.row(a).unwrap().draft().title, "external");
    }

    #[test]
    fn test_save_row_commits_draft() {
        let (mut app, a, _) = app_with_ab();
        assert!(app.begin_edit(a));
        app.rows.get_mut(&a).unwrap().set_title("A!".into());
        assert!(app.save_row(a));
        assert_eq!(app.store.get(a).unwrap().title, "A!");
        assert!(!app.row(a).unwrap().is_editing());
    }

    #[test]
    fn test_poll_timeout_tracks_next_timer() {
        let (mut app, a, _) = app_with_ab();
        let t0 = Instant::now();
        assert_eq!(app.poll_timeout(t0), IDLE_TICK);
        app.highlight_window = Duration::from_millis(100);
        app.set_row_status(a, Status::InProgress, t0);
        assert_eq!(app.poll_timeout(t0), Duration::from_millis(100));
        assert_eq!(app.poll_timeout(t0 + Duration::from_secs(2)), Duration::ZERO);
    }
}
