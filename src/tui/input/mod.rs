mod common;
mod edit;
mod navigate;
mod popups;

use crossterm::event::KeyEvent;

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use popups::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if is_interrupt(&key) {
        app.should_quit = true;
        return;
    }

    // Creation popup intercepts all input
    if app.form.is_some() {
        handle_form_key(app, key);
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppConfig, Importance, Status};
    use crate::ops::sort::SortKey;
    use crate::tui::app::RowField;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app() -> App {
        App::new(&AppConfig::default())
    }

    /// Create a task through the popup and return the app
    fn app_with_task(title: &str) -> App {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, title);
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn test_popup_create_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(app.form.is_some());

        type_str(&mut app, "Pay rent");
        press(&mut app, KeyCode::Tab); // status
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab); // deadline
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "2024-02-01");
        press(&mut app, KeyCode::Tab); // importance
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Tab); // detail
        type_str(&mut app, "before the 1st");
        // Enter in the detail field starts a new line
        press(&mut app, KeyCode::Enter);
        assert!(app.form.is_some());
        type_str(&mut app, "landlord");
        ctrl(&mut app, 's');

        assert!(app.form.is_none());
        assert_eq!(app.store.len(), 1);
        let task = &app.store.tasks()[0];
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.detail, "before the 1st\nlandlord");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.importance, Importance::Medium);
        assert_eq!(
            task.deadline,
            chrono::NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn test_popup_escape_cancels() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "never mind");
        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_none());
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_popup_swallows_navigation_keys() {
        let mut app = app_with_task("one");
        press(&mut app, KeyCode::Char('a'));
        // 'q' and 'd' are text while the popup is open
        type_str(&mut app, "qd");
        assert!(!app.should_quit);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.form.as_ref().unwrap().title, "qd");
    }

    #[test]
    fn test_status_cycles_in_read_only() {
        let mut app = app_with_task("one");
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.store.tasks()[0].status, Status::InProgress);
        assert_eq!(app.mode, Mode::Navigate);
        let id = app.store.tasks()[0].id;
        assert!(!app.row(id).unwrap().is_editing());
        assert!(app.row(id).unwrap().is_highlighted());

        press(&mut app, KeyCode::Char('S'));
        assert_eq!(app.store.tasks()[0].status, Status::NotStarted);
    }

    #[test]
    fn test_edit_title_and_save() {
        let mut app = app_with_task("draft");
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.field, RowField::Title);

        type_str(&mut app, "ed");
        // Not saved yet
        assert_eq!(app.store.tasks()[0].title, "draft");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.tasks()[0].title, "drafted");
    }

    #[test]
    fn test_row_detail_takes_newlines_and_ctrl_s_saves() {
        let mut app = app_with_task("x");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::BackTab); // detail
        assert_eq!(app.field, RowField::Detail);
        type_str(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "two");
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.store.tasks()[0].detail, "");

        ctrl(&mut app, 's');
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.tasks()[0].detail, "one\ntwo");
    }

    #[test]
    fn test_escape_leaves_row_editing() {
        let mut app = app_with_task("x");
        let id = app.store.tasks()[0].id;
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "y");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.row(id).unwrap().is_editing());
        assert_eq!(app.row(id).unwrap().draft().title, "xy");

        // Enter on an editing row saves it
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.tasks()[0].title, "xy");
        assert!(!app.row(id).unwrap().is_editing());
    }

    #[test]
    fn test_edit_importance_and_deadline_fields() {
        let mut app = app_with_task("x");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab); // importance
        assert_eq!(app.field, RowField::Importance);
        press(&mut app, KeyCode::Left); // Low -> Medium
        press(&mut app, KeyCode::Tab); // deadline
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);

        let task = &app.store.tasks()[0];
        assert_eq!(task.importance, Importance::Medium);
        assert_eq!(task.deadline, None);
    }

    #[test]
    fn test_status_field_in_edit_mode_writes_immediately() {
        let mut app = app_with_task("x");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::BackTab); // detail
        press(&mut app, KeyCode::BackTab); // status
        assert_eq!(app.field, RowField::Status);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.store.tasks()[0].status, Status::InProgress);
        assert_eq!(app.mode, Mode::Edit);
    }

    #[test]
    fn test_sort_keys_and_delete() {
        let mut app = app_with_task("b");
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "a");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(
            app.sort.map(|s| (s.key, s.ascending)),
            Some((SortKey::Title, true))
        );
        press(&mut app, KeyCode::Char('g'));
        let first = app.cursor_task_id().unwrap();
        assert_eq!(app.store.get(first).unwrap().title, "a");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].title, "b");

        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.sort, None);
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_popup() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_keys_on_empty_table_are_harmless() {
        let mut app = app();
        for code in [
            KeyCode::Char('j'),
            KeyCode::Char('e'),
            KeyCode::Enter,
            KeyCode::Char('s'),
            KeyCode::Char('d'),
            KeyCode::Char('G'),
        ] {
            press(&mut app, code);
        }
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.is_empty());
    }
}
