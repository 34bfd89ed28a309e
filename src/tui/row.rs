use std::time::Instant;

use log::debug;

use crate::model::task::{Importance, Status, Task, TaskId, format_deadline, parse_deadline};
use crate::ops::store::{TaskStore, Writer};

use super::timer::{Scheduler, TimerId};

/// Edit state of one table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    ReadOnly,
    Editing,
}

/// Per-row edit controller.
///
/// Keeps a draft copy of its task at all times. Field edits only touch the
/// draft and are only accepted while `Editing`; `save` writes the draft back.
/// Status is the exception: it can change in either mode and is written to
/// the store immediately, which also flashes the status cell until the
/// armed highlight timer fires.
#[derive(Debug, Clone)]
pub struct RowController {
    id: TaskId,
    mode: RowMode,
    draft: Task,
    /// Raw deadline input; the draft holds whatever it parses to
    deadline_text: String,
    highlight: Option<TimerId>,
}

impl RowController {
    pub fn new(task: &Task) -> Self {
        RowController {
            id: task.id,
            mode: RowMode::ReadOnly,
            draft: task.clone(),
            deadline_text: format_deadline(task.deadline),
            highlight: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == RowMode::Editing
    }

    pub fn draft(&self) -> &Task {
        &self.draft
    }

    pub fn deadline_text(&self) -> &str {
        &self.deadline_text
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }

    pub fn highlight_timer(&self) -> Option<TimerId> {
        self.highlight
    }

    /// ReadOnly -> Editing. Returns false if already editing.
    pub fn begin_edit(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.mode = RowMode::Editing;
        true
    }

    /// Editing -> ReadOnly, writing the draft to the store
    pub fn save(&mut self, store: &mut TaskStore) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.mode = RowMode::ReadOnly;
        if store
            .update_as(Writer::Row(self.id), self.draft.clone())
            .is_none()
        {
            debug!("save of task {} found no record", self.id);
        }
        true
    }

    pub fn set_title(&mut self, title: String) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.draft.title = title;
        true
    }

    pub fn set_detail(&mut self, detail: String) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.draft.detail = detail;
        true
    }

    /// Replace the deadline input. Text that is not a date leaves the draft without one.
    pub fn set_deadline_text(&mut self, text: String) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.draft.deadline = parse_deadline(&text);
        self.deadline_text = text;
        true
    }

    pub fn set_importance(&mut self, importance: Importance) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.draft.importance = importance;
        true
    }

    /// Change the status in either mode. The whole draft, including any
    /// unsaved edits, is written right away. Re-arms the highlight timer to
    /// fire at `clear_at`.
    pub fn set_status(
        &mut self,
        status: Status,
        store: &mut TaskStore,
        timers: &mut Scheduler<TaskId>,
        clear_at: Instant,
    ) -> bool {
        if self.draft.status == status {
            return false;
        }
        if store.get(self.id).is_none() {
            debug!("status change of task {} found no record", self.id);
            return false;
        }
        self.draft.status = status;
        store.update_as(Writer::Row(self.id), self.draft.clone());

        if let Some(previous) = self.highlight.take() {
            timers.cancel(previous);
        }
        self.highlight = Some(timers.schedule(clear_at, self.id));
        true
    }

    /// Clear the highlight if `timer` is the one currently armed
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        if self.highlight == Some(timer) {
            self.highlight = None;
            true
        } else {
            false
        }
    }

    /// Disarm the highlight timer, e.g. before the row is dropped
    pub fn cancel_highlight(&mut self, timers: &mut Scheduler<TaskId>) {
        if let Some(timer) = self.highlight.take() {
            timers.cancel(timer);
        }
    }

    /// Resync the draft after the stored record changed. Writes made by
    /// this row are skipped; anything else wins over the draft.
    pub fn reconcile(&mut self, record: &Task, writer: Writer) {
        if record.id != self.id || writer == Writer::Row(self.id) {
            return;
        }
        self.draft = record.clone();
        self.deadline_text = format_deadline(record.deadline);
    }
}
