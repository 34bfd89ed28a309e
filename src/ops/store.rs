use chrono::NaiveDate;
use log::debug;

use crate::model::task::{Importance, Status, Task, TaskId};

/// Who performed a write, so the row that made it can skip resyncing its own draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Writer {
    /// The shell or any caller that is not a row controller
    Shell,
    /// The row controller for this task
    Row(TaskId),
}

/// A successful mutation of the collection, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created(TaskId),
    Updated { id: TaskId, writer: Writer },
    Deleted(TaskId),
}

impl Change {
    pub fn id(&self) -> TaskId {
        match self {
            Change::Created(id) | Change::Deleted(id) => *id,
            Change::Updated { id, .. } => *id,
        }
    }
}

/// The authoritative, insertion-ordered task collection.
///
/// All writes go through `create`, `update`/`update_as` and `delete`. Each
/// successful write is recorded in a change feed that the owner drains with
/// [`TaskStore::drain_changes`].
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    changes: Vec<Change>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new task with a fresh id and return it
    pub fn create(
        &mut self,
        title: impl Into<String>,
        detail: impl Into<String>,
        status: Status,
        deadline: Option<NaiveDate>,
        importance: Importance,
    ) -> Task {
        let task = Task {
            id: TaskId::new(),
            title: title.into(),
            detail: detail.into(),
            status,
            deadline,
            importance,
        };
        debug!("create task {}", task.id);
        self.changes.push(Change::Created(task.id));
        self.tasks.push(task.clone());
        task
    }

    /// Replace the task with `record.id`, keeping its position.
    /// Returns the previous record, or `None` (and changes nothing) if the id is unknown.
    pub fn update(&mut self, record: Task) -> Option<Task> {
        self.update_as(Writer::Shell, record)
    }

    /// `update`, tagged with the writer for change notification
    pub fn update_as(&mut self, writer: Writer, record: Task) -> Option<Task> {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == record.id) else {
            debug!("update ignored: unknown task {}", record.id);
            return None;
        };
        let id = record.id;
        let previous = std::mem::replace(slot, record);
        debug!("update task {} by {:?}", id, writer);
        self.changes.push(Change::Updated { id, writer });
        Some(previous)
    }

    /// Remove the task with `id`. Returns it, or `None` if it was not present.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!("delete ignored: unknown task {}", id);
            return None;
        };
        debug!("delete task {}", id);
        self.changes.push(Change::Deleted(id));
        Some(self.tasks.remove(pos))
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Take every change recorded since the last drain, oldest first
    pub fn drain_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }
}
