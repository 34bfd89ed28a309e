use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

/// Unique identifier for a task record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Create a new random task identifier
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Done];

    /// Position in the closed set; used as the sort key
    pub fn ordinal(self) -> u8 {
        match self {
            Status::NotStarted => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Next value in selector order, wrapping around
    pub fn next(self) -> Status {
        cycle(&Self::ALL, self, 1)
    }

    /// Previous value in selector order, wrapping around
    pub fn prev(self) -> Status {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// How much a task matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Importance {
    High,
    Medium,
    #[default]
    Low,
}

impl Importance {
    pub const ALL: [Importance; 3] = [Importance::High, Importance::Medium, Importance::Low];

    /// Position in the closed set; High sorts first ascending
    pub fn ordinal(self) -> u8 {
        match self {
            Importance::High => 0,
            Importance::Medium => 1,
            Importance::Low => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Importance::High => "High",
            Importance::Medium => "Medium",
            Importance::Low => "Low",
        }
    }

    pub fn next(self) -> Importance {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Importance {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Date format used by every deadline input and display
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Parse a deadline typed by the user. Blank or malformed input yields `None`.
pub fn parse_deadline(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DEADLINE_FORMAT).ok()
}

/// Render a deadline the way the date inputs show it
pub fn format_deadline(deadline: Option<NaiveDate>) -> String {
    deadline
        .map(|d| d.format(DEADLINE_FORMAT).to_string())
        .unwrap_or_default()
}

/// A task record. Every field always holds a value; `deadline` is `None`
/// only when the user entered no usable date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub detail: String,
    pub status: Status,
    pub deadline: Option<NaiveDate>,
    pub importance: Importance,
}
