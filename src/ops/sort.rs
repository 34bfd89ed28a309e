use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::task::Task;

/// Column a display order can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Importance,
    Deadline,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Title,
        SortKey::Importance,
        SortKey::Deadline,
        SortKey::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Importance => "Importance",
            SortKey::Deadline => "Deadline",
            SortKey::Status => "Status",
        }
    }
}

/// Sort key plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub key: SortKey,
    pub ascending: bool,
}

impl SortDirective {
    /// Directive after the user asks to sort by `key`: same key flips the
    /// direction, a different key starts ascending.
    pub fn toggled(current: Option<SortDirective>, key: SortKey) -> SortDirective {
        match current {
            Some(d) if d.key == key => SortDirective {
                key,
                ascending: !d.ascending,
            },
            _ => SortDirective {
                key,
                ascending: true,
            },
        }
    }
}

/// A missing deadline sorts as the Unix epoch (`NaiveDate::default()` is 1970-01-01)
fn deadline_key(deadline: Option<NaiveDate>) -> NaiveDate {
    deadline.unwrap_or_default()
}

fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.as_str().cmp(b.title.as_str()),
        SortKey::Importance => a.importance.ordinal().cmp(&b.importance.ordinal()),
        SortKey::Deadline => deadline_key(a.deadline).cmp(&deadline_key(b.deadline)),
        SortKey::Status => a.status.ordinal().cmp(&b.status.ordinal()),
    }
}

/// Derive the display order. The input is never reordered; ties keep their
/// insertion order in either direction.
pub fn sorted_view<'a>(tasks: &'a [Task], directive: Option<SortDirective>) -> Vec<&'a Task> {
    let mut view: Vec<&Task> = tasks.iter().collect();
    if let Some(SortDirective { key, ascending }) = directive {
        view.sort_by(|a, b| {
            let ord = compare(a, b, key);
            if ascending { ord } else { ord.reverse() }
        });
    }
    view
}
