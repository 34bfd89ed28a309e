use chrono::NaiveDate;

use crate::model::task::{Importance, Status, format_deadline, parse_deadline};

/// Field of the creation popup, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Status,
    Deadline,
    Importance,
    Detail,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Status,
        FormField::Deadline,
        FormField::Importance,
        FormField::Detail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Status => "Status",
            FormField::Deadline => "Deadline",
            FormField::Importance => "Importance",
            FormField::Detail => "Detail",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Deadline | FormField::Detail
        )
    }

    fn step(self, forward: bool) -> FormField {
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

/// State of the creation popup while it is open
#[derive(Debug, Clone)]
pub struct CreateForm {
    pub title: String,
    pub detail: String,
    pub status: Status,
    pub deadline_text: String,
    pub importance: Importance,
    pub field: FormField,
    /// Byte offset of the text cursor in the focused text field
    pub cursor: usize,
}

impl CreateForm {
    /// A blank form: Not Started, due `today`, Low importance
    pub fn new(today: NaiveDate) -> Self {
        CreateForm {
            title: String::new(),
            detail: String::new(),
            status: Status::default(),
            deadline_text: format_deadline(Some(today)),
            importance: Importance::default(),
            field: FormField::Title,
            cursor: 0,
        }
    }

    /// Deadline as entered; `None` when the text is not a date
    pub fn deadline(&self) -> Option<NaiveDate> {
        parse_deadline(&self.deadline_text)
    }

    /// The focused field's text buffer and cursor, if it is a text field
    pub fn focused_text_mut(&mut self) -> Option<(&mut String, &mut usize)> {
        let buf = match self.field {
            FormField::Title => &mut self.title,
            FormField::Deadline => &mut self.deadline_text,
            FormField::Detail => &mut self.detail,
            FormField::Status | FormField::Importance => return None,
        };
        Some((buf, &mut self.cursor))
    }

    pub fn text_of(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Deadline => Some(&self.deadline_text),
            FormField::Detail => Some(&self.detail),
            FormField::Status | FormField::Importance => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus(self.field.step(true));
    }

    pub fn focus_prev(&mut self) {
        self.focus(self.field.step(false));
    }

    /// Move focus, placing the cursor at the end of the new field's text
    pub fn focus(&mut self, field: FormField) {
        self.field = field;
        self.cursor = self.text_of(field).map_or(0, str::len);
    }

    /// Cycle the focused selector. Returns false on text fields.
    pub fn cycle_selector(&mut self, forward: bool) -> bool {
        match self.field {
            FormField::Status => {
                self.status = if forward {
                    self.status.next()
                } else {
                    self.status.prev()
                };
                true
            }
            FormField::Importance => {
                self.importance = if forward {
                    self.importance.next()
                } else {
                    self.importance.prev()
                };
                true
            }
            _ => false,
        }
    }
}
