// File: ./src/model/assignment.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of a course's assignment table.
///
/// Dates are wall-clock times as the portal renders them (no offset); the
/// year comes from the owning course's term because the page never shows one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    /// Name of the owning course, for display only.
    pub course_name: String,
    /// Empty when the row has no link.
    pub url: String,
    pub submitted: bool,
    pub release_date: Option<NaiveDateTime>,
    pub due_date: NaiveDateTime,
    pub late_due_date: Option<NaiveDateTime>,
}

impl Assignment {
    pub fn new(
        name: impl Into<String>,
        course_name: impl Into<String>,
        url: impl Into<String>,
        submitted: bool,
        due_date: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            course_name: course_name.into(),
            url: url.into(),
            submitted,
            release_date: None,
            due_date,
            late_due_date: None,
        }
    }

    pub fn with_release_date(mut self, release_date: Option<NaiveDateTime>) -> Self {
        self.release_date = release_date;
        self
    }

    pub fn with_late_due_date(mut self, late_due_date: Option<NaiveDateTime>) -> Self {
        self.late_due_date = late_due_date;
        self
    }
}
