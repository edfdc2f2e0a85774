// File: ./src/model/course.rs
use crate::model::assignment::Assignment;
use crate::model::term::Term;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub term: Term,
    /// Portal id, unique within one dashboard.
    pub number: u64,
    pub short_name: String,
    pub name: String,
    /// Count advertised on the dashboard; can lag behind the course page.
    pub declared_assignment_count: u32,
    /// Row order of the course page. Empty until the page has been fetched.
    pub assignments: Vec<Assignment>,
}

impl Course {
    pub fn new(
        term: Term,
        number: u64,
        short_name: impl Into<String>,
        name: impl Into<String>,
        declared_assignment_count: u32,
    ) -> Self {
        Self {
            term,
            number,
            short_name: short_name.into(),
            name: name.into(),
            declared_assignment_count,
            assignments: Vec::new(),
        }
    }

    /// Assignments due strictly between `start` and `end`, in page order.
    ///
    /// An inverted window yields nothing. Late due dates are not considered.
    pub fn assignments_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        unsubmitted_only: bool,
    ) -> Vec<&Assignment> {
        if start > end {
            return Vec::new();
        }

        self.assignments
            .iter()
            .filter(|a| a.due_date > start && a.due_date < end)
            .filter(|a| !unsubmitted_only || !a.submitted)
            .collect()
    }
}
