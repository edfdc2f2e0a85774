// File: ./src/model/display.rs
use crate::model::assignment::Assignment;
use crate::model::course::Course;
use std::fmt;

pub const DUE_DATE_FORMAT: &str = "%m/%d/%y %I:%M%p";

impl Assignment {
    pub fn submission_symbol(&self) -> &'static str {
        if self.submitted { "✅" } else { "❌" }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📓[{}] {} Due 📅{} Submitted: {}",
            self.course_name,
            self.name,
            self.due_date.format(DUE_DATE_FORMAT),
            self.submission_symbol()
        )?;
        if let Some(late) = self.late_due_date {
            write!(f, " (late until {})", late.format(DUE_DATE_FORMAT))?;
        }
        Ok(())
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})\t Assignments: {}\t #:{}",
            self.term, self.short_name, self.name, self.declared_assignment_count, self.number
        )
    }
}
