// File: ./src/filter.rs
//! Course and assignment selection: most recent term, due-date windows.
use crate::error::{Result, ScrapeError};
use crate::model::{Assignment, Course};
use chrono::NaiveDateTime;

/// Keeps the courses of the single most recent term, in input order.
pub fn strip_to_most_recent_term(courses: Vec<Course>) -> Result<Vec<Course>> {
    let most_recent = courses
        .iter()
        .map(|c| c.term)
        .max()
        .ok_or(ScrapeError::EmptyCourseList)?;

    Ok(courses
        .into_iter()
        .filter(|c| c.term == most_recent)
        .collect())
}

/// `Course::assignments_in_range` over every course, concatenated in course order.
pub fn upcoming_assignments(
    courses: &[Course],
    start: NaiveDateTime,
    end: NaiveDateTime,
    unsubmitted_only: bool,
) -> Vec<&Assignment> {
    courses
        .iter()
        .flat_map(|c| c.assignments_in_range(start, end, unsubmitted_only))
        .collect()
}
