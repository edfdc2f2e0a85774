// File: ./src/error.rs
//! Errors raised while turning portal markup into records.

use thiserror::Error;

/// Everything that can go wrong inside the extraction and filtering core.
///
/// The application layer wraps these in `anyhow::Error`; callers that need to
/// tell a broken course page from a broken dashboard can still downcast.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("malformed course dashboard: {0}")]
    MalformedDashboard(String),

    #[error("malformed course entry: {0}")]
    MalformedCourseEntry(String),

    #[error("malformed assignment row: {0}")]
    MalformedRow(String),

    #[error("assignment row has no due date")]
    MissingDueDate,

    #[error("could not parse date '{0}'")]
    InvalidDate(String),

    #[error("page has no authenticity token")]
    MissingAuthToken,

    #[error("cannot select the most recent term of an empty course list")]
    EmptyCourseList,

    #[error("invalid selector '{0}'")]
    Selector(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
