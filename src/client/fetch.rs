// File: ./src/client/fetch.rs
//! Fetching course pages and filling in their assignments.
//!
//! Retrieval works against anything that can fetch a page by path, so the
//! same extraction runs over a live session or canned pages in tests.
use crate::extract::Extractor;
use crate::model::Course;
use anyhow::Result;
use futures::stream::{self, StreamExt};

pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// Capability to fetch one document given a site path.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn fetch(&self, path: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// One course page at a time, in course order.
    Sequential,
    /// Up to `limit` course pages in flight; results keep course order.
    Concurrent { limit: usize },
}

impl FetchStrategy {
    /// A limit of 0 or 1 means sequential.
    pub fn from_limit(limit: usize) -> Self {
        if limit <= 1 {
            FetchStrategy::Sequential
        } else {
            FetchStrategy::Concurrent { limit }
        }
    }
}

impl Default for FetchStrategy {
    fn default() -> Self {
        FetchStrategy::Concurrent {
            limit: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

pub fn course_path(number: u64) -> String {
    format!("/courses/{}", number)
}

/// A course whose page could not be fetched or parsed. The course comes back
/// untouched, with no assignments.
#[derive(Debug)]
pub struct CourseFailure {
    pub course: Course,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct Retrieval {
    /// Courses with their assignments, in input order.
    pub courses: Vec<Course>,
    pub failures: Vec<CourseFailure>,
}

impl Retrieval {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetches every course page and populates `assignments`.
///
/// A failing course never stops the others; it ends up in `failures`.
pub async fn retrieve_assignments<S: DocumentSource>(
    source: &S,
    extractor: &Extractor,
    courses: Vec<Course>,
    strategy: FetchStrategy,
) -> Retrieval {
    log::info!(
        "Retrieving assignments for {} course(s) ({:?})",
        courses.len(),
        strategy
    );

    let results: Vec<Result<Course, CourseFailure>> = match strategy {
        FetchStrategy::Sequential => {
            let mut results = Vec::with_capacity(courses.len());
            for course in courses {
                results.push(populate(source, extractor, course).await);
            }
            results
        }
        FetchStrategy::Concurrent { limit } => {
            stream::iter(
                courses
                    .into_iter()
                    .map(|course| populate(source, extractor, course)),
            )
            .buffered(limit.max(1))
            .collect()
            .await
        }
    };

    let mut retrieval = Retrieval::default();
    for result in results {
        match result {
            Ok(course) => retrieval.courses.push(course),
            Err(failure) => retrieval.failures.push(failure),
        }
    }
    retrieval
}

async fn populate<S: DocumentSource>(
    source: &S,
    extractor: &Extractor,
    mut course: Course,
) -> Result<Course, CourseFailure> {
    let path = course_path(course.number);
    let extracted = match source.fetch(&path).await {
        Ok(page) => extractor
            .extract_assignments_str(&page, &course.name, course.term.year)
            .map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };

    match extracted {
        Ok(assignments) => {
            log::debug!(
                "{}: {} assignment(s) (dashboard advertised {})",
                course.short_name,
                assignments.len(),
                course.declared_assignment_count
            );
            course.assignments = assignments;
            Ok(course)
        }
        Err(error) => {
            log::warn!("Skipping {} (#{}): {:#}", course.short_name, course.number, error);
            Err(CourseFailure { course, error })
        }
    }
}
