// File: ./src/extract/dashboard.rs
use super::{Extractor, first, selector, text_of};
use crate::error::{Result, ScrapeError};
use crate::model::{Course, Term};
use scraper::{ElementRef, Html};
use std::collections::HashSet;

pub const COURSE_PATH_PREFIX: &str = "/courses/";

impl Extractor {
    /// Walks the course list container, which alternates term labels and
    /// term bodies. A trailing label without a body is ignored.
    pub fn extract_term_and_courses(&self, dashboard: &Html) -> Result<Vec<(Term, Vec<Course>)>> {
        let container = dashboard
            .select(&selector("div.courseList")?)
            .next()
            .ok_or_else(|| ScrapeError::MalformedDashboard("no course list container".into()))?;

        let children: Vec<ElementRef<'_>> =
            container.children().filter_map(ElementRef::wrap).collect();
        let course_box = selector("a.courseBox")?;

        let mut seen = HashSet::new();
        let mut terms = Vec::with_capacity(children.len() / 2);

        for pair in children.chunks_exact(2) {
            let label = text_of(pair[0]);
            let term: Term = label.parse().map_err(|e| {
                ScrapeError::MalformedDashboard(format!("bad term label '{}': {}", label, e))
            })?;

            let mut courses = Vec::new();
            for entry in pair[1].select(&course_box) {
                let course = self.extract_course(entry, term)?;
                if !seen.insert(course.number) {
                    return Err(ScrapeError::MalformedDashboard(format!(
                        "course #{} listed twice",
                        course.number
                    )));
                }
                courses.push(course);
            }
            log::debug!("Found {} course(s) in {}", courses.len(), term);
            terms.push((term, courses));
        }

        Ok(terms)
    }

    /// Flattened `extract_term_and_courses`, in dashboard order.
    pub fn extract_courses(&self, dashboard: &Html) -> Result<Vec<Course>> {
        Ok(self
            .extract_term_and_courses(dashboard)?
            .into_iter()
            .flat_map(|(_, courses)| courses)
            .collect())
    }

    pub fn extract_courses_str(&self, dashboard: &str) -> Result<Vec<Course>> {
        self.extract_courses(&Html::parse_document(dashboard))
    }

    /// Builds a course from one `a.courseBox` entry of the dashboard.
    pub fn extract_course(&self, course_box: ElementRef<'_>, term: Term) -> Result<Course> {
        let href = course_box
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::MalformedCourseEntry("course box has no link".into()))?;
        let number = href
            .strip_prefix(COURSE_PATH_PREFIX)
            .map(|rest| rest.trim_end_matches('/'))
            .and_then(|rest| rest.parse::<u64>().ok())
            .ok_or_else(|| {
                ScrapeError::MalformedCourseEntry(format!("unexpected course link '{}'", href))
            })?;

        let name = required_text(course_box, ".courseBox--name", number)?;
        let short_name = required_text(course_box, ".courseBox--shortname", number)?;
        let count_text = required_text(course_box, ".courseBox--assignments", number)?;
        let declared_assignment_count = count_text
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<u32>().ok())
            .ok_or_else(|| {
                ScrapeError::MalformedCourseEntry(format!(
                    "course #{}: bad assignment count '{}'",
                    number, count_text
                ))
            })?;

        Ok(Course::new(
            term,
            number,
            short_name,
            name,
            declared_assignment_count,
        ))
    }
}

fn required_text(course_box: ElementRef<'_>, css: &str, number: u64) -> Result<String> {
    first(course_box, css)?
        .map(text_of)
        .ok_or_else(|| ScrapeError::MalformedCourseEntry(format!("course #{}: missing {}", number, css)))
}
