// File: ./src/extract/row.rs
use super::dates::{parse_due_date, parse_release_date};
use super::{Extractor, first, selector, text_of};
use crate::error::{Result, ScrapeError};
use crate::model::Assignment;
use scraper::{ElementRef, Html};

const SUBMISSIONS_SUFFIX: &str = "/submissions";

impl Extractor {
    /// Parses one assignment table row. `year` comes from the course's term.
    ///
    /// Handles scored, submitted and unsubmitted rows, with or without a link
    /// and with or without a late due date.
    pub fn extract_assignment_from_row(
        &self,
        row: ElementRef<'_>,
        course_name: &str,
        year: i32,
    ) -> Result<Assignment> {
        // Scored rows have a status cell without the warning class; rows with
        // no status cell at all count as submitted too.
        let submitted = first(row, "td.submissionStatus.submissionStatus-warning")?.is_none();

        let link_cell = first(row, "th.table--primaryLink")?
            .ok_or_else(|| ScrapeError::MalformedRow("no primary link cell".into()))?;
        let (name, url) = match first(link_cell, "a")? {
            Some(link) => {
                let url = link
                    .value()
                    .attr("href")
                    .map(|href| self.assignment_url(href))
                    .unwrap_or_default();
                (text_of(link), url)
            }
            None => (text_of(link_cell), String::new()),
        };

        let release_date = first(row, "span.submissionTimeChart--releaseDate")?
            .and_then(|span| parse_release_date(&text_of(span), year));

        let due_span = selector("span.submissionTimeChart--dueDate")?;
        let mut due_dates = row
            .select(&due_span)
            .map(|span| parse_due_date(&text_of(span), year));
        let due_date = due_dates.next().ok_or(ScrapeError::MissingDueDate)??;
        let late_due_date = due_dates.next().transpose()?;

        Ok(Assignment::new(name, course_name, url, submitted, due_date)
            .with_release_date(release_date)
            .with_late_due_date(late_due_date))
    }

    /// Every assignment row of a course page, in page order. The first row is
    /// the table header.
    pub fn extract_assignments(
        &self,
        course_page: &Html,
        course_name: &str,
        year: i32,
    ) -> Result<Vec<Assignment>> {
        course_page
            .select(&selector("tr")?)
            .skip(1)
            .map(|row| self.extract_assignment_from_row(row, course_name, year))
            .collect()
    }

    pub fn extract_assignments_str(
        &self,
        course_page: &str,
        course_name: &str,
        year: i32,
    ) -> Result<Vec<Assignment>> {
        self.extract_assignments(&Html::parse_document(course_page), course_name, year)
    }

    /// Absolute link to the assignment itself, not to one submission of it.
    fn assignment_url(&self, href: &str) -> String {
        let path = match href.find(SUBMISSIONS_SUFFIX) {
            Some(idx) => &href[..idx],
            None => href,
        };
        format!("{}{}", self.base_url, path)
    }
}
