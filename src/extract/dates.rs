// File: ./src/extract/dates.rs
//! Year-less portal dates ("May 10", "Feb 20 at 5:00PM").
//!
//! Parsing is locale invariant: English month names and a 12 hour clock.
//! `%b` also accepts full month names ("February").
use crate::error::{Result, ScrapeError};
use chrono::{NaiveDate, NaiveDateTime};

pub const LATE_DUE_PREFIX: &str = "Late Due Date:";

const RELEASE_FORMAT: &str = "%Y %b %d";
const DUE_FORMAT: &str = "%Y %b %d at %I:%M%p";

/// Collapses runs of whitespace (including the line breaks the portal puts
/// inside date spans) into single spaces and trims.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Release dates carry no time; they resolve to midnight. Unparseable text
/// gives `None`.
pub fn parse_release_date(text: &str, year: i32) -> Option<NaiveDateTime> {
    let text = normalize_ws(text);
    match NaiveDate::parse_from_str(&format!("{} {}", year, text), RELEASE_FORMAT) {
        Ok(date) => date.and_hms_opt(0, 0, 0),
        Err(e) => {
            log::debug!("Ignoring unparseable release date '{}': {}", text, e);
            None
        }
    }
}

/// Parses a due date span, with or without the late prefix.
pub fn parse_due_date(text: &str, year: i32) -> Result<NaiveDateTime> {
    let text = normalize_ws(text);
    let bare = text
        .strip_prefix(LATE_DUE_PREFIX)
        .map(str::trim_start)
        .unwrap_or(&text);

    NaiveDateTime::parse_from_str(&format!("{} {}", year, bare), DUE_FORMAT)
        .map_err(|_| ScrapeError::InvalidDate(text.clone()))
}
