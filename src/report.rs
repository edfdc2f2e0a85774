// File: ./src/report.rs
// Output of the upcoming-assignments listing.
use crate::model::Assignment;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::fmt::Write;

pub fn render_table(
    days_forward: u32,
    start: NaiveDateTime,
    end: NaiveDateTime,
    assignments: &[&Assignment],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Upcoming assignments over the next {} days ({}➡ {}):",
        days_forward,
        start.format("%m/%d"),
        end.format("%m/%d")
    );
    let _ = writeln!(
        out,
        "{:<20} {:<15}   Due Date        Submitted",
        "Course Name", "Assignment"
    );
    if assignments.is_empty() {
        out.push_str("Nothing due 🎉\n");
    }
    for assignment in assignments {
        let _ = writeln!(out, "{}", assignment);
    }
    out
}

pub fn render_json(assignments: &[&Assignment]) -> Result<String> {
    Ok(serde_json::to_string_pretty(assignments)?)
}
