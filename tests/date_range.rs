// Tests for selecting assignments by due date.
use chrono::{Duration, NaiveDate, NaiveDateTime};
use gradescrape::filter::upcoming_assignments;
use gradescrape::{Assignment, Course, Season, Term};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 4, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn course_with_assignments() -> Course {
    let mut course = Course::new(Term::new(Season::Summer, 1776), 12345, "MATH", "Mathematics", 5);
    let due = |days| start() + Duration::days(days);
    course.assignments = vec![
        Assignment::new("Assignment 1", "Mathematics", "", false, due(1)),
        Assignment::new("Assignment 2", "Mathematics", "", true, due(1)),
        Assignment::new("Assignment 3", "Mathematics", "", false, due(3)),
        Assignment::new("Assignment 4", "Mathematics", "", false, due(5)),
        Assignment::new("Assignment 5", "Mathematics", "", false, due(14)),
    ];
    course
}

fn names(assignments: &[&Assignment]) -> Vec<String> {
    assignments.iter().map(|a| a.name.clone()).collect()
}

#[test]
fn inverted_and_empty_windows_select_nothing() {
    let course = course_with_assignments();
    let s = start();
    assert!(course.assignments_in_range(s, s - Duration::days(1), false).is_empty());
    assert!(course.assignments_in_range(s, s, false).is_empty());
}

#[test]
fn both_bounds_are_exclusive() {
    let course = course_with_assignments();
    let s = start();

    // Day 1 sits exactly on the end bound.
    assert!(course.assignments_in_range(s, s + Duration::days(1), false).is_empty());
    assert_eq!(
        names(&course.assignments_in_range(s, s + Duration::days(3), false)),
        vec!["Assignment 1", "Assignment 2"]
    );
    // Due exactly at start.
    assert_eq!(
        names(&course.assignments_in_range(s + Duration::days(1), s + Duration::days(4), false)),
        vec!["Assignment 3"]
    );
}

#[test]
fn wide_window_keeps_page_order() {
    let course = course_with_assignments();
    let s = start();
    let all = course.assignments_in_range(s, s + Duration::days(15), false);
    assert_eq!(all.len(), 5);
    assert_eq!(
        names(&all),
        vec!["Assignment 1", "Assignment 2", "Assignment 3", "Assignment 4", "Assignment 5"]
    );
}

#[test]
fn unsubmitted_only_is_a_subset() {
    let course = course_with_assignments();
    let s = start();
    let end = s + Duration::days(2);
    let all = course.assignments_in_range(s, end, false);
    let pending = course.assignments_in_range(s, end, true);
    assert_eq!(names(&pending), vec!["Assignment 1"]);
    assert!(pending.iter().all(|a| all.contains(a)));
}

#[test]
fn late_due_date_is_not_considered() {
    let mut course = course_with_assignments();
    let s = start();
    course.assignments = vec![
        Assignment::new("Past", "Mathematics", "", false, s - Duration::days(1))
            .with_late_due_date(Some(s + Duration::days(1))),
    ];
    assert!(course.assignments_in_range(s, s + Duration::days(7), false).is_empty());
}

#[test]
fn upcoming_concatenates_in_course_order() {
    let first = course_with_assignments();
    let mut second = Course::new(Term::new(Season::Summer, 1776), 6789, "PHYS", "Physics", 1);
    second.assignments = vec![Assignment::new(
        "Lab",
        "Physics",
        "",
        false,
        start() + Duration::hours(12),
    )];
    let courses = vec![first, second];

    let s = start();
    let picked = upcoming_assignments(&courses, s, s + Duration::days(2), false);
    assert_eq!(names(&picked), vec!["Assignment 1", "Assignment 2", "Lab"]);
}
