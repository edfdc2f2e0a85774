// Sequential and concurrent retrieval over canned course pages.
use anyhow::{Result, anyhow};
use gradescrape::client::fetch::course_path;
use gradescrape::client::{DocumentSource, FetchStrategy, retrieve_assignments};
use gradescrape::{Course, Extractor, Season, Term};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn page(assignment: &str, due: &str) -> String {
    format!(
        r#"<html><body><table>
        <thead><tr><th>Name</th><th>Status</th><th>Due</th></tr></thead>
        <tbody><tr>
          <th class="table--primaryLink">{assignment}</th>
          <td class="submissionStatus submissionStatus-warning">No Submission</td>
          <td><span class="submissionTimeChart--dueDate">{due}</span></td>
        </tr></tbody></table></body></html>"#
    )
}

/// Serves pages by path after a per-path delay and tracks how many fetches
/// overlap.
#[derive(Default)]
struct CannedPages {
    pages: HashMap<String, (u64, Result<String, String>)>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fetched: AtomicUsize,
}

impl CannedPages {
    fn with(mut self, number: u64, delay_ms: u64, body: Result<String, String>) -> Self {
        self.pages.insert(course_path(number), (delay_ms, body));
        self
    }
}

impl DocumentSource for CannedPages {
    async fn fetch(&self, path: &str) -> Result<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.fetched.fetch_add(1, Ordering::SeqCst);

        let result = match self.pages.get(path) {
            Some((delay, body)) => {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
                body.clone().map_err(|e| anyhow!(e))
            }
            None => Err(anyhow!("no page at {}", path)),
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn courses() -> Vec<Course> {
    let term = Term::new(Season::Spring, 2021);
    vec![
        Course::new(term, 1, "A", "Alpha", 1),
        Course::new(term, 2, "B", "Beta", 1),
        Course::new(term, 3, "C", "Gamma", 1),
    ]
}

fn source() -> CannedPages {
    CannedPages::default()
        // The slowest page belongs to the first course.
        .with(1, 60, Ok(page("A1", "Apr 12 at 11:59PM")))
        .with(2, 5, Ok(page("B1", "Apr 13 at 5:00PM")))
        .with(3, 20, Ok(page("C1", "Apr 14 at 9:30AM")))
}

#[tokio::test]
async fn strategies_agree_and_keep_course_order() {
    let extractor = Extractor::default();

    let sequential = source();
    let seq = retrieve_assignments(&sequential, &extractor, courses(), FetchStrategy::Sequential).await;
    let concurrent = source();
    let conc = retrieve_assignments(
        &concurrent,
        &extractor,
        courses(),
        FetchStrategy::Concurrent { limit: 4 },
    )
    .await;

    assert!(seq.is_complete() && conc.is_complete());
    assert_eq!(seq.courses, conc.courses);
    let numbers: Vec<u64> = conc.courses.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(conc.courses[2].assignments[0].name, "C1");
    assert_eq!(conc.courses[2].assignments[0].course_name, "Gamma");

    assert_eq!(sequential.max_in_flight.load(Ordering::SeqCst), 1);
    assert!(concurrent.max_in_flight.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn concurrency_limit_is_respected() {
    let pages = source();
    let retrieval = retrieve_assignments(
        &pages,
        &Extractor::default(),
        courses(),
        FetchStrategy::Concurrent { limit: 2 },
    )
    .await;
    assert_eq!(retrieval.courses.len(), 3);
    assert!(pages.max_in_flight.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn failing_course_does_not_stop_siblings() {
    let pages = CannedPages::default()
        .with(1, 10, Ok(page("A1", "Apr 12 at 11:59PM")))
        .with(2, 1, Err("connection reset".to_string()))
        .with(3, 5, Ok(page("C1", "not a date")));

    for strategy in [FetchStrategy::Sequential, FetchStrategy::Concurrent { limit: 3 }] {
        let retrieval = retrieve_assignments(&pages, &Extractor::default(), courses(), strategy).await;

        assert_eq!(retrieval.courses.len(), 1, "{:?}", strategy);
        assert_eq!(retrieval.courses[0].assignments[0].name, "A1");

        let failed: Vec<u64> = retrieval.failures.iter().map(|f| f.course.number).collect();
        assert_eq!(failed, vec![2, 3]);
        assert!(retrieval.failures[0].error.to_string().contains("connection reset"));
        assert!(retrieval.failures[1].course.assignments.is_empty());
    }
    assert_eq!(pages.fetched.load(Ordering::SeqCst), 6);
}

#[test]
fn strategy_from_limit() {
    assert_eq!(FetchStrategy::from_limit(0), FetchStrategy::Sequential);
    assert_eq!(FetchStrategy::from_limit(1), FetchStrategy::Sequential);
    assert_eq!(FetchStrategy::from_limit(6), FetchStrategy::Concurrent { limit: 6 });
    assert_eq!(course_path(42), "/courses/42");
}
