// Tests for term parsing and ordering.
use gradescrape::{Season, Term};

#[test]
fn later_years_and_seasons_compare_greater() {
    let spring_21 = Term::new(Season::Spring, 2021);
    assert_eq!(spring_21, Term::new(Season::Spring, 2021));
    assert!(Term::new(Season::Fall, 2021) > spring_21);
    assert!(spring_21 < Term::new(Season::Summer, 2021));
    assert!(Term::new(Season::Fall, 2022) > spring_21);
    assert!(Term::new(Season::Spring, 2022) > Term::new(Season::Winter, 2021));
}

#[test]
fn parses_dashboard_labels() {
    let term: Term = "Fall 2022".parse().unwrap();
    assert_eq!(term.season, Season::Fall);
    assert_eq!(term.year, 2022);
    assert_eq!(term.to_string(), "Fall 2022");
    assert_eq!(" Winter 2020 ".parse::<Term>().unwrap(), Term::new(Season::Winter, 2020));
}

#[test]
fn rejects_unknown_labels() {
    assert!("Autumn 2021".parse::<Term>().is_err());
    assert!("Spring".parse::<Term>().is_err());
    assert!("Spring twenty".parse::<Term>().is_err());
}

#[test]
fn max_picks_most_recent() {
    let terms = [
        Term::new(Season::Fall, 2020),
        Term::new(Season::Summer, 2021),
        Term::new(Season::Spring, 2021),
    ];
    assert_eq!(terms.iter().max(), Some(&Term::new(Season::Summer, 2021)));
}
