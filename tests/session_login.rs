// Login and page fetching against a mock portal.
use gradescrape::app::retrieve_courses;
use gradescrape::cli::RunSettings;
use gradescrape::client::{Credentials, DocumentSource, FetchStrategy, GradescopeClient, LoginOutcome};
use gradescrape::extract::Extractor;
use mockito::{Matcher, Server};

const LANDING: &str = r#"<html><head><title>Log In | Gradescope</title></head><body>
<form action="/login" method="post">
<input name="utf8" type="hidden" value="&#x2713;">
<input type="hidden" name="authenticity_token" value="tok123">
</form></body></html>"#;

const DASHBOARD: &str = r#"<html><head><title>Your Courses | Gradescope</title></head><body>
<div class="courseList">
  <div class="courseList--term">Spring 2021</div>
  <div class="courseList--coursesForTerm">
    <a class="courseBox" href="/courses/123456">
      <h3 class="courseBox--shortname">CSE 100</h3>
      <div class="courseBox--name">Advanced Data Structures</div>
      <div class="courseBox--assignments">1 assignment</div>
    </a>
  </div>
  <div class="courseList--term">Fall 2020</div>
  <div class="courseList--coursesForTerm">
    <a class="courseBox" href="/courses/98765">
      <h3 class="courseBox--shortname">CSE 12</h3>
      <div class="courseBox--name">Basic Data Structures</div>
      <div class="courseBox--assignments">0 assignments</div>
    </a>
  </div>
</div></body></html>"#;

const COURSE_PAGE: &str = r#"<html><body><table>
<thead><tr><th>Name</th><th>Status</th><th>Released / Due</th></tr></thead>
<tbody><tr>
  <th class="table--primaryLink"><a href="/courses/123456/assignments/42/submissions/7">PA 1</a></th>
  <td class="submissionStatus submissionStatus-warning"><div>No Submission</div></td>
  <td><span class="submissionTimeChart--releaseDate">Apr 1</span>
      <span class="submissionTimeChart--dueDate">Apr 12 at 11:59PM</span></td>
</tr></tbody></table></body></html>"#;

fn credentials() -> Credentials {
    Credentials::new("me@ucsd.edu", "hunter2")
}

#[tokio::test]
async fn login_posts_token_and_follows_redirect_with_cookie() {
    let mut server = Server::new_async().await;

    let landing = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("set-cookie", "_gradescope_session=anon; path=/; HttpOnly")
        .with_body(LANDING)
        .create_async()
        .await;

    let post = server
        .mock("POST", "/login")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_header("cookie", Matcher::Regex("_gradescope_session=anon".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("authenticity_token=tok123".to_string()),
            Matcher::Regex("session%5Bemail%5D=me%40ucsd.edu".to_string()),
            Matcher::Regex("session%5Bpassword%5D=hunter2".to_string()),
        ]))
        .with_status(302)
        .with_header("location", "/account")
        .with_header("set-cookie", "signed_token=abc; path=/; HttpOnly")
        .create_async()
        .await;

    let account = server
        .mock("GET", "/account")
        .match_header("cookie", Matcher::Regex("signed_token=abc".to_string()))
        .with_status(200)
        .with_body(DASHBOARD)
        .create_async()
        .await;

    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    let outcome = client.login(&credentials()).await.unwrap();

    landing.assert_async().await;
    post.assert_async().await;
    account.assert_async().await;

    match outcome {
        LoginOutcome::LoggedIn { dashboard } => assert!(dashboard.contains("courseList")),
        LoginOutcome::Rejected => panic!("login should have succeeded"),
    }
    assert_eq!(client.cookies().get("signed_token").as_deref(), Some("abc"));
}

#[tokio::test]
async fn login_page_after_post_means_rejected() {
    let mut server = Server::new_async().await;
    let _landing = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(LANDING)
        .create_async()
        .await;
    let _post = server
        .mock("POST", "/login")
        .with_status(200)
        .with_header("set-cookie", "_gradescope_session=attempt; path=/")
        .with_body(LANDING)
        .create_async()
        .await;

    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    let outcome = client.login(&credentials()).await.unwrap();
    assert_eq!(outcome, LoginOutcome::Rejected);
    assert!(!outcome.is_logged_in());
    assert!(client.cookies().is_empty());
}

#[tokio::test]
async fn unsuccessful_post_falls_back_to_base_url() {
    let mut server = Server::new_async().await;
    let _landing = server
        .mock("GET", "/")
        .match_header("cookie", Matcher::Missing)
        .with_status(200)
        .with_body(LANDING)
        .create_async()
        .await;
    // An already authenticated session answers a stale token with 422.
    let _post = server
        .mock("POST", "/login")
        .with_status(422)
        .with_header("set-cookie", "signed_token=abc; path=/")
        .create_async()
        .await;
    let home = server
        .mock("GET", "/")
        .match_header("cookie", Matcher::Regex("signed_token=abc".to_string()))
        .with_status(200)
        .with_body(DASHBOARD)
        .create_async()
        .await;

    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    let outcome = client.login(&credentials()).await.unwrap();
    home.assert_async().await;
    assert!(outcome.is_logged_in());
}

#[tokio::test]
async fn landing_page_without_token_is_an_error() {
    let mut server = Server::new_async().await;
    let _landing = server
        .mock("GET", "/")
        .with_status(200)
        .with_body("<html><body>maintenance</body></html>")
        .create_async()
        .await;

    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    assert!(client.login(&credentials()).await.is_err());
}

#[tokio::test]
async fn requests_carry_browser_user_agent() {
    let mut server = Server::new_async().await;
    let page = server
        .mock("GET", "/courses/1")
        .match_header("user-agent", "gradescrape-test")
        .match_header("accept", Matcher::Regex("text/html".to_string()))
        .with_status(200)
        .with_body("<html></html>")
        .create_async()
        .await;

    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    client.fetch("/courses/1").await.unwrap();
    page.assert_async().await;
}

#[tokio::test]
async fn fetch_rejects_error_status_and_login_page() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/courses/404")
        .with_status(404)
        .create_async()
        .await;
    let _logged_out = server
        .mock("GET", "/courses/5")
        .with_status(200)
        .with_body(LANDING)
        .create_async()
        .await;

    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    assert!(client.fetch("/courses/404").await.is_err());
    assert!(client.fetch("/courses/5").await.is_err());
}

#[tokio::test]
async fn dashboard_to_assignments_over_the_session() {
    let mut server = Server::new_async().await;
    let course = server
        .mock("GET", "/courses/123456")
        .with_status(200)
        .with_body(COURSE_PAGE)
        .create_async()
        .await;
    let old_course = server
        .mock("GET", "/courses/98765")
        .expect(0)
        .create_async()
        .await;

    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    let extractor = Extractor::new(client.base_url());
    let settings = RunSettings {
        days_forward: 7,
        unsubmitted_only: false,
        recent_only: true,
        strategy: FetchStrategy::Sequential,
    };

    let retrieval = retrieve_courses(&client, &extractor, DASHBOARD, &settings)
        .await
        .unwrap();

    course.assert_async().await;
    old_course.assert_async().await;
    assert!(retrieval.is_complete());
    assert_eq!(retrieval.courses.len(), 1);
    let assignment = &retrieval.courses[0].assignments[0];
    assert_eq!(assignment.name, "PA 1");
    assert!(!assignment.submitted);
    assert_eq!(assignment.course_name, "Advanced Data Structures");
    assert_eq!(
        assignment.url,
        format!("{}/courses/123456/assignments/42", server.url())
    );
}

#[tokio::test]
async fn dashboard_without_courses_lists_nothing() {
    let server = Server::new_async().await;
    let client = GradescopeClient::new(&server.url(), "gradescrape-test", false).unwrap();
    let extractor = Extractor::new(client.base_url());
    let settings = RunSettings {
        days_forward: 7,
        unsubmitted_only: false,
        recent_only: true,
        strategy: FetchStrategy::default(),
    };

    let empty = r#"<html><body><div class="courseList"></div></body></html>"#;
    let retrieval = retrieve_courses(&client, &extractor, empty, &settings)
        .await
        .unwrap();
    assert!(retrieval.courses.is_empty());
    assert!(retrieval.is_complete());
}
