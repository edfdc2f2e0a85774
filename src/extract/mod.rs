// File: ./src/extract/mod.rs
/*! Turns portal HTML into `Term`, `Course` and `Assignment` records.

Everything here is synchronous and side-effect free. The only state is the
site base URL, which is needed to make assignment links absolute; it is
passed in rather than assumed so tests can point at a mock host.

`scraper::Html` is not `Send`, so the `*_str` entry points parse and extract
in one go. Async callers should use those and never hold a document across an
`.await`.
*/

pub mod dashboard;
pub mod dates;
pub mod row;

use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

pub use dates::{normalize_ws, parse_due_date, parse_release_date};

pub const DEFAULT_BASE_URL: &str = "https://www.gradescope.com";
pub const LOGIN_PAGE_TITLE: &str = "Log In | Gradescope";

#[derive(Debug, Clone)]
pub struct Extractor {
    base_url: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Extractor {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", css, e)))
}

/// Whitespace-normalized text content of an element and its descendants.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<String>())
}

pub(crate) fn first<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    Ok(scope.select(&selector(css)?).next())
}

/// CSRF token embedded in the landing page's login form.
pub fn extract_authenticity_token(page: &Html) -> Result<String> {
    page.select(&selector(r#"input[name="authenticity_token"]"#)?)
        .find_map(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or(ScrapeError::MissingAuthToken)
}

pub fn extract_authenticity_token_str(page: &str) -> Result<String> {
    extract_authenticity_token(&Html::parse_document(page))
}

/// The portal answers a failed login with its login form again.
pub fn is_login_page(page: &Html) -> bool {
    let Ok(title) = selector("title") else {
        return false;
    };
    page.select(&title)
        .next()
        .is_some_and(|t| text_of(t) == LOGIN_PAGE_TITLE)
}

pub fn is_login_page_str(page: &str) -> bool {
    is_login_page(&Html::parse_document(page))
}
