// File: src/client/core.rs
use crate::client::auth::{Credentials, LoginOutcome, login_form};
use crate::client::cert::NoVerifier;
use crate::client::cookies::{CookieJar, CookieJarLayer, CookieJarService};
use crate::client::fetch::DocumentSource;
use crate::client::middleware::{BrowserHeadersLayer, BrowserHeadersService};
use crate::client::redirect::{FollowRedirectLayer, FollowRedirectService};
use crate::config::Config;
use crate::extract::{extract_authenticity_token_str, is_login_page_str};

use anyhow::{Context, Result, bail};
use http::header::CONTENT_TYPE;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::sync::Arc;
use tower::ServiceExt;
use tower_layer::Layer;

pub const LOGIN_PATH: &str = "/login";
const MAX_REDIRECTS: usize = 10;
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;
type SessionService =
    BrowserHeadersService<FollowRedirectService<CookieJarService<HttpsClient>>>;

/// A fetched page after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP session against one portal host. Cloning shares the cookie jar, so
/// clones stay logged in together.
#[derive(Clone)]
pub struct GradescopeClient {
    base_url: String,
    service: SessionService,
    jar: CookieJar,
}

impl GradescopeClient {
    pub fn new(base_url: &str, user_agent: &str, insecure: bool) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            bail!("Portal base URL is empty");
        }
        base_url
            .parse::<http::Uri>()
            .with_context(|| format!("Invalid portal URL '{}'", base_url))?;

        let tls_config_builder = rustls::ClientConfig::builder();
        let tls_config = if insecure {
            log::warn!("Certificate verification is disabled for {}", base_url);
            tls_config_builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);
            if root_store.is_empty() {
                // Plain http mirrors still work; https requests will fail later.
                log::warn!("No valid system certificates found");
            }
            tls_config_builder
                .with_root_certificates(root_store)
                .with_no_client_auth()
        };

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();
        let http_client: HttpsClient = Client::builder(TokioExecutor::new()).build(https_connector);

        let jar = CookieJar::new();
        let service = BrowserHeadersLayer::new(user_agent.to_string()).layer(
            FollowRedirectLayer::new(MAX_REDIRECTS)
                .layer(CookieJarLayer::new(jar.clone()).layer(http_client)),
        );

        Ok(Self {
            base_url,
            service,
            jar,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.user_agent,
            config.allow_insecure_certs,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.jar
    }

    /// Absolute URL for a site path. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get(&self, path: &str) -> Result<Page> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(self.url(path))
            .body(String::new())?;
        self.send(req).await
    }

    pub async fn post_form(&self, path: &str, form: String) -> Result<Page> {
        let req = Request::builder()
            .method(Method::POST)
            .uri(self.url(path))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form)?;
        self.send(req).await
    }

    async fn send(&self, req: Request<String>) -> Result<Page> {
        let target = format!("{} {}", req.method(), req.uri());
        let response = self
            .service
            .clone()
            .oneshot(req)
            .await
            .with_context(|| format!("{} failed", target))?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .with_context(|| format!("Failed to read response body of {}", target))?
            .to_bytes();
        log::debug!("{} -> {} ({} bytes)", target, status, bytes.len());

        Ok(Page {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Logs in with the landing page's form token.
    ///
    /// When the POST itself does not come back successful (an already
    /// authenticated session rejects a stale token), the base URL is fetched
    /// instead and judged the same way: a login page means the credentials
    /// were rejected, anything else is the dashboard.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        if !credentials.is_complete() {
            bail!("Both an email and a password are required to log in");
        }

        let landing = self.get("/").await?;
        if !landing.status.is_success() {
            bail!("Portal landing page returned {}", landing.status);
        }
        let token = extract_authenticity_token_str(&landing.body)
            .context("Landing page does not contain a login form")?;

        log::info!("Logging in to {} as {}", self.base_url, credentials.email);
        let posted = self
            .post_form(LOGIN_PATH, login_form(credentials, &token))
            .await?;

        let page = if posted.status.is_success() {
            posted
        } else {
            log::info!(
                "Login POST answered {}, falling back to GET {}",
                posted.status,
                self.base_url
            );
            self.get("/").await?
        };

        if !page.status.is_success() || is_login_page_str(&page.body) {
            log::warn!("Login rejected for {}", credentials.email);
            // Cookies of a rejected attempt must not leak into the next one.
            self.jar.clear();
            return Ok(LoginOutcome::Rejected);
        }
        if self.jar.is_empty() {
            log::warn!("Logged in, but the portal set no session cookie");
        }
        Ok(LoginOutcome::LoggedIn {
            dashboard: page.body,
        })
    }
}

impl DocumentSource for GradescopeClient {
    async fn fetch(&self, path: &str) -> Result<String> {
        let page = self.get(path).await?;
        if !page.status.is_success() {
            bail!("GET {} returned {}", path, page.status);
        }
        if is_login_page_str(&page.body) {
            bail!("Session is not logged in (GET {} served the login page)", path);
        }
        Ok(page.body)
    }
}
