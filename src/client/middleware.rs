// File: ./src/client/middleware.rs
//! Tower middleware that makes requests look like they come from a browser:
//! a configurable User-Agent and an HTML `Accept` header.
use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderValue, Request};
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

#[derive(Clone, Debug)]
pub struct BrowserHeadersLayer {
    pub user_agent: String,
}

impl BrowserHeadersLayer {
    pub fn new(user_agent: String) -> Self {
        Self { user_agent }
    }
}

impl<S> Layer<S> for BrowserHeadersLayer {
    type Service = BrowserHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BrowserHeadersService {
            inner,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BrowserHeadersService<S> {
    inner: S,
    user_agent: String,
}

impl<S, ReqBody> Service<Request<ReqBody>> for BrowserHeadersService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let headers = req.headers_mut();
        if let Ok(val) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, val);
        }
        // Callers may ask for something else explicitly.
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        }
        self.inner.call(req)
    }
}
