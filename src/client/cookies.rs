// File: ./src/client/cookies.rs
//! Minimal session cookie jar as a tower layer.
//!
//! The portal keeps the login in a handful of cookies on a single host, so
//! the jar ignores domain, path and expiry attributes and only honours
//! `Max-Age=0` as a deletion.
use cookie::Cookie;
use cookie::time::Duration as CookieDuration;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue, Request, Response};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug, Default)]
pub struct CookieJar {
    cookies: Arc<Mutex<BTreeMap<String, String>>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.cookies.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Records every `Set-Cookie` header of a response.
    pub fn store_from_headers(&self, headers: &HeaderMap) {
        let mut cookies = self.lock();
        for raw in headers.get_all(SET_COOKIE) {
            let Ok(raw) = raw.to_str() else {
                continue;
            };
            match parse_set_cookie(raw) {
                Some(SetCookie::Store(name, value)) => {
                    cookies.insert(name, value);
                }
                Some(SetCookie::Remove(name)) => {
                    cookies.remove(&name);
                }
                None => log::debug!("Ignoring malformed Set-Cookie header"),
            }
        }
    }

    /// The `Cookie` request header for the current jar, if it holds anything.
    pub fn header_value(&self) -> Option<HeaderValue> {
        let cookies = self.lock();
        if cookies.is_empty() {
            return None;
        }
        let joined = cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined).ok()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SetCookie {
    Store(String, String),
    Remove(String),
}

fn parse_set_cookie(raw: &str) -> Option<SetCookie> {
    let cookie = Cookie::parse(raw).ok()?;
    if cookie.max_age() == Some(CookieDuration::ZERO) {
        return Some(SetCookie::Remove(cookie.name().to_string()));
    }
    Some(SetCookie::Store(
        cookie.name().to_string(),
        cookie.value_trimmed().to_string(),
    ))
}

#[derive(Clone, Debug)]
pub struct CookieJarLayer {
    jar: CookieJar,
}

impl CookieJarLayer {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }
}

impl<S> Layer<S> for CookieJarLayer {
    type Service = CookieJarService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CookieJarService {
            inner,
            jar: self.jar.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CookieJarService<S> {
    inner: S,
    jar: CookieJar,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CookieJarService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        if let Some(val) = self.jar.header_value() {
            req.headers_mut().insert(COOKIE, val);
        }
        let jar = self.jar.clone();
        let fut = self.inner.call(req);

        Box::pin(async move {
            let response = fut.await?;
            jar.store_from_headers(response.headers());
            Ok(response)
        })
    }
}
