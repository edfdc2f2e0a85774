// File: ./src/client/redirect.rs
//! Redirect following for the login flow.
//!
//! The portal answers the login POST with a redirect to the dashboard, which
//! must be fetched with GET. 301/302/303 after a non-GET request therefore
//! switch to a bodiless GET; 307/308 replay the request unchanged.
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{Method, Request, Response, StatusCode, Uri};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug)]
pub struct FollowRedirectLayer {
    max_redirects: usize,
}

impl FollowRedirectLayer {
    pub fn new(max_redirects: usize) -> Self {
        Self { max_redirects }
    }
}

impl<S> Layer<S> for FollowRedirectLayer {
    type Service = FollowRedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FollowRedirectService {
            inner,
            max_redirects: self.max_redirects,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FollowRedirectService<S> {
    inner: S,
    max_redirects: usize,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for FollowRedirectService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    ReqBody: Clone + Default + Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        let max_redirects = self.max_redirects;

        Box::pin(async move {
            let mut current_req = req;
            let mut attempts = 0;

            loop {
                // Keep a copy so the next hop can be built from it.
                let next_req = current_req.clone();
                let response = inner.call(current_req).await?;

                let status = response.status();
                if attempts >= max_redirects || !status.is_redirection() {
                    return Ok(response);
                }
                let Some(location) = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|l| l.to_str().ok())
                    .map(str::to_owned)
                else {
                    return Ok(response);
                };

                let target = resolve_location(next_req.uri(), &location);
                log::debug!("Following {} redirect to {}", status.as_u16(), target);

                current_req = if rewrites_to_get(status, next_req.method()) {
                    into_get(next_req)
                } else {
                    next_req
                };
                *current_req.uri_mut() = target;
                attempts += 1;
            }
        })
    }
}

fn rewrites_to_get(status: StatusCode, method: &Method) -> bool {
    *method != Method::GET
        && *method != Method::HEAD
        && matches!(
            status,
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER
        )
}

fn into_get<B: Default>(req: Request<B>) -> Request<B> {
    let (mut parts, _) = req.into_parts();
    parts.method = Method::GET;
    parts.headers.remove(CONTENT_TYPE);
    parts.headers.remove(CONTENT_LENGTH);
    Request::from_parts(parts, B::default())
}

/// Resolves a `Location` header against the request it answered. Relative
/// targets inherit scheme and authority.
pub fn resolve_location(base: &Uri, location: &str) -> Uri {
    let Ok(parsed) = location.parse::<Uri>() else {
        return base.clone();
    };
    let parts = parsed.into_parts();
    let mut builder = Uri::builder();

    if let Some(scheme) = parts.scheme {
        builder = builder.scheme(scheme);
    } else if let Some(s) = base.scheme() {
        builder = builder.scheme(s.clone());
    }

    if let Some(authority) = parts.authority {
        builder = builder.authority(authority);
    } else if let Some(a) = base.authority() {
        builder = builder.authority(a.clone());
    }

    if let Some(pq) = parts.path_and_query {
        builder = builder.path_and_query(pq);
    } else {
        builder = builder.path_and_query("/");
    }

    builder.build().unwrap_or_else(|_| base.clone())
}
