//! Cookie-to-header credential bridging.
//!
//! Browsers cannot attach an `Authorization` header to every cross-origin
//! request, but they do send cookies. This middleware copies a named cookie
//! into `Authorization` so the authentication layer behind it sees a normal
//! header.

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{AUTHORIZATION, COOKIE},
    },
    response::Response,
};
use tower::{Layer, Service};

/// Wraps a service with [`CookieAuth`].
///
/// # Cookie Format
///
/// ```text
/// Cookie: receptor_authorization=Basic dXNlcjpwYXNz
/// ```
///
/// # Behavior
///
/// - cookie present: its value replaces any existing `Authorization` header
/// - cookie absent: `Authorization` is left as it was
///
/// The request is always forwarded; this layer never rejects.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/tasks", get(list_tasks))
///     .layer(BasicAuthLayer::new("user", "pass"))
///     .layer(CookieAuthLayer::new("receptor_authorization"));
/// ```
#[derive(Debug, Clone)]
pub struct CookieAuthLayer {
    cookie_name: Arc<str>,
}

impl CookieAuthLayer {
    pub fn new(cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl<S> Layer<S> for CookieAuthLayer {
    type Service = CookieAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CookieAuth {
            inner,
            cookie_name: self.cookie_name.clone(),
        }
    }
}

/// Service produced by [`CookieAuthLayer`].
#[derive(Debug, Clone)]
pub struct CookieAuth<S> {
    inner: S,
    cookie_name: Arc<str>,
}

impl<S> Service<Request> for CookieAuth<S>
where
    S: Service<Request, Response = Response>,
{
    type Response = Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        if let Some(value) = find_cookie(req.headers(), &self.cookie_name) {
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    req.headers_mut().insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::debug!(
                        cookie = %self.cookie_name,
                        "ignoring cookie that is not a valid header value"
                    );
                }
            }
        }

        self.inner.call(req)
    }
}

/// Finds the first cookie named `name` across all `Cookie` headers.
///
/// A value wrapped in double quotes is returned without them.
fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key.trim() == name).then(|| unquote(value.trim()).to_string())
        })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
