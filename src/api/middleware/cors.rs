//! Cross-origin request annotation and preflight handling.

use std::task::{Context, Poll};

use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
        },
    },
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use super::BoxFuture;

/// Wraps a service with [`Cors`].
///
/// # Behavior
///
/// - `Origin` absent, empty or `*`: the request is served without CORS headers
/// - any other `Origin`: the request is served and the response gets
///   `Access-Control-Allow-Origin: <origin>` and
///   `Access-Control-Allow-Credentials: true`
/// - `OPTIONS` with `Access-Control-Request-Method`: answered here with
///   `200 OK`, echoing the requested method and headers; the wrapped service
///   is never called
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/tasks", get(list_tasks))
///     .layer(CorsLayer::new());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CorsLayer;

impl CorsLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = Cors<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Cors { inner }
    }
}

/// Service produced by [`CorsLayer`].
#[derive(Debug, Clone)]
pub struct Cors<S> {
    inner: S,
}

impl<S> Service<Request> for Cors<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let origin = allowed_origin(req.headers());

        if let Some(requested_method) = preflight_method(&req) {
            tracing::debug!(origin = ?origin, "answering CORS preflight");
            let response = preflight_response(origin, requested_method, req.headers());
            return Box::pin(async move { Ok(response) });
        }

        // Call the instance that was driven to readiness, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            if let Some(origin) = origin {
                allow_origin(response.headers_mut(), origin);
            }
            Ok(response)
        })
    }
}

/// Returns the request's `Origin` if it warrants CORS response headers.
///
/// Missing, empty and wildcard origins are not annotated.
fn allowed_origin(headers: &HeaderMap) -> Option<HeaderValue> {
    let origin = headers.get(ORIGIN)?;
    match origin.as_bytes() {
        b"" | b"*" => None,
        _ => Some(origin.clone()),
    }
}

fn preflight_method(req: &Request) -> Option<HeaderValue> {
    if req.method() != Method::OPTIONS {
        return None;
    }
    req.headers()
        .get(ACCESS_CONTROL_REQUEST_METHOD)
        .filter(|method| !method.is_empty())
        .cloned()
}

fn preflight_response(
    origin: Option<HeaderValue>,
    requested_method: HeaderValue,
    request_headers: &HeaderMap,
) -> Response {
    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();

    if let Some(origin) = origin {
        allow_origin(headers, origin);
    }
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, requested_method);
    if let Some(requested_headers) = request_headers.get(ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested_headers.clone());
    }

    response
}

fn allow_origin(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}
