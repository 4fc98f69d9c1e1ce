//! HTTP Basic authentication middleware.

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use axum_auth::AuthBasic;
use tower::{Layer, Service};

use super::BoxFuture;
use crate::{application::services::AuthService, error::ApiError};

/// Wraps a service with [`BasicAuth`].
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(<username>:<password>)
/// ```
///
/// The scheme name is matched case-insensitively.
///
/// # Errors
///
/// Responds with `401 Unauthorized` and
/// `{"type":"Unauthorized","message":"Unauthorized"}`, without calling the
/// wrapped service, if:
/// - the `Authorization` header is missing or not a Basic credential
/// - the username or password differs from the configured pair
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/tasks", get(list_tasks))
///     .layer(BasicAuthLayer::new("user", "pass"));
/// ```
#[derive(Debug, Clone)]
pub struct BasicAuthLayer {
    auth_service: Arc<AuthService>,
}

impl BasicAuthLayer {
    pub fn new(username: impl Into<String>, password: impl AsRef<str>) -> Self {
        Self::from_service(Arc::new(AuthService::new(username, password)))
    }

    pub fn from_service(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BasicAuth {
            inner,
            auth_service: self.auth_service.clone(),
        }
    }
}

/// Service produced by [`BasicAuthLayer`].
#[derive(Debug, Clone)]
pub struct BasicAuth<S> {
    inner: S,
    auth_service: Arc<AuthService>,
}

impl<S> Service<Request> for BasicAuth<S>
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
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let auth_service = self.auth_service.clone();

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();
            canonicalize_basic_scheme(&mut parts.headers);

            let authorized = match AuthBasic::from_request_parts(&mut parts, &()).await {
                Ok(AuthBasic((username, Some(password)))) => {
                    let verified = auth_service.verify(&username, &password);
                    if !verified {
                        tracing::debug!(reason = "invalid_credentials", "rejecting request");
                    }
                    verified
                }
                Ok(AuthBasic((_, None))) | Err(_) => {
                    tracing::debug!(reason = "missing_credentials", "rejecting request");
                    false
                }
            };

            if !authorized {
                return Ok(ApiError::unauthorized().into_response());
            }

            inner.call(Request::from_parts(parts, body)).await
        })
    }
}

/// Rewrites a `basic`/`BASIC` scheme to `Basic`, which `AuthBasic` expects.
fn canonicalize_basic_scheme(headers: &mut HeaderMap) {
    const SCHEME: &[u8] = b"Basic ";

    let Some(value) = headers.get(AUTHORIZATION) else {
        return;
    };
    let bytes = value.as_bytes();
    if bytes.len() < SCHEME.len()
        || bytes.starts_with(SCHEME)
        || !bytes[..SCHEME.len()].eq_ignore_ascii_case(SCHEME)
    {
        return;
    }

    let mut canonical = SCHEME.to_vec();
    canonical.extend_from_slice(&bytes[SCHEME.len()..]);
    if let Ok(value) = HeaderValue::from_bytes(&canonical) {
        headers.insert(AUTHORIZATION, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::fake_handler::{
        FakeHandler, HANDLED_BODY, HANDLED_HEADER, body_string, request,
    };
    use axum::http::{Method, StatusCode, header::CONTENT_TYPE};
    use crate::application::services::auth_service::basic_authorization as basic;
    use tower::ServiceExt;

    const EXPECTED_USERNAME: &str = "user";
    const EXPECTED_PASSWORD: &str = "pass";
    const UNAUTHORIZED_BODY: &str = r#"{"type":"Unauthorized","message":"Unauthorized"}"#;

    fn layer() -> BasicAuthLayer {
        BasicAuthLayer::new(EXPECTED_USERNAME, EXPECTED_PASSWORD)
    }

    #[tokio::test]
    async fn test_correct_credentials_call_wrapped_handler() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());
        let authorization = basic(EXPECTED_USERNAME, EXPECTED_PASSWORD);

        let response = service
            .oneshot(request(Method::GET, &[("Authorization", authorization.as_str())]))
            .await
            .unwrap();

        assert_eq!(wrapped.call_count(), 1);
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()[HANDLED_HEADER], "fake");
        assert_eq!(body_string(response).await, HANDLED_BODY);
    }

    #[tokio::test]
    async fn test_no_credentials_rejected() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());

        let response = service.oneshot(request(Method::GET, &[])).await.unwrap();

        assert_eq!(wrapped.call_count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, UNAUTHORIZED_BODY);
    }

    #[tokio::test]
    async fn test_incorrect_password_rejected() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());
        let authorization = basic(EXPECTED_USERNAME, "badPassword");

        let response = service
            .oneshot(request(Method::GET, &[("Authorization", authorization.as_str())]))
            .await
            .unwrap();

        assert_eq!(wrapped.call_count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_string(response).await, UNAUTHORIZED_BODY);
    }

    #[tokio::test]
    async fn test_incorrect_username_rejected() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());
        let authorization = basic("admin", EXPECTED_PASSWORD);

        let response = service
            .oneshot(request(Method::GET, &[("Authorization", authorization.as_str())]))
            .await
            .unwrap();

        assert_eq!(wrapped.call_count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_scheme_name_is_case_insensitive() {
        for authorization in ["basic dXNlcjpwYXNz", "BASIC dXNlcjpwYXNz", "bAsIc dXNlcjpwYXNz"] {
            let wrapped = FakeHandler::default();
            let service = layer().layer(wrapped.clone());

            let response = service
                .oneshot(request(Method::GET, &[("Authorization", authorization)]))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::ACCEPTED, "{authorization}");
            assert_eq!(wrapped.call_count(), 1, "{authorization}");
        }
    }

    #[tokio::test]
    async fn test_lowercase_scheme_with_wrong_password_rejected() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());
        let authorization = basic(EXPECTED_USERNAME, "badPassword").replacen("Basic", "basic", 1);

        let response = service
            .oneshot(request(Method::GET, &[("Authorization", authorization.as_str())]))
            .await
            .unwrap();

        assert_eq!(wrapped.call_count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_password_containing_colon_accepted() {
        let wrapped = FakeHandler::default();
        let service = BasicAuthLayer::new("user", "pa:ss").layer(wrapped.clone());
        let authorization = basic("user", "pa:ss");

        let response = service
            .oneshot(request(Method::GET, &[("Authorization", authorization.as_str())]))
            .await
            .unwrap();

        assert_eq!(wrapped.call_count(), 1);
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[test]
    fn test_canonicalize_basic_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("basic abc"));
        canonicalize_basic_scheme(&mut headers);
        assert_eq!(headers[AUTHORIZATION], "Basic abc");

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        canonicalize_basic_scheme(&mut headers);
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");

        headers.insert(AUTHORIZATION, HeaderValue::from_static("basicabc"));
        canonicalize_basic_scheme(&mut headers);
        assert_eq!(headers[AUTHORIZATION], "basicabc");
    }

    #[tokio::test]
    async fn test_non_basic_scheme_rejected() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());

        let response = service
            .oneshot(request(Method::GET, &[("Authorization", "Bearer some-token")]))
            .await
            .unwrap();

        assert_eq!(wrapped.call_count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_base64_rejected() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());

        let response = service
            .oneshot(request(Method::GET, &[("Authorization", "Basic !!!not-base64")]))
            .await
            .unwrap();

        assert_eq!(wrapped.call_count(), 0);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authorized_request_reaches_handler_intact() {
        let wrapped = FakeHandler::default();
        let service = layer().layer(wrapped.clone());
        let authorization = basic(EXPECTED_USERNAME, EXPECTED_PASSWORD);

        service
            .oneshot(request(
                Method::PUT,
                &[("Authorization", authorization.as_str()), ("X-Trace", "abc")],
            ))
            .await
            .unwrap();

        let seen = wrapped.request_for_call(0);
        assert_eq!(seen.method, Method::PUT);
        assert_eq!(seen.headers["x-trace"], "abc");
        assert_eq!(seen.headers["authorization"], authorization.as_str());
    }

    #[tokio::test]
    async fn test_repeated_requests_yield_identical_results() {
        let wrapped = FakeHandler::default();
        let mut service = layer().layer(wrapped.clone());
        let good = basic(EXPECTED_USERNAME, EXPECTED_PASSWORD);
        let bad = basic(EXPECTED_USERNAME, "badPassword");

        for _ in 0..2 {
            let response = service
                .ready()
                .await
                .unwrap()
                .call(request(Method::GET, &[("Authorization", good.as_str())]))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::ACCEPTED);

            let response = service
                .ready()
                .await
                .unwrap()
                .call(request(Method::GET, &[("Authorization", bad.as_str())]))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_string(response).await, UNAUTHORIZED_BODY);
        }

        assert_eq!(wrapped.call_count(), 2);
    }
}
