//! Recording test double for the wrapped handler.

use std::{
    convert::Infallible,
    future::{Ready, ready},
    sync::{Arc, Mutex},
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use tower::Service;

pub(crate) const HANDLED_BODY: &str = "handled";
pub(crate) const HANDLED_HEADER: HeaderName = HeaderName::from_static("x-handled-by");

/// Request as seen by the wrapped handler.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub headers: HeaderMap,
}

/// Handler that records every call and answers `202 Accepted`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeHandler {
    calls: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeHandler {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn request_for_call(&self, index: usize) -> RecordedRequest {
        self.calls.lock().unwrap()[index].clone()
    }
}

impl Service<Request> for FakeHandler {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        self.calls.lock().unwrap().push(RecordedRequest {
            method: req.method().clone(),
            headers: req.headers().clone(),
        });

        let response = (
            StatusCode::ACCEPTED,
            [(HANDLED_HEADER, HeaderValue::from_static("fake"))],
            HANDLED_BODY,
        )
            .into_response();

        ready(Ok(response))
    }
}

/// Empty request to `/tasks` carrying the given headers.
pub(crate) fn request(method: Method, headers: &[(&str, &str)]) -> Request {
    let mut builder = axum::http::Request::builder().method(method).uri("/tasks");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(axum::body::Body::empty()).unwrap()
}

pub(crate) async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
