#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use std::sync::{Arc, Mutex};

use receptor_gate::config::{BasicCredentials, GateSettings};

pub const USERNAME: &str = "user";
pub const PASSWORD: &str = "pass";
pub const COOKIE_NAME: &str = "Cookie-Authorization";

/// Business handler stand-in that records the headers it receives.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<HeaderMap>>>,
}

impl Recorder {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn headers_for_call(&self, index: usize) -> HeaderMap {
        self.calls.lock().unwrap()[index].clone()
    }
}

async fn record(State(recorder): State<Recorder>, headers: HeaderMap) -> (StatusCode, &'static str) {
    recorder.calls.lock().unwrap().push(headers);
    (StatusCode::OK, "tasks")
}

/// `/tasks` router backed by a fresh [`Recorder`].
pub fn recording_router() -> (Router, Recorder) {
    let recorder = Recorder::default();
    let router = Router::new()
        .route("/tasks", get(record).put(record))
        .with_state(recorder.clone());
    (router, recorder)
}

pub fn full_settings() -> GateSettings {
    GateSettings {
        credentials: Some(BasicCredentials {
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
        }),
        cookie_name: COOKIE_NAME.to_string(),
        cors_enabled: true,
    }
}
