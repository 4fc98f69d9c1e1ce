//! API route configuration.

use crate::api::handlers::health_handler;
use axum::{Router, routing::get};

/// Service routes served behind the middleware chain.
///
/// # Endpoints
///
/// - `GET /health` - Liveness probe
pub fn routes() -> Router {
    Router::new().route("/health", get(health_handler))
}
