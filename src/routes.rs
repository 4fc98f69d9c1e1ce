//! Top-level router configuration.
//!
//! # Middleware
//!
//! Applied inner to outer around the service routes:
//!
//! 1. **Basic auth** - rejects requests without the configured credentials
//! 2. **Cookie bridge** - copies the auth cookie into `Authorization`
//! 3. **CORS** - annotates cross-origin responses, answers preflights
//! 4. **Tracing** - structured request/response logging
//!
//! Basic auth and the cookie bridge are installed together when credentials
//! are configured. CORS sits outside authentication so preflight requests,
//! which never carry credentials, are answered directly.

use crate::api;
use crate::api::middleware::{BasicAuthLayer, CookieAuthLayer, CorsLayer, tracing};
use crate::config::{Config, GateSettings};
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(config: &Config) -> Router {
    apply_gate(api::routes::routes(), &config.gate).layer(tracing::layer())
}

/// Wraps `router` in the authentication and CORS middleware described by
/// `settings`.
pub fn apply_gate(router: Router, settings: &GateSettings) -> Router {
    let mut router = router;

    if let Some(ref credentials) = settings.credentials {
        router = router
            .layer(BasicAuthLayer::new(
                credentials.username.clone(),
                &credentials.password,
            ))
            .layer(CookieAuthLayer::new(settings.cookie_name.as_str()));
    }

    if settings.cors_enabled {
        router = router.layer(CorsLayer::new());
    }

    router
}
