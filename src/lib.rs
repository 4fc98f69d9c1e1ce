//! # Receptor Gate
//!
//! Authentication and cross-origin boundary for the receptor task API,
//! built as [`tower`] middleware for Axum.
//!
//! ## Middleware
//!
//! - [`CorsLayer`] - annotates cross-origin responses and answers preflights
//! - [`CookieAuthLayer`] - bridges a credential cookie into `Authorization`
//! - [`BasicAuthLayer`] - enforces HTTP Basic authentication
//!
//! Each layer holds only immutable configuration and can be used on its own
//! or composed with the others via [`routes::apply_gate`].
//!
//! ## Quick Start
//!
//! ```bash
//! export RECEPTOR_USERNAME="user"
//! export RECEPTOR_PASSWORD="pass"
//! export CORS_ENABLED="true"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod error;

pub mod config;
pub mod server;

pub mod routes;

pub use api::middleware::{BasicAuthLayer, CookieAuthLayer, CorsLayer};
pub use error::{ApiError, ErrorType};

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::api::middleware::{BasicAuthLayer, CookieAuthLayer, CorsLayer};
    pub use crate::application::services::AuthService;
    pub use crate::config::{BasicCredentials, Config, GateSettings};
    pub use crate::error::{ApiError, ErrorType};
    pub use crate::routes::apply_gate;
}
