//! HTTP middleware guarding the API.
//!
//! Each middleware is a [`tower::Layer`] holding its immutable configuration
//! and producing a service that wraps the next one in the chain:
//!
//! - [`cors`] - cross-origin annotation and preflight answers
//! - [`cookie_auth`] - copies a credential cookie into `Authorization`
//! - [`basic_auth`] - HTTP Basic authentication
//! - [`tracing`] - request/response logging

use std::{future::Future, pin::Pin};

pub mod basic_auth;
pub mod cookie_auth;
pub mod cors;
pub mod tracing;

#[cfg(test)]
pub(crate) mod fake_handler;

pub use basic_auth::{BasicAuth, BasicAuthLayer};
pub use cookie_auth::{CookieAuth, CookieAuthLayer};
pub use cors::{Cors, CorsLayer};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
