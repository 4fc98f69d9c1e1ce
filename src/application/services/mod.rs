//! Services used by the HTTP middleware.

pub mod auth_service;

pub use auth_service::AuthService;
