//! Application layer services.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - HTTP Basic credential verification

pub mod services;
