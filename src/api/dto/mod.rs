//! Data Transfer Objects for API requests and responses.
//!
//! - [`health`] - health check response
//! - [`task`] - task resource shapes exchanged with task API clients

pub mod health;
pub mod task;
