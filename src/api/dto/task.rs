//! DTOs for the task resource.
//!
//! These are pure wire shapes; the middleware never inspects them. Executor
//! actions are owned by the executor and carried as opaque JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Log routing for a task's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub guid: String,
    pub source_name: String,
}

/// Request body for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub actions: Vec<Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub annotation: String,
    pub completion_callback_url: String,
    pub cpu_percent: f64,
    pub disk_mb: i64,
    pub domain: String,
    pub log: LogConfig,
    pub memory_mb: i64,
    pub result_file: String,
    pub stack: String,
    pub task_guid: String,
}

/// Task as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub actions: Vec<Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub annotation: String,
    pub completion_callback_url: String,
    pub cpu_percent: f64,
    pub disk_mb: i64,
    pub domain: String,
    pub log: LogConfig,
    pub memory_mb: i64,
    pub result_file: String,
    pub stack: String,
    pub task_guid: String,

    pub failed: bool,
    pub failure_reason: String,
    pub result: String,
    pub state: TaskState,
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Invalid,
    Pending,
    Claimed,
    Running,
    Completed,
    Resolving,
}
