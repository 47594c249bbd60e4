use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;

use crate::core::model::{TodoList, TodoListPatch};

/// Errors that can occur when talking to the todo list server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-success status.
    Api { status: u16, message: String },
    /// Failed to parse the server's response.
    Parse(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api { status: 404, .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client-side view of the REST API.
#[async_trait]
pub trait TodoListApi: Send + Sync {
    /// All lists keyed by id.
    async fn list_all(&self) -> Result<BTreeMap<String, TodoList>, ApiError>;

    async fn get(&self, id: &str) -> Result<TodoList, ApiError>;

    async fn create(&self, title: &str) -> Result<TodoList, ApiError>;

    /// Merges `patch` into the stored list and returns the result.
    async fn update(&self, id: &str, patch: &TodoListPatch) -> Result<TodoList, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}
