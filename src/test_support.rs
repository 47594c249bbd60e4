//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, TodoListApi};
use crate::core::model::{Todo, TodoList, TodoListPatch};
use crate::core::state::App;
use crate::server::store::{InMemoryStore, StoreError, TodoListStore};

/// Builds a list with incomplete todos.
pub fn sample_list(id: &str, title: &str, todos: &[&str]) -> TodoList {
    TodoList {
        id: id.to_string(),
        title: title.to_string(),
        todos: todos.iter().map(|t| Todo::new(*t)).collect(),
    }
}

/// Creates a loaded App holding `lists`, with no list open.
pub fn test_app(lists: Vec<TodoList>) -> App {
    let mut app = App::new();
    app.lists = lists.into_iter().map(|l| (l.id.clone(), l)).collect();
    app.is_loading = false;
    app
}

fn to_api_error(e: StoreError) -> ApiError {
    let status = match e {
        StoreError::NotFound(_) => 404,
        StoreError::MissingTitle => 400,
    };
    ApiError::Api {
        status,
        message: e.to_string(),
    }
}

/// An in-process `TodoListApi` backed by an `InMemoryStore`. Records every
/// update call; `failing()` makes every call return a network error.
pub struct RecordingApi {
    store: InMemoryStore,
    fail: bool,
    updates: Mutex<Vec<(String, TodoListPatch)>>,
}

impl RecordingApi {
    /// Seeded with list "1" ("Chores": dishes, laundry).
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::from_lists([sample_list("1", "Chores", &["dishes", "laundry"])]),
            fail: false,
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn updates(&self) -> Vec<(String, TodoListPatch)> {
        self.updates.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail {
            Err(ApiError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TodoListApi for RecordingApi {
    async fn list_all(&self) -> Result<BTreeMap<String, TodoList>, ApiError> {
        self.check()?;
        Ok(self.store.list().await)
    }

    async fn get(&self, id: &str) -> Result<TodoList, ApiError> {
        self.check()?;
        self.store.get(id).await.map_err(to_api_error)
    }

    async fn create(&self, title: &str) -> Result<TodoList, ApiError> {
        self.check()?;
        self.store.create(title).await.map_err(to_api_error)
    }

    async fn update(&self, id: &str, patch: &TodoListPatch) -> Result<TodoList, ApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), patch.clone()));
        self.check()?;
        self.store
            .update(id, patch.clone())
            .await
            .map_err(to_api_error)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.check()?;
        self.store.delete(id).await.map_err(to_api_error)
    }
}
