//! # Todo List Store
//!
//! Storage behind the REST handlers. Handlers only see the [`TodoListStore`]
//! trait; [`InMemoryStore`] is the process-memory implementation (nothing
//! survives a restart).
//!
//! Each operation takes the lock once, so concurrent requests never observe a
//! half-applied update, but overlapping clients still overwrite each other
//! (last write wins).

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::Mutex;

use crate::core::model::{Todo, TodoList, TodoListPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(String),
    MissingTitle,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "todo list {id} not found"),
            StoreError::MissingTitle => write!(f, "title is required"),
        }
    }
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait TodoListStore: Send + Sync {
    async fn list(&self) -> BTreeMap<String, TodoList>;

    async fn get(&self, id: &str) -> Result<TodoList, StoreError>;

    /// Creates an empty list. Fails with `MissingTitle` on a blank title.
    async fn create(&self, title: &str) -> Result<TodoList, StoreError>;

    /// Shallow-merges `patch` into the list with the given id.
    async fn update(&self, id: &str, patch: TodoListPatch) -> Result<TodoList, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct InMemoryStore {
    lists: Mutex<BTreeMap<String, TodoList>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lists(lists: impl IntoIterator<Item = TodoList>) -> Self {
        let lists = lists.into_iter().map(|l| (l.id.clone(), l)).collect();
        Self {
            lists: Mutex::new(lists),
        }
    }

    /// A store pre-populated with two example lists.
    pub fn with_examples() -> Self {
        let examples = [
            ("0000000001", "First List", "First todo of first list!"),
            ("0000000002", "Second List", "First todo of second list!"),
        ];
        Self::from_lists(examples.into_iter().map(|(id, title, todo)| TodoList {
            id: id.to_string(),
            title: title.to_string(),
            todos: vec![Todo::new(todo)],
        }))
    }
}

/// Derives an id from a millisecond timestamp, bumping it until it is unused.
pub fn next_id(now_millis: i64, taken: &BTreeMap<String, TodoList>) -> String {
    let mut candidate = now_millis;
    while taken.contains_key(&candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[async_trait]
impl TodoListStore for InMemoryStore {
    async fn list(&self) -> BTreeMap<String, TodoList> {
        self.lists.lock().await.clone()
    }

    async fn get(&self, id: &str) -> Result<TodoList, StoreError> {
        self.lists
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn create(&self, title: &str) -> Result<TodoList, StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::MissingTitle);
        }
        let mut lists = self.lists.lock().await;
        let id = next_id(Utc::now().timestamp_millis(), &lists);
        let list = TodoList {
            id: id.clone(),
            title: title.to_string(),
            todos: Vec::new(),
        };
        lists.insert(id, list.clone());
        debug!("Stored new list {} ({} total)", list.id, lists.len());
        Ok(list)
    }

    async fn update(&self, id: &str, patch: TodoListPatch) -> Result<TodoList, StoreError> {
        let mut lists = self.lists.lock().await;
        let list = lists
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        list.apply(patch);
        Ok(list.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.lists
            .lock()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_uses_timestamp() {
        assert_eq!(next_id(1_700_000_000_000, &BTreeMap::new()), "1700000000000");
    }

    #[test]
    fn test_next_id_bumps_on_collision() {
        let mut taken = BTreeMap::new();
        for id in ["100", "101"] {
            taken.insert(
                id.to_string(),
                TodoList {
                    id: id.to_string(),
                    title: "t".to_string(),
                    todos: vec![],
                },
            );
        }
        assert_eq!(next_id(100, &taken), "102");
    }

    #[tokio::test]
    async fn test_with_examples_seeds_two_lists() {
        let store = InMemoryStore::with_examples();
        let lists = store.list().await;
        assert_eq!(lists.len(), 2);
        assert_eq!(lists["0000000001"].title, "First List");
        assert_eq!(lists["0000000002"].todos[0].text, "First todo of second list!");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let store = InMemoryStore::new();
        assert_eq!(store.create("").await, Err(StoreError::MissingTitle));
        assert_eq!(store.create("   ").await, Err(StoreError::MissingTitle));
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = InMemoryStore::new();
        let a = store.create("A").await.unwrap();
        let b = store.create("B").await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.todos.is_empty());
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_and_missing_is_not_found() {
        let store = InMemoryStore::with_examples();
        let updated = store
            .update("0000000001", TodoListPatch::title("Renamed"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.todos.len(), 1);

        assert_eq!(
            store.update("nope", TodoListPatch::default()).await,
            Err(StoreError::NotFound("nope".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = InMemoryStore::with_examples();
        store.delete("0000000002").await.unwrap();
        assert!(store.get("0000000002").await.is_err());
        assert!(store.delete("0000000002").await.is_err());
    }
}
