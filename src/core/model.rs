//! # Data Model
//!
//! Wire and domain types shared by the server, the HTTP client and the UI.
//!
//! ```text
//! TodoList
//! ├── id: String        // assigned by the server, never changes
//! ├── title: String
//! └── todos: Vec<Todo>  // ordered; a todo is identified by its position
//! ```

use serde::{Deserialize, Serialize};

/// A single todo item.
///
/// Older clients stored todos as bare strings, so deserialization accepts
/// either `"text"` or `{"text": ..., "completed": ...}`. Serialization always
/// writes the object form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "TodoRepr")]
pub struct Todo {
    pub text: String,
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TodoRepr {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        completed: bool,
    },
}

impl From<TodoRepr> for Todo {
    fn from(repr: TodoRepr) -> Self {
        match repr {
            TodoRepr::Text(text) => Todo {
                text,
                completed: false,
            },
            TodoRepr::Full { text, completed } => Todo { text, completed },
        }
    }
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Shallow-merges a patch into this list. Fields absent from the patch keep
    /// their current value.
    pub fn apply(&mut self, patch: TodoListPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(todos) = patch.todos {
            self.todos = todos;
        }
    }
}

/// Body of `POST /api/todolists`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateTodoList {
    #[serde(default)]
    pub title: String,
}

/// Body of `PUT /api/todolists/{id}`. Unknown fields (including `id`) are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TodoListPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<Todo>>,
}

impl TodoListPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            todos: None,
        }
    }

    pub fn todos(todos: Vec<Todo>) -> Self {
        Self {
            title: None,
            todos: Some(todos),
        }
    }
}

/// JSON error body returned by the server for 4xx responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Moves completed todos after incomplete ones, keeping relative order inside
/// each group. `sort_by_key` is stable, so this is a stable partition.
pub fn sort_completed_last(todos: &mut [Todo]) {
    todos.sort_by_key(|todo| todo.completed);
}
