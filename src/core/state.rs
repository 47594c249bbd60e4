//! # Application State
//!
//! Core business state for the todo list client. This module contains domain
//! logic only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── lists: BTreeMap<String, TodoList>  // server copy, keyed by id
//! ├── active_list: Option<String>        // list open in the form
//! ├── form: Option<TodoListForm>         // local edits of the active list
//! ├── is_loading: bool                   // initial fetch in flight
//! ├── load_error: Option<String>         // fetch failed, nothing to show
//! ├── banner: Option<String>             // transient error notification
//! └── status_message: String             // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::BTreeMap;

use crate::core::form::TodoListForm;
use crate::core::model::TodoList;

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load todo lists. Please try again later.";

pub struct App {
    pub lists: BTreeMap<String, TodoList>,
    pub active_list: Option<String>,
    pub form: Option<TodoListForm>,
    pub is_loading: bool,
    pub load_error: Option<String>,
    pub banner: Option<String>,
    pub status_message: String,
    /// Last generation handed to an opened form.
    form_generation: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// A fresh app, waiting for the first fetch.
    pub fn new() -> Self {
        Self {
            lists: BTreeMap::new(),
            active_list: None,
            form: None,
            is_loading: true,
            load_error: None,
            banner: None,
            status_message: String::new(),
            form_generation: 0,
        }
    }

    pub fn active(&self) -> Option<&TodoList> {
        self.active_list.as_ref().and_then(|id| self.lists.get(id))
    }

    /// Ids in display order.
    pub fn list_ids(&self) -> Vec<String> {
        self.lists.keys().cloned().collect()
    }

    /// Opens the form for `id`, replacing any open form.
    pub(crate) fn open_form(&mut self, id: &str) -> bool {
        let Some(list) = self.lists.get(id) else {
            return false;
        };
        self.form_generation += 1;
        let mut form = TodoListForm::new(list);
        form.generation = self.form_generation;
        self.form = Some(form);
        self.active_list = Some(id.to_string());
        true
    }

    pub(crate) fn close_form(&mut self) {
        self.form = None;
        self.active_list = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{sample_list, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = super::App::new();
        assert!(app.is_loading);
        assert!(app.lists.is_empty());
        assert!(app.form.is_none());
    }

    #[test]
    fn test_open_form_requires_known_list() {
        let mut app = test_app(vec![sample_list("1", "Chores", &["dishes"])]);
        assert!(!app.open_form("missing"));
        assert!(app.open_form("1"));
        assert_eq!(app.active().map(|l| l.title.as_str()), Some("Chores"));
        assert_eq!(app.form.as_ref().map(|f| f.todos.len()), Some(1));

        app.close_form();
        assert!(app.active().is_none());
        assert!(app.form.is_none());
    }

    #[test]
    fn test_each_opened_form_gets_a_new_generation() {
        let mut app = test_app(vec![sample_list("1", "Chores", &[])]);
        app.open_form("1");
        let first = app.form.as_ref().map(|f| f.generation);
        app.open_form("1");
        let second = app.form.as_ref().map(|f| f.generation);
        assert!(first.is_some());
        assert_ne!(first, second);
    }
}
