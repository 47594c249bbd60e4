//! # Autosave Form
//!
//! Local editing state for one open todo list.
//!
//! ```text
//!            edit                 quiet period            success
//!   Idle ───────────▶ Dirty ─────────────────▶ Saving ─────────────▶ Idle
//!    ▲                  ▲  (edit resets timer)    │  (or Dirty if edited
//!    │                  │                         │   while in flight)
//!    │                  └──── edit ───────────────┤
//!    │                                            │ failure
//!    └──────────── error timeout ──────── Error ◀─┘
//! ```
//!
//! The form never performs I/O. `begin_save` hands back the payload to send
//! and the runtime reports the outcome via `save_succeeded` / `save_failed`.

use crate::core::model::{Todo, TodoList, sort_completed_last};

pub const SAVE_ERROR_MESSAGE: &str = "Failed to save changes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Dirty,
    Saving,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct TodoListForm {
    pub list_id: String,
    pub todos: Vec<Todo>,
    pub status: SaveStatus,
    /// Distinguishes successive forms opened on the same list.
    pub generation: u64,
    /// Todos as of the last successful save (or as loaded).
    last_saved: Vec<Todo>,
}

impl TodoListForm {
    pub fn new(list: &TodoList) -> Self {
        Self {
            list_id: list.id.clone(),
            todos: list.todos.clone(),
            status: SaveStatus::Idle,
            generation: 0,
            last_saved: list.todos.clone(),
        }
    }

    /// Replaces todos and snapshot with a fresher server copy.
    pub fn reseed(&mut self, list: &TodoList) {
        self.todos = list.todos.clone();
        self.last_saved = list.todos.clone();
        self.status = SaveStatus::Idle;
    }

    pub fn is_saving(&self) -> bool {
        self.status == SaveStatus::Saving
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SaveStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// True when the on-screen todos differ from the last saved snapshot.
    pub fn has_unsaved_changes(&self) -> bool {
        self.todos != self.last_saved
    }

    /// Appends an empty todo, placed after the last incomplete one.
    pub fn add_todo(&mut self) -> usize {
        self.todos.push(Todo::default());
        sort_completed_last(&mut self.todos);
        self.mark_dirty();
        self.todos.iter().rposition(|t| !t.completed).unwrap_or(0)
    }

    pub fn edit_text(&mut self, index: usize, text: String) -> bool {
        let Some(todo) = self.todos.get_mut(index) else {
            return false;
        };
        todo.text = text;
        self.mark_dirty();
        true
    }

    /// Flips `completed` and resorts so completed todos sit at the bottom.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(todo) = self.todos.get_mut(index) else {
            return false;
        };
        todo.completed = !todo.completed;
        sort_completed_last(&mut self.todos);
        self.mark_dirty();
        true
    }

    pub fn delete(&mut self, index: usize) -> bool {
        if index >= self.todos.len() {
            return false;
        }
        self.todos.remove(index);
        self.mark_dirty();
        true
    }

    /// Called when the debounce timer fires. Returns the todos to send, or
    /// `None` if nothing changed since the last save.
    pub fn begin_save(&mut self) -> Option<Vec<Todo>> {
        // One save in flight at a time; its completion re-arms the timer.
        if self.is_saving() {
            return None;
        }
        if !self.has_unsaved_changes() {
            if self.status == SaveStatus::Dirty {
                self.status = SaveStatus::Idle;
            }
            return None;
        }
        self.status = SaveStatus::Saving;
        Some(self.todos.clone())
    }

    /// Records `sent` as the new snapshot.
    pub fn save_succeeded(&mut self, sent: Vec<Todo>) {
        self.last_saved = sent;
        self.status = if self.has_unsaved_changes() {
            SaveStatus::Dirty
        } else {
            SaveStatus::Idle
        };
    }

    pub fn save_failed(&mut self) {
        self.status = SaveStatus::Error(SAVE_ERROR_MESSAGE.to_string());
    }

    pub fn clear_error(&mut self) {
        if matches!(self.status, SaveStatus::Error(_)) {
            self.status = SaveStatus::Idle;
        }
    }

    fn mark_dirty(&mut self) {
        // An in-flight save keeps its status; the outcome decides Idle vs Dirty.
        if self.status != SaveStatus::Saving {
            self.status = SaveStatus::Dirty;
        }
    }
}
