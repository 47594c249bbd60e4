//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User ticks a todo? That's `Action::ToggleTodo(index)`.
//! Server confirms a save? That's `Action::SaveSucceeded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns the `Effect` the runtime should perform. No side
//! effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::api::ApiError;
use crate::core::form::{SaveStatus, TodoListForm};
use crate::core::model::{Todo, TodoList};
use crate::core::state::{App, LOAD_ERROR_MESSAGE};

/// A list-level request whose failure is shown as a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Rename,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create new list. Please try again.",
            Operation::Rename => "Failed to rename list. Please try again.",
            Operation::Delete => "Failed to delete list. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Fetch all lists from the server.
    Refresh,
    ListsLoaded(Result<BTreeMap<String, TodoList>, ApiError>),

    SelectList(String),
    CloseForm,
    CreateList(String),
    ListCreated(TodoList),
    RenameList { id: String, title: String },
    ListRenamed(TodoList),
    DeleteList(String),
    ListDeleted(String),
    RequestFailed { operation: Operation, error: ApiError },
    DismissBanner,

    AddTodo,
    EditTodo { index: usize, text: String },
    ToggleTodo(usize),
    DeleteTodo(usize),
    /// The autosave quiet period elapsed.
    AutosaveDue,
    /// `generation` identifies the form instance that started the save.
    SaveSucceeded {
        generation: u64,
        list: TodoList,
        sent: Vec<Todo>,
    },
    SaveFailed {
        generation: u64,
        list_id: String,
        error: ApiError,
    },
    ClearSaveError,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchLists,
    CreateList(String),
    RenameList { id: String, title: String },
    DeleteList(String),
    /// (Re)start the autosave quiet period.
    ScheduleAutosave,
    /// The form was torn down; drop any pending autosave.
    CancelAutosave,
    Save {
        list_id: String,
        generation: u64,
        todos: Vec<Todo>,
    },
    ScheduleSaveErrorReset,
    ScheduleBannerDismiss,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::Refresh => {
            app.is_loading = true;
            app.load_error = None;
            Effect::FetchLists
        }

        Action::ListsLoaded(Ok(lists)) => {
            info!("Loaded {} todo lists", lists.len());
            app.lists = lists;
            app.is_loading = false;
            app.load_error = None;
            let still_present = app
                .active_list
                .as_ref()
                .is_some_and(|id| app.lists.contains_key(id));
            if app.form.is_some() && !still_present {
                app.close_form();
                return Effect::CancelAutosave;
            }
            Effect::None
        }

        Action::ListsLoaded(Err(e)) => {
            warn!("Error fetching todo lists: {}", e);
            app.is_loading = false;
            app.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
            Effect::None
        }

        Action::SelectList(id) => {
            let already_open = app.form.as_ref().is_some_and(|f| f.list_id == id);
            if already_open || !app.open_form(&id) {
                return Effect::None;
            }
            debug!("Opened list {}", id);
            Effect::CancelAutosave
        }

        Action::CloseForm => {
            if app.form.is_none() {
                return Effect::None;
            }
            app.close_form();
            Effect::CancelAutosave
        }

        Action::CreateList(title) => {
            if title.trim().is_empty() {
                return Effect::None;
            }
            Effect::CreateList(title)
        }

        Action::ListCreated(list) => {
            let id = list.id.clone();
            app.status_message = format!("Created \"{}\"", list.title);
            app.lists.insert(id.clone(), list);
            app.open_form(&id);
            Effect::CancelAutosave
        }

        Action::RenameList { id, title } => {
            if title.trim().is_empty() || !app.lists.contains_key(&id) {
                return Effect::None;
            }
            Effect::RenameList { id, title }
        }

        Action::ListRenamed(list) => {
            app.status_message = format!("Renamed to \"{}\"", list.title);
            // The open form keeps its local todos.
            app.lists.insert(list.id.clone(), list);
            Effect::None
        }

        Action::DeleteList(id) => Effect::DeleteList(id),

        Action::ListDeleted(id) => {
            if let Some(list) = app.lists.remove(&id) {
                app.status_message = format!("Deleted \"{}\"", list.title);
            }
            if app.active_list.as_deref() == Some(id.as_str()) {
                app.close_form();
                return Effect::CancelAutosave;
            }
            Effect::None
        }

        Action::RequestFailed { operation, error } => {
            warn!("{:?} request failed: {}", operation, error);
            app.banner = Some(operation.failure_message().to_string());
            Effect::ScheduleBannerDismiss
        }

        Action::DismissBanner => {
            app.banner = None;
            Effect::None
        }

        Action::AddTodo => match app.form.as_mut() {
            Some(form) => {
                form.add_todo();
                Effect::ScheduleAutosave
            }
            None => Effect::None,
        },

        Action::EditTodo { index, text } => edit_form(app, |form| form.edit_text(index, text)),

        Action::ToggleTodo(index) => edit_form(app, |form| form.toggle(index)),

        Action::DeleteTodo(index) => edit_form(app, |form| form.delete(index)),

        Action::AutosaveDue => {
            let Some(form) = app.form.as_mut() else {
                return Effect::None;
            };
            match form.begin_save() {
                Some(todos) => {
                    debug!("Autosaving {} todos for list {}", todos.len(), form.list_id);
                    Effect::Save {
                        list_id: form.list_id.clone(),
                        generation: form.generation,
                        todos,
                    }
                }
                None => Effect::None,
            }
        }

        Action::SaveSucceeded {
            generation,
            list,
            sent,
        } => {
            // A list deleted while the save was in flight stays deleted.
            if let Some(entry) = app.lists.get_mut(&list.id) {
                *entry = list.clone();
            }
            match app.form.as_mut() {
                Some(form) if form.generation == generation => {
                    form.save_succeeded(sent);
                    if form.status == SaveStatus::Dirty {
                        Effect::ScheduleAutosave
                    } else {
                        Effect::None
                    }
                }
                // Reopened while the save was in flight: its copy predates the reply.
                Some(form)
                    if form.list_id == list.id
                        && !form.is_saving()
                        && !form.has_unsaved_changes() =>
                {
                    debug!("Refreshing reopened list {} from a late save", list.id);
                    form.reseed(&list);
                    Effect::None
                }
                _ => Effect::None,
            }
        }

        Action::SaveFailed {
            generation,
            list_id,
            error,
        } => {
            warn!("Error updating todo list {}: {}", list_id, error);
            match app.form.as_mut() {
                Some(form) if form.generation == generation => {
                    form.save_failed();
                    Effect::ScheduleSaveErrorReset
                }
                _ => Effect::None,
            }
        }

        Action::ClearSaveError => {
            if let Some(form) = app.form.as_mut() {
                form.clear_error();
            }
            Effect::None
        }
    }
}

/// Applies an edit to the open form; schedules an autosave if it changed anything.
fn edit_form(
    app: &mut App,
    edit: impl FnOnce(&mut TodoListForm) -> bool,
) -> Effect {
    match app.form.as_mut() {
        Some(form) => {
            if edit(form) {
                Effect::ScheduleAutosave
            } else {
                Effect::None
            }
        }
        None => Effect::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_list, test_app};

    fn app_with_open_list() -> App {
        let mut app = test_app(vec![
            sample_list("1", "Chores", &["dishes", "laundry"]),
            sample_list("2", "Groceries", &["milk"]),
        ]);
        update(&mut app, Action::SelectList("1".to_string()));
        app
    }

    fn form_texts(app: &App) -> Vec<String> {
        app.form
            .as_ref()
            .map(|f| f.todos.iter().map(|t| t.text.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_refresh_then_load_failure() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Refresh), Effect::FetchLists);
        assert!(app.is_loading);
        let effect = update(
            &mut app,
            Action::ListsLoaded(Err(ApiError::Network("refused".to_string()))),
        );
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.load_error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn test_reload_closes_form_of_vanished_list() {
        let mut app = app_with_open_list();
        let mut lists = BTreeMap::new();
        lists.insert("2".to_string(), sample_list("2", "Groceries", &[]));
        let effect = update(&mut app, Action::ListsLoaded(Ok(lists)));
        assert_eq!(effect, Effect::CancelAutosave);
        assert!(app.form.is_none());
    }

    #[test]
    fn test_select_list_opens_form_and_cancels_old_timer() {
        let mut app = app_with_open_list();
        assert_eq!(form_texts(&app), vec!["dishes", "laundry"]);

        assert_eq!(
            update(&mut app, Action::SelectList("2".to_string())),
            Effect::CancelAutosave
        );
        assert_eq!(app.active_list.as_deref(), Some("2"));
        assert_eq!(form_texts(&app), vec!["milk"]);
    }

    #[test]
    fn test_selecting_open_list_keeps_local_edits() {
        let mut app = app_with_open_list();
        update(&mut app, Action::AddTodo);
        let effect = update(&mut app, Action::SelectList("1".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(form_texts(&app).len(), 3);
    }

    #[test]
    fn test_select_unknown_list_is_noop() {
        let mut app = app_with_open_list();
        let effect = update(&mut app, Action::SelectList("404".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.active_list.as_deref(), Some("1"));
    }

    #[test]
    fn test_create_list_ignores_blank_title() {
        let mut app = app_with_open_list();
        assert_eq!(update(&mut app, Action::CreateList("  ".to_string())), Effect::None);
        assert_eq!(
            update(&mut app, Action::CreateList("Work".to_string())),
            Effect::CreateList("Work".to_string())
        );
    }

    #[test]
    fn test_list_created_becomes_active() {
        let mut app = app_with_open_list();
        update(&mut app, Action::ListCreated(sample_list("3", "Work", &[])));
        assert_eq!(app.active_list.as_deref(), Some("3"));
        assert_eq!(app.lists.len(), 3);
        assert!(form_texts(&app).is_empty());
    }

    #[test]
    fn test_rename_keeps_form_todos() {
        let mut app = app_with_open_list();
        update(&mut app, Action::ToggleTodo(0));
        assert_eq!(
            update(
                &mut app,
                Action::RenameList {
                    id: "1".to_string(),
                    title: "Housework".to_string()
                }
            ),
            Effect::RenameList {
                id: "1".to_string(),
                title: "Housework".to_string()
            }
        );
        update(&mut app, Action::ListRenamed(sample_list("1", "Housework", &["dishes", "laundry"])));
        assert_eq!(app.lists["1"].title, "Housework");
        assert_eq!(form_texts(&app), vec!["laundry", "dishes"]);
    }

    #[test]
    fn test_delete_active_list_closes_form() {
        let mut app = app_with_open_list();
        assert_eq!(
            update(&mut app, Action::DeleteList("1".to_string())),
            Effect::DeleteList("1".to_string())
        );
        assert_eq!(
            update(&mut app, Action::ListDeleted("1".to_string())),
            Effect::CancelAutosave
        );
        assert!(app.form.is_none());
        assert!(!app.lists.contains_key("1"));
    }

    #[test]
    fn test_delete_other_list_keeps_form() {
        let mut app = app_with_open_list();
        assert_eq!(update(&mut app, Action::ListDeleted("2".to_string())), Effect::None);
        assert!(app.form.is_some());
    }

    #[test]
    fn test_request_failure_shows_banner() {
        let mut app = app_with_open_list();
        let effect = update(
            &mut app,
            Action::RequestFailed {
                operation: Operation::Delete,
                error: ApiError::Network("down".to_string()),
            },
        );
        assert_eq!(effect, Effect::ScheduleBannerDismiss);
        assert_eq!(app.banner.as_deref(), Some(Operation::Delete.failure_message()));
        update(&mut app, Action::DismissBanner);
        assert!(app.banner.is_none());
    }

    #[test]
    fn test_edits_schedule_autosave() {
        let mut app = app_with_open_list();
        assert_eq!(update(&mut app, Action::AddTodo), Effect::ScheduleAutosave);
        assert_eq!(
            update(&mut app, Action::EditTodo { index: 0, text: "plates".to_string() }),
            Effect::ScheduleAutosave
        );
        assert_eq!(update(&mut app, Action::ToggleTodo(1)), Effect::ScheduleAutosave);
        assert_eq!(update(&mut app, Action::DeleteTodo(0)), Effect::ScheduleAutosave);
        assert_eq!(update(&mut app, Action::DeleteTodo(99)), Effect::None);
    }

    #[test]
    fn test_edits_without_form_are_noops() {
        let mut app = test_app(vec![sample_list("1", "Chores", &[])]);
        assert_eq!(update(&mut app, Action::AddTodo), Effect::None);
        assert_eq!(update(&mut app, Action::ToggleTodo(0)), Effect::None);
        assert_eq!(update(&mut app, Action::AutosaveDue), Effect::None);
    }

    #[test]
    fn test_autosave_cycle() {
        let mut app = app_with_open_list();
        update(&mut app, Action::EditTodo { index: 0, text: "plates".to_string() });
        let Effect::Save {
            list_id,
            generation,
            todos,
        } = update(&mut app, Action::AutosaveDue)
        else {
            panic!("expected a save");
        };
        assert_eq!(list_id, "1");
        assert_eq!(todos[0].text, "plates");

        let saved = TodoList {
            id: "1".to_string(),
            title: "Chores".to_string(),
            todos: todos.clone(),
        };
        let effect = update(
            &mut app,
            Action::SaveSucceeded {
                generation,
                list: saved,
                sent: todos,
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.lists["1"].todos[0].text, "plates");
        assert_eq!(app.form.as_ref().map(|f| f.status.clone()), Some(SaveStatus::Idle));
    }

    #[test]
    fn test_autosave_with_no_changes_skips_save() {
        let mut app = app_with_open_list();
        update(&mut app, Action::EditTodo { index: 0, text: "x".to_string() });
        update(&mut app, Action::EditTodo { index: 0, text: "dishes".to_string() });
        assert_eq!(update(&mut app, Action::AutosaveDue), Effect::None);
    }

    #[test]
    fn test_edit_during_save_rearms_autosave() {
        let mut app = app_with_open_list();
        update(&mut app, Action::EditTodo { index: 0, text: "a".to_string() });
        let Effect::Save {
            generation, todos, ..
        } = update(&mut app, Action::AutosaveDue)
        else {
            panic!("expected a save");
        };
        update(&mut app, Action::EditTodo { index: 0, text: "ab".to_string() });
        let saved = sample_list("1", "Chores", &["a", "laundry"]);
        let effect = update(
            &mut app,
            Action::SaveSucceeded {
                generation,
                list: saved,
                sent: todos,
            },
        );
        assert_eq!(effect, Effect::ScheduleAutosave);
    }

    #[test]
    fn test_save_for_deleted_list_does_not_resurrect_it() {
        let mut app = app_with_open_list();
        update(&mut app, Action::ListDeleted("1".to_string()));
        let saved = sample_list("1", "Chores", &[]);
        update(
            &mut app,
            Action::SaveSucceeded {
                generation: 1,
                list: saved,
                sent: vec![],
            },
        );
        assert!(!app.lists.contains_key("1"));
    }

    #[test]
    fn test_save_failure_then_error_reset() {
        let mut app = app_with_open_list();
        update(&mut app, Action::ToggleTodo(0));
        update(&mut app, Action::AutosaveDue);
        let generation = app.form.as_ref().unwrap().generation;
        let effect = update(
            &mut app,
            Action::SaveFailed {
                generation,
                list_id: "1".to_string(),
                error: ApiError::Api { status: 500, message: "boom".to_string() },
            },
        );
        assert_eq!(effect, Effect::ScheduleSaveErrorReset);
        assert!(app.form.as_ref().and_then(|f| f.error()).is_some());

        update(&mut app, Action::ClearSaveError);
        assert_eq!(app.form.as_ref().map(|f| f.status.clone()), Some(SaveStatus::Idle));
    }

    #[test]
    fn test_stale_save_failure_is_ignored() {
        let mut app = app_with_open_list();
        let effect = update(
            &mut app,
            Action::SaveFailed {
                generation: 0,
                list_id: "2".to_string(),
                error: ApiError::Network("x".to_string()),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.form.as_ref().and_then(|f| f.error()).is_none());
    }

    #[test]
    fn test_late_save_reply_reseeds_reopened_form() {
        let mut app = app_with_open_list();
        update(&mut app, Action::EditTodo { index: 0, text: "plates".to_string() });
        let Effect::Save {
            generation, todos, ..
        } = update(&mut app, Action::AutosaveDue)
        else {
            panic!("expected a save");
        };

        update(&mut app, Action::SelectList("2".to_string()));
        update(&mut app, Action::SelectList("1".to_string()));
        assert_eq!(form_texts(&app), vec!["dishes", "laundry"]);

        let saved = sample_list("1", "Chores", &["plates", "laundry"]);
        let effect = update(
            &mut app,
            Action::SaveSucceeded {
                generation,
                list: saved,
                sent: todos,
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(form_texts(&app), vec!["plates", "laundry"]);
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.status, SaveStatus::Idle);
        assert!(!form.has_unsaved_changes());
    }

    #[test]
    fn test_late_save_reply_keeps_edits_of_reopened_form() {
        let mut app = app_with_open_list();
        update(&mut app, Action::EditTodo { index: 0, text: "plates".to_string() });
        let Effect::Save {
            generation, todos, ..
        } = update(&mut app, Action::AutosaveDue)
        else {
            panic!("expected a save");
        };

        update(&mut app, Action::CloseForm);
        update(&mut app, Action::SelectList("1".to_string()));
        update(&mut app, Action::EditTodo { index: 1, text: "towels".to_string() });

        let saved = sample_list("1", "Chores", &["plates", "laundry"]);
        let effect = update(
            &mut app,
            Action::SaveSucceeded {
                generation,
                list: saved,
                sent: todos,
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(form_texts(&app), vec!["dishes", "towels"]);
        assert_eq!(app.form.as_ref().unwrap().status, SaveStatus::Dirty);
        assert_eq!(app.lists["1"].todos[0].text, "plates");
    }

    #[test]
    fn test_late_save_failure_skips_reopened_form() {
        let mut app = app_with_open_list();
        update(&mut app, Action::ToggleTodo(0));
        update(&mut app, Action::AutosaveDue);
        let generation = app.form.as_ref().unwrap().generation;
        update(&mut app, Action::SelectList("2".to_string()));
        update(&mut app, Action::SelectList("1".to_string()));

        let effect = update(
            &mut app,
            Action::SaveFailed {
                generation,
                list_id: "1".to_string(),
                error: ApiError::Network("timeout".to_string()),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.form.as_ref().and_then(|f| f.error()).is_none());
    }
}
