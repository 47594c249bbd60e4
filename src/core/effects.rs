//! # Effect Runner
//!
//! Executes the `Effect`s returned by `update()`. Network calls run as spawned
//! tokio tasks and report back as `Action`s on the channel; timers are
//! `Debouncer`s, so each kind of timer has at most one pending instance.
//!
//! ```text
//! update() ──Effect──▶ EffectRunner ──spawn──▶ TodoListApi
//!    ▲                      │                      │
//!    └────── Action ◀───────┴──── mpsc ◀───────────┘
//! ```

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{info, warn};

use crate::api::TodoListApi;
use crate::core::action::{Action, Effect, Operation};
use crate::core::autosave::Debouncer;
use crate::core::model::{Todo, TodoListPatch};

pub struct EffectRunner {
    api: Arc<dyn TodoListApi>,
    tx: Sender<Action>,
    autosave: Debouncer,
    save_error_reset: Debouncer,
    banner_dismiss: Debouncer,
}

fn send(tx: &Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

/// Spawns a task that sends `action` when the debouncer fires.
fn schedule_action(debouncer: &mut Debouncer, tx: &Sender<Action>, action: Action) {
    let tx = tx.clone();
    debouncer.schedule(async move { send(&tx, action) });
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn TodoListApi>,
        tx: Sender<Action>,
        autosave_delay: Duration,
        error_display: Duration,
    ) -> Self {
        Self {
            api,
            tx,
            autosave: Debouncer::new(autosave_delay),
            save_error_reset: Debouncer::new(error_display),
            banner_dismiss: Debouncer::new(error_display),
        }
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Performs `effect`. `Effect::Quit` and `Effect::None` are left to the caller.
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::None | Effect::Quit => {}
            Effect::FetchLists => self.fetch_lists(),
            Effect::CreateList(title) => self.create_list(title),
            Effect::RenameList { id, title } => self.rename_list(id, title),
            Effect::DeleteList(id) => self.delete_list(id),
            Effect::ScheduleAutosave => {
                schedule_action(&mut self.autosave, &self.tx, Action::AutosaveDue)
            }
            Effect::CancelAutosave => {
                self.autosave.cancel();
                self.save_error_reset.cancel();
            }
            Effect::Save {
                list_id,
                generation,
                todos,
            } => self.save(list_id, generation, todos),
            Effect::ScheduleSaveErrorReset => {
                schedule_action(&mut self.save_error_reset, &self.tx, Action::ClearSaveError)
            }
            Effect::ScheduleBannerDismiss => {
                schedule_action(&mut self.banner_dismiss, &self.tx, Action::DismissBanner)
            }
        }
    }

    fn fetch_lists(&self) {
        info!("Fetching todo lists");
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.list_all().await;
            send(&tx, Action::ListsLoaded(result));
        });
    }

    fn create_list(&self, title: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match api.create(&title).await {
                Ok(list) => Action::ListCreated(list),
                Err(error) => Action::RequestFailed {
                    operation: Operation::Create,
                    error,
                },
            };
            send(&tx, action);
        });
    }

    fn rename_list(&self, id: String, title: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match api.update(&id, &TodoListPatch::title(title)).await {
                Ok(list) => Action::ListRenamed(list),
                Err(error) => Action::RequestFailed {
                    operation: Operation::Rename,
                    error,
                },
            };
            send(&tx, action);
        });
    }

    fn delete_list(&self, id: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match api.delete(&id).await {
                Ok(()) => Action::ListDeleted(id),
                Err(error) => Action::RequestFailed {
                    operation: Operation::Delete,
                    error,
                },
            };
            send(&tx, action);
        });
    }

    fn save(&self, list_id: String, generation: u64, todos: Vec<Todo>) {
        info!("Saving {} todos to list {}", todos.len(), list_id);
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let patch = TodoListPatch::todos(todos.clone());
            let action = match api.update(&list_id, &patch).await {
                Ok(list) => Action::SaveSucceeded {
                    generation,
                    list,
                    sent: todos,
                },
                Err(error) => Action::SaveFailed {
                    generation,
                    list_id,
                    error,
                },
            };
            send(&tx, action);
        });
    }
}
