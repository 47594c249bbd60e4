//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm ──TuiEvent──▶ handle_event() ──Action──▶ update() ──Effect──▶ EffectRunner
//!                                                       ▲                      │
//!                                                       └──── mpsc::Receiver ◀─┘
//! ```
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after a terminal event or an
//! action arriving from a background task. The poll timeout is short so
//! results from the network and timers show up promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{HttpTodoListApi, TodoListApi};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::effects::EffectRunner;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    BrowserEvent, DialogEvent, DialogPurpose, FormEvent, ListBrowserState, TitleDialogState,
    TodoFormState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Browser,
    Form,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub api_url: String,
    pub focus: Focus,
    // Persistent component states
    pub browser: ListBrowserState,
    pub form: TodoFormState,
    // New/rename overlay (None = hidden)
    pub dialog: Option<TitleDialogState>,
}

impl TuiState {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            focus: Focus::Browser,
            browser: ListBrowserState::new(),
            form: TodoFormState::new(),
            dialog: None,
        }
    }

    /// Pull props from App into the component states.
    pub fn sync(&mut self, app: &App) {
        self.browser.sync(app.list_ids());
        match &app.form {
            Some(form) => self.form.sync(&form.todos),
            None => {
                self.form.reset();
                self.focus = Focus::Browser;
            }
        }
    }
}

/// Translate one terminal event into the actions it triggers.
pub fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return vec![Action::Quit];
    }
    if matches!(event, TuiEvent::Resize) {
        return Vec::new();
    }

    // Any key dismisses the banner
    if app.banner.is_some() {
        return vec![Action::DismissBanner];
    }

    if let Some(dialog) = tui.dialog.as_mut() {
        let Some(dialog_event) = dialog.handle_event(event) else {
            return Vec::new();
        };
        tui.dialog = None;
        return match dialog_event {
            DialogEvent::Confirm(DialogPurpose::Create, title) => vec![Action::CreateList(title)],
            DialogEvent::Confirm(DialogPurpose::Rename(id), title) => {
                vec![Action::RenameList { id, title }]
            }
            DialogEvent::Dismiss => Vec::new(),
        };
    }

    if app.load_error.is_some() {
        return match event {
            TuiEvent::InputChar('r') => vec![Action::Refresh],
            TuiEvent::InputChar('q') => vec![Action::Quit],
            _ => Vec::new(),
        };
    }

    match tui.focus {
        Focus::Browser => handle_browser_event(app, tui, event),
        Focus::Form => handle_form_event(app, tui, event),
    }
}

fn handle_browser_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    if matches!(event, TuiEvent::Tab) {
        if app.form.is_some() {
            tui.focus = Focus::Form;
        }
        return Vec::new();
    }

    let Some(browser_event) = tui.browser.handle_event(event) else {
        return Vec::new();
    };
    match browser_event {
        BrowserEvent::Open(id) => {
            if app.active_list.as_deref() != Some(id.as_str()) {
                tui.form.reset();
            }
            tui.focus = Focus::Form;
            vec![Action::SelectList(id)]
        }
        BrowserEvent::New => {
            tui.dialog = Some(TitleDialogState::create());
            Vec::new()
        }
        BrowserEvent::Rename(id) => {
            if let Some(list) = app.lists.get(&id) {
                let title = list.title.clone();
                tui.dialog = Some(TitleDialogState::rename(id, &title));
            }
            Vec::new()
        }
        BrowserEvent::Delete(id) => vec![Action::DeleteList(id)],
        BrowserEvent::Close => vec![Action::CloseForm],
        BrowserEvent::Quit => vec![Action::Quit],
    }
}

fn handle_form_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    if app.form.is_none() {
        tui.focus = Focus::Browser;
        return Vec::new();
    }

    let Some(form_event) = tui.form.handle_event(event) else {
        return Vec::new();
    };
    match form_event {
        FormEvent::Add => vec![Action::AddTodo],
        FormEvent::Edit { index, text } => vec![Action::EditTodo { index, text }],
        FormEvent::Toggle(index) => vec![Action::ToggleTodo(index)],
        FormEvent::Delete(index) => vec![Action::DeleteTodo(index)],
        FormEvent::Back => {
            tui.focus = Focus::Browser;
            Vec::new()
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for text editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Applies `action` and runs its effect. Returns true when the app should exit.
fn dispatch(app: &mut App, runner: &mut EffectRunner, action: Action) -> bool {
    debug!("Dispatching: {:?}", action);
    let effect = update(app, action);
    if effect == Effect::Quit {
        return true;
    }
    runner.run(effect);
    false
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn TodoListApi> = Arc::new(HttpTodoListApi::new(config.api_url.clone()));
    let mut app = App::new();
    let mut tui = TuiState::new(config.api_url.clone());

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(api, tx, config.autosave_delay, config.error_display);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    dispatch(&mut app, &mut runner, Action::Refresh);
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            tui.sync(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(POLL_TIMEOUT);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            for action in handle_event(&app, &mut tui, &event) {
                if dispatch(&mut app, &mut runner, action) {
                    break 'main;
                }
            }
            // Keep component copies current for the next queued event
            tui.sync(&app);
        }

        // Handle background task actions (fetch results, timers)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if dispatch(&mut app, &mut runner, action) {
                break 'main;
            }
        }
    }

    if app.form.as_ref().is_some_and(|form| form.has_unsaved_changes()) {
        warn!("Exiting with unsaved changes");
    }

    ratatui::restore();
    Ok(())
}
