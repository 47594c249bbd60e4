//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar showing the API URL and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState` and implements `EventHandler`; a
//! transient wrapper borrows it each frame to render:
//! - `ListBrowser`: Selectable list of todo lists
//! - `TodoForm`: Autosaving editor for the open list
//! - `TitleDialog`: Modal for naming or renaming a list
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── list_browser.rs  (Left panel)
//! ├── todo_form.rs     (Right panel)
//! └── title_dialog.rs  (Overlay)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod list_browser;
pub mod title_dialog;
pub mod todo_form;
pub use list_browser::{BrowserEvent, ListBrowser, ListBrowserState};
pub use title_dialog::{DialogEvent, DialogPurpose, TitleDialog, TitleDialogState};
pub use todo_form::{FormEvent, TodoForm, TodoFormState};
