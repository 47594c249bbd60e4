//! # Core Application Logic
//!
//! This module contains the todo list client's business logic and the data
//! model shared with the server. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Model (lists, todos) │
//!                    │  • Form (autosave FSM)  │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    API     │      │   Server   │
//!     │  Adapter   │      │  Client    │      │  (axum)    │
//!     │ (ratatui)  │      │ (reqwest)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: `TodoList`, `Todo` and the wire bodies
//! - [`form`]: `TodoListForm`, the per-list autosave state machine
//! - [`state`]: The `App` struct, all client state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`autosave`]: `Debouncer`, the single-pending-timer primitive
//! - [`effects`]: `EffectRunner`, which turns effects into I/O
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod autosave;
pub mod config;
pub mod effects;
pub mod form;
pub mod model;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::App;
