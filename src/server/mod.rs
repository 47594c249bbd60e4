//! # REST Server Adapter
//!
//! Exposes a [`TodoListStore`] over HTTP with axum. The store is injected, so
//! tests can run the router against any implementation.

pub mod routes;
pub mod store;

use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

use crate::core::config::ResolvedConfig;

pub use routes::{SharedStore, router};
pub use store::{InMemoryStore, StoreError, TodoListStore};

/// Builds the store described by the config.
pub fn build_store(config: &ResolvedConfig) -> SharedStore {
    if config.seed_examples {
        Arc::new(InMemoryStore::with_examples())
    } else {
        Arc::new(InMemoryStore::new())
    }
}

/// Binds the configured address and serves until the process is stopped.
pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let store = build_store(&config);
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Todo list server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(store)).await
}
