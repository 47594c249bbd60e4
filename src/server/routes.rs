//! # REST Handlers
//!
//! ```text
//! GET    /api/todolists        → 200 {id: TodoList, ...}
//! GET    /api/todolists/{id}   → 200 TodoList | 404
//! POST   /api/todolists        → 201 TodoList | 400
//! PUT    /api/todolists/{id}   → 200 TodoList | 400 | 404
//! DELETE /api/todolists/{id}   → 204 | 404
//! ```
//!
//! Every 4xx carries a JSON body `{"error": "..."}`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, info, warn};

use crate::core::model::{CreateTodoList, ErrorBody, TodoList, TodoListPatch};
use crate::server::store::{StoreError, TodoListStore};

pub type SharedStore = Arc<dyn TodoListStore>;

pub const NOT_FOUND_MESSAGE: &str = "TodoList not found";
pub const MISSING_TITLE_MESSAGE: &str = "Title is required";

/// Error response: a status code plus a JSON `{"error": message}` body.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StoreError> for HttpError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: NOT_FOUND_MESSAGE.to_string(),
            },
            StoreError::MissingTitle => Self::bad_request(MISSING_TITLE_MESSAGE),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        warn!("Responding {}: {}", self.status.as_u16(), self.message);
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/api/todolists", get(list_all).post(create))
        .route(
            "/api/todolists/{id}",
            get(get_one).put(update).delete(remove),
        )
        .with_state(store)
}

async fn hello() -> &'static str {
    "Hello World!"
}

async fn list_all(State(store): State<SharedStore>) -> Json<BTreeMap<String, TodoList>> {
    let lists = store.list().await;
    debug!("GET /api/todolists -> {} lists", lists.len());
    Json(lists)
}

async fn get_one(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<TodoList>, HttpError> {
    debug!("GET /api/todolists/{}", id);
    Ok(Json(store.get(&id).await?))
}

async fn create(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateTodoList>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoList>), HttpError> {
    let Json(body) = payload?;
    let list = store.create(&body.title).await?;
    info!("Created list {} ({:?})", list.id, list.title);
    Ok((StatusCode::CREATED, Json(list)))
}

async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<TodoListPatch>, JsonRejection>,
) -> Result<Json<TodoList>, HttpError> {
    let Json(patch) = payload?;
    let list = store.update(&id, patch).await?;
    info!("Updated list {} ({} todos)", list.id, list.todos.len());
    Ok(Json(list))
}

async fn remove(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    store.delete(&id).await?;
    info!("Deleted list {}", id);
    Ok(StatusCode::NO_CONTENT)
}
