//! reqwest implementation of [`TodoListApi`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::{ApiError, TodoListApi};
use crate::core::model::{CreateTodoList, ErrorBody, TodoList, TodoListPatch};

pub struct HttpTodoListApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTodoListApi {
    /// `base_url` is the API root, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/todolists", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/todolists/{}", self.base_url, id)
    }
}

/// Turns a non-success response into `ApiError::Api`, preferring the server's
/// `{"error": ...}` message over the raw body.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    warn!("Todo API error: {} - {}", status.as_u16(), message);
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

fn network(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[async_trait]
impl TodoListApi for HttpTodoListApi {
    async fn list_all(&self) -> Result<BTreeMap<String, TodoList>, ApiError> {
        debug!("GET {}", self.collection_url());
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(network)?;
        let lists: BTreeMap<String, TodoList> = parse_json(response).await?;
        info!("Fetched {} todo lists", lists.len());
        Ok(lists)
    }

    async fn get(&self, id: &str) -> Result<TodoList, ApiError> {
        debug!("GET {}", self.item_url(id));
        let response = self
            .client
            .get(self.item_url(id))
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    async fn create(&self, title: &str) -> Result<TodoList, ApiError> {
        debug!("POST {} title={:?}", self.collection_url(), title);
        let body = CreateTodoList {
            title: title.to_string(),
        };
        let response = self
            .client
            .post(self.collection_url())
            .json(&body)
            .send()
            .await
            .map_err(network)?;
        let list: TodoList = parse_json(response).await?;
        info!("Created todo list {}", list.id);
        Ok(list)
    }

    async fn update(&self, id: &str, patch: &TodoListPatch) -> Result<TodoList, ApiError> {
        debug!(
            "PUT {} (title: {}, todos: {:?})",
            self.item_url(id),
            patch.title.is_some(),
            patch.todos.as_ref().map(Vec::len)
        );
        let response = self
            .client
            .put(self.item_url(id))
            .json(patch)
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        debug!("DELETE {}", self.item_url(id));
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(network)?;
        let response = check_status(response).await?;
        if response.status() != StatusCode::NO_CONTENT {
            debug!("DELETE returned {} instead of 204", response.status());
        }
        info!("Deleted todo list {}", id);
        Ok(())
    }
}
