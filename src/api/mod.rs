pub mod client;
pub mod http;

pub use client::{ApiError, TodoListApi};
pub use http::HttpTodoListApi;
