//! Task board HTTP client.
//!
//! `BoardClient` is a thin adapter over the REST API; `Board` is the
//! client-side view of the three columns that turns user gestures
//! (add, drop, edit, delete) into API calls.

mod board;

pub use board::{drop_position, parse_labels, Board, Card, EditForm};

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::api::types::{CreateTaskRequest, DeleteResponse, ErrorResponse};
use crate::task::{Task, TaskId, TaskPatch};

#[derive(Clone)]
pub struct BoardClient {
    base_url: String,
    client: reqwest::Client,
}

impl BoardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_tasks(&self) -> anyhow::Result<Vec<Task>> {
        let resp = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .send()
            .await
            .context("Failed to call GET /tasks")?;
        read_json(resp, "GET /tasks").await
    }

    pub async fn create_task(&self, text: &str) -> anyhow::Result<Task> {
        let body = CreateTaskRequest {
            text: Some(text.to_string()),
        };
        let resp = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .json(&body)
            .send()
            .await
            .context("Failed to call POST /tasks")?;
        read_json(resp, "POST /tasks").await
    }

    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> anyhow::Result<Task> {
        let resp = self
            .client
            .put(format!("{}/tasks/{}", self.base_url, id))
            .json(patch)
            .send()
            .await
            .with_context(|| format!("Failed to call PUT /tasks/{}", id))?;
        read_json(resp, "PUT /tasks").await
    }

    pub async fn delete_task(&self, id: TaskId) -> anyhow::Result<()> {
        let resp = self
            .client
            .delete(format!("{}/tasks/{}", self.base_url, id))
            .send()
            .await
            .with_context(|| format!("Failed to call DELETE /tasks/{}", id))?;
        let result: DeleteResponse = read_json(resp, "DELETE /tasks").await?;
        if !result.success {
            anyhow::bail!("DELETE /tasks/{} reported failure", id);
        }
        Ok(())
    }
}

/// Decode a JSON body, turning non-2xx statuses into errors carrying the
/// server's `{error}` message.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response, what: &str) -> anyhow::Result<T> {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        anyhow::bail!("{} failed: {} - {}", what, status, message);
    }
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} response: {}", what, text))
}
