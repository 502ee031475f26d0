//! Task API endpoints.
//!
//! - `GET /tasks` - List all tasks
//! - `POST /tasks` - Create a task in `todo`
//! - `PUT /tasks/:id` - Update content fields and/or column/order
//! - `DELETE /tasks/:id` - Delete a task (always succeeds)

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use super::error::ApiError;
use super::routes::AppState;
use super::types::{CreateTaskRequest, DeleteResponse};
use crate::task::{Task, TaskId, TaskPatch};

fn task_id(path: Result<Path<TaskId>, PathRejection>) -> Result<TaskId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /tasks - All tasks sorted by column name, then order.
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.tasks.list().await)
}

/// POST /tasks - Create a task. A missing or unreadable body counts as missing text.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Create body rejected: {}", rejection.body_text());
            CreateTaskRequest::default()
        }
    };

    let task = state
        .tasks
        .create(request.text.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(task))
}

/// DELETE /tasks/:id - Remove a task; unknown ids still report success.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    path: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = task_id(path)?;
    state.tasks.delete(id).await;
    Ok(Json(DeleteResponse { success: true }))
}

/// PUT /tasks/:id - Apply a partial update.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    path: Result<Path<TaskId>, PathRejection>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    let patch = match body {
        Ok(Json(patch)) => patch,
        // No JSON body at all is an empty update, not a malformed one.
        Err(JsonRejection::MissingJsonContentType(_)) => TaskPatch::default(),
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    };

    let task = state.tasks.update(id, patch).await?;
    Ok(Json(task))
}
