//! In-memory task store (non-persistent).

use super::{listing_order, next_order, StoreError, TaskStore, NO_TEXT_MESSAGE};
use crate::task::{Column, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    tasks: HashMap<TaskId, Task>,
    last_id: TaskId,
}

impl Inner {
    /// Millisecond-clock ids, bumped when the clock has not advanced.
    fn next_id(&mut self) -> TaskId {
        let now = Utc::now().timestamp_millis().max(0) as TaskId;
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }
}

#[derive(Clone)]
pub struct InMemoryTaskStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn is_persistent(&self) -> bool {
        false
    }

    async fn list(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.inner.read().await.tasks.values().cloned().collect();
        tasks.sort_by(listing_order);
        tasks
    }

    async fn get(&self, id: TaskId) -> Option<Task> {
        self.inner.read().await.tasks.get(&id).cloned()
    }

    async fn create(&self, text: &str) -> Result<Task, StoreError> {
        if text.is_empty() {
            return Err(StoreError::Validation(NO_TEXT_MESSAGE.to_string()));
        }

        let mut inner = self.inner.write().await;
        let order = next_order(inner.tasks.values(), Column::Todo);
        let task = Task::new(inner.next_id(), text, order);
        inner.tasks.insert(task.id, task.clone());

        tracing::debug!(id = task.id, order = task.order, "Created task");
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> bool {
        let removed = self.inner.write().await.tasks.remove(&id).is_some();
        if removed {
            tracing::debug!(id, "Deleted task");
        } else {
            tracing::debug!(id, "Delete ignored, no such task");
        }
        removed
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        let current = inner
            .tasks
            .get(&id)
            .map(|t| t.column)
            .ok_or(StoreError::NotFound(id))?;
        patch.validate().map_err(StoreError::Validation)?;

        // Computed before the task moves, so it never counts itself.
        let append_order = match patch.column {
            Some(target) if target != current => Some(next_order(inner.tasks.values(), target)),
            _ => None,
        };

        let is_move = patch.is_move();
        let task = inner.tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply(task, append_order);

        if is_move {
            tracing::debug!(id, column = %task.column, order = task.order, "Moved task");
        } else {
            tracing::debug!(id, "Updated task");
        }
        Ok(task.clone())
    }
}
