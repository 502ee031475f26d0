//! Task storage behind a swappable trait.
//!
//! Supports:
//! - `memory`: In-memory storage (non-persistent, lives as long as the process)
//!
//! Order policy shared by every backend: appending to a column takes
//! `max(order in column) + 1`. Gaps left by deletes or moves are never
//! compacted and siblings are never renumbered.

mod memory;

pub use memory::InMemoryTaskStore;

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::task::{Column, Task, TaskId, TaskPatch};

/// Message returned when a task is created without text.
pub const NO_TEXT_MESSAGE: &str = "No text provided";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Task {0} not found")]
    NotFound(TaskId),
}

/// Task store trait - implemented by all storage backends.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Whether this store persists data across restarts.
    fn is_persistent(&self) -> bool;

    /// All tasks, sorted by column name then order.
    async fn list(&self) -> Vec<Task>;

    /// Get a single task by ID.
    async fn get(&self, id: TaskId) -> Option<Task>;

    /// Create a task at the end of `todo`.
    async fn create(&self, text: &str) -> Result<Task, StoreError>;

    /// Remove a task. Returns whether anything was removed; absence is not an error.
    async fn delete(&self, id: TaskId) -> bool;

    /// Apply a partial update and return the updated task.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError>;
}

pub type SharedTaskStore = Arc<dyn TaskStore>;

/// Next append position in `column`: one past the highest order present.
pub fn next_order<'a>(tasks: impl IntoIterator<Item = &'a Task>, column: Column) -> u64 {
    tasks
        .into_iter()
        .filter(|t| t.column == column)
        .map(|t| t.order)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Listing order: column name ascending, then order, then id.
pub fn listing_order(a: &Task, b: &Task) -> Ordering {
    a.column
        .as_str()
        .cmp(b.column.as_str())
        .then(a.order.cmp(&b.order))
        .then(a.id.cmp(&b.id))
}
