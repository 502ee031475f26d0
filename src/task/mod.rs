//! Task module - defines board tasks, their columns, and partial updates.
//!
//! This module holds only pure data and pure transformations:
//! - `Task` and `Column` are the wire-compatible board records
//! - `TaskPatch` describes a partial update and knows how to apply itself
//! - Order assignment policy (max + 1) lives with the store, not here

mod patch;
pub mod task;

pub use patch::{TaskPatch, MAX_ORDER};
pub use task::{normalize_labels, Column, Task, TaskId};
