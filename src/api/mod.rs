//! HTTP API for the task board.
//!
//! ## Endpoints
//!
//! - `GET /tasks` - List all tasks, sorted by column then order
//! - `POST /tasks` - Create a task in `todo`
//! - `PUT /tasks/{id}` - Update any subset of a task's fields
//! - `DELETE /tasks/{id}` - Delete a task
//! - anything else - static UI, falling back to `index.html`

mod error;
mod routes;
pub mod task_store;
mod tasks;
pub mod types;

pub use error::ApiError;
pub use routes::{router, serve, AppState};
pub use types::*;
