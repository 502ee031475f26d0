//! # taskboard
//!
//! A minimal kanban board: three columns (todo/doing/done) of draggable task
//! cards backed by an in-memory REST API.
//!
//! ## Architecture
//!
//! ```text
//!   browser UI (public/)        Board (client)
//!            │                        │
//!            └──────── HTTP/JSON ─────┘
//!                        │
//!                        ▼
//!               ┌─────────────────┐
//!               │   api::router   │
//!               └────────┬────────┘
//!                        ▼
//!               ┌─────────────────┐
//!               │    TaskStore    │  sole authority for (column, order)
//!               └─────────────────┘
//! ```
//!
//! ## Modules
//! - `task`: Task, Column and partial updates
//! - `api`: HTTP endpoints, the task store trait and its in-memory backend
//! - `client`: HTTP client and client-side board state
//! - `config`: environment configuration

pub mod api;
pub mod client;
pub mod config;
pub mod task;

pub use config::Config;
