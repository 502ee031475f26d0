//! API request and response types.

use serde::{Deserialize, Serialize};

/// Body of `POST /tasks`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Body of every `DELETE /tasks/:id` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Body of every 4xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
