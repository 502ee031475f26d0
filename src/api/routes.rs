//! HTTP router and server lifecycle.

use std::sync::Arc;

use axum::{
    routing::{get, get_service},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;

use super::task_store::{InMemoryTaskStore, SharedTaskStore};
use super::tasks;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The authoritative task collection
    pub tasks: SharedTaskStore,
}

impl AppState {
    pub fn new(config: Config, tasks: SharedTaskStore) -> Self {
        Self { config, tasks }
    }
}

/// Build the application router: the task API, the static UI, and the
/// `index.html` fallback for every other path.
pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = &state.config.static_dir;
    let ui = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/:id",
            get_service(ui.clone())
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .fallback_service(ui)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let tasks: SharedTaskStore = Arc::new(InMemoryTaskStore::new());
    if !tasks.is_persistent() {
        tracing::info!("Task store is in-memory; tasks are dropped on exit");
    }
    if !config.static_dir.join("index.html").is_file() {
        tracing::warn!(
            "No index.html in {}; the board UI will not be served",
            config.static_dir.display()
        );
    }

    let state = Arc::new(AppState::new(config.clone(), tasks));
    let app = router(Arc::clone(&state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Setup graceful shutdown on SIGTERM/SIGINT
    let shutdown_state = Arc::clone(&state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal(shutdown_state).await;
        })
        .await?;

    Ok(())
}

/// Wait for a shutdown signal and report what is being dropped.
async fn shutdown_signal(state: Arc<AppState>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    let remaining = state.tasks.list().await.len();
    tracing::info!("Shutdown signal received, dropping {} tasks", remaining);
}
