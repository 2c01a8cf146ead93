//! HTTP surface: axum router, shared state and the listener loop

pub mod document;
pub mod handlers;
pub mod health;
pub mod sse;
pub mod ui;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use parking_lot::Mutex;
use rpm_core::config::RpmConfig;
use rpm_core::llm::GenerationClient;
use rpm_core::session::{FormSession, GenerationRunner, SharedSession, UiState};
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub runner: GenerationRunner,
    pub config: Arc<RpmConfig>,
    /// Latest published snapshot, cloned per SSE subscriber
    pub events: watch::Receiver<UiState>,
}

impl AppState {
    pub fn new(config: RpmConfig, client: GenerationClient) -> Self {
        let session = Arc::new(Mutex::new(FormSession::new(config.progress.clone())));
        let initial = session.lock().snapshot();
        let (tx, events) = watch::channel(initial);
        let runner = GenerationRunner::new(session, client, Arc::new(tx));

        Self {
            runner,
            config: Arc::new(config),
            events,
        }
    }

    pub fn session(&self) -> &SharedSession {
        self.runner.session()
    }

    pub fn snapshot(&self) -> UiState {
        self.session().lock().snapshot()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/catalog", get(handlers::catalog))
        .route("/api/generate", post(handlers::generate))
        .route("/api/state", get(handlers::current_state))
        .route("/api/reset", post(handlers::reset))
        .route("/api/events", get(sse::event_stream))
        .route("/api/document/download", get(document::download))
        .route("/api/document/clipboard", get(document::clipboard));

    let public = Router::new()
        .route("/", get(ui::serve_index))
        .route("/static/app.js", get(ui::serve_app_js))
        .route("/static/app.css", get(ui::serve_app_css))
        .merge(health::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: RpmConfig, client: GenerationClient) -> Result<()> {
    let bind = config.server.bind_address.clone();
    let app = build_router(AppState::new(config, client));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    info!("rpm-gen listening on http://{bind}");
    info!("Health check: http://{bind}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("rpm-gen stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
