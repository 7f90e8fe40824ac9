//! HTTP API
//!
//! Exposes the auditor over JSON:
//! - `GET /` service information
//! - `POST /api/analyze` runs an audit and keeps the report for download
//! - `GET /api/download/{filename}` returns a stored report

pub mod handlers;

use crate::audit::Auditor;
use crate::storage::{MemoryReportStore, ReportStore};
use axum::{
    extract::{MatchedPath, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::ErrorResponse;

/// Longest pause between two eviction sweeps
const MAX_EVICTION_INTERVAL: Duration = Duration::from_secs(60);

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub auditor: Arc<Auditor>,
    pub store: Arc<dyn ReportStore>,
}

impl AppState {
    pub fn new(auditor: Arc<Auditor>, store: Arc<dyn ReportStore>) -> Self {
        Self { auditor, store }
    }
}

/// Builds the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/download/{filename}", get(handlers::download))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            }),
        )
        .layer(CorsLayer::permissive())
}

/// Periodically drops expired reports from `store`
pub fn spawn_eviction_task(store: Arc<dyn ReportStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match store.evict_expired() {
                Ok(0) => {}
                Ok(n) => tracing::info!("Evicted {} expired reports", n),
                Err(e) => tracing::warn!("Report eviction failed: {}", e),
            }
        }
    })
}

/// Serves the API on the configured bind address until Ctrl-C
pub async fn serve(auditor: Auditor) -> crate::Result<()> {
    let server_config = auditor.config().server.clone();
    let retention = Duration::from_secs(server_config.report_retention_secs);

    let store: Arc<dyn ReportStore> = Arc::new(MemoryReportStore::new(retention));
    let evictor = spawn_eviction_task(Arc::clone(&store), retention.min(MAX_EVICTION_INTERVAL));
    let app = router(AppState::new(Arc::new(auditor), store));

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!(
        "Reports are kept for {} seconds",
        server_config.report_retention_secs
    );

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    evictor.abort();
    tracing::info!("Server stopped");
    result.map_err(Into::into)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
