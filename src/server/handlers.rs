use crate::output::AuditStats;
use crate::server::AppState;
use crate::AuditError;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Sitemap SEO Audit API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "/api/analyze".to_string(),
            "/api/download/{filename}".to_string(),
        ],
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub sitemap_url: String,
}

/// Headline counters shown next to the issue breakdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatsSummary {
    pub processed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub healthy: usize,
}

impl From<&AuditStats> for StatsSummary {
    fn from(stats: &AuditStats) -> Self {
        Self {
            processed: stats.processed,
            errors: stats.errors,
            warnings: stats.warnings,
            healthy: stats.healthy,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub total_urls: usize,
    /// Wall time, e.g. `"3.2 seconds"`
    pub analysis_time: String,
    pub download_filename: String,
    pub categories: BTreeMap<String, usize>,
    pub issues: AuditStats,
    pub stats: StatsSummary,
}

pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected analyze request: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "Sitemap URL is required");
        }
    };

    let outcome = match state.auditor.analyze(&request.sitemap_url).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_client_error() => {
            tracing::info!("Analyze request rejected: {}", e);
            let message = match e {
                AuditError::InvalidInput(message) => message,
                AuditError::NoUrlsFound { .. } => "No URLs found in sitemap".to_string(),
                other => other.to_string(),
            };
            return error_response(StatusCode::BAD_REQUEST, message);
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Analysis failed: {}", e),
            );
        }
    };

    let filename = outcome.filename.clone();
    if let Err(e) = state.store.put(&filename, outcome.report_bytes) {
        tracing::error!("Failed to store report {}: {}", filename, e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store report");
    }

    Json(AnalyzeResponse {
        success: true,
        total_urls: outcome.total_urls,
        analysis_time: format!("{:.1} seconds", outcome.elapsed.as_secs_f64()),
        download_filename: filename,
        categories: outcome.category_counts.into_iter().collect(),
        issues: outcome.stats,
        stats: StatsSummary::from(&outcome.stats),
    })
    .into_response()
}

pub async fn download(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    let bytes = match state.store.get(&filename) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "File not found"),
        Err(e) => {
            tracing::error!("Failed to read report {}: {}", filename, e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Download failed: {}", e),
            );
        }
    };

    let headers = [
        (header::CONTENT_TYPE, state.auditor.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    (headers, bytes.to_vec()).into_response()
}
