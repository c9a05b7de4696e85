//! API handlers for the report server
//!
//! Provides REST endpoints for:
//! - Plagiarism detection
//! - Report preview (composed document, no rendering)
//! - Report generation and download

use std::time::Duration;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use report_core::{GeneratedReport, Omission};
use report_types::{AnnotatedDocument, DetectionResult};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ServerError;
use crate::spool::SpooledFile;
use crate::state::AppState;
use crate::validation::validate_content;

/// Download name of every generated report
pub const REPORT_FILENAME: &str = "plagiarism_report.pdf";

pub const REPORT_ID_HEADER: &str = "x-report-id";
pub const REPORT_OMISSIONS_HEADER: &str = "x-report-omissions";

/// Build the API router with CORS and request tracing applied
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/check-plagiarism", post(handle_check_plagiarism))
        .route("/api/reports/preview", post(handle_preview_report))
        .route("/api/reports", post(handle_generate_report))
        .route("/api/reports/:id", get(handle_download_report))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "report-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Detection request body
#[derive(Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub content: String,
}

/// Handler: POST /check-plagiarism
pub async fn handle_check_plagiarism(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<DetectionResult>, ServerError> {
    let Json(req) = payload.map_err(reject)?;
    validate_content(&req.content)?;

    info!("Detection request: {} characters", req.content.chars().count());
    let result = state.detector.detect(&req.content).await?;

    Ok(Json(result))
}

/// Report request body: the content that was checked and what was found
#[derive(Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub result: DetectionResult,
}

/// Preview response
#[derive(Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub document: AnnotatedDocument,
    pub omissions: Vec<Omission>,
}

/// Handler: POST /api/reports/preview
pub async fn handle_preview_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ServerError> {
    let Json(req) = payload.map_err(reject)?;
    validate_content(&req.content)?;

    let composition = state.composer.compose(&req.content, &req.result);

    Ok(Json(PreviewResponse {
        success: true,
        document: composition.document,
        omissions: composition.omissions,
    }))
}

/// Handler: POST /api/reports
pub async fn handle_generate_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(req) = payload.map_err(reject)?;
    validate_content(&req.content)?;

    info!(
        "Report request: {} characters, {} sources",
        req.content.chars().count(),
        req.result.sources.len()
    );

    let report = render(&state, req).await?;
    let omissions = report.omissions.len();

    let spooled = SpooledFile::write(&state.spool_dir, &report.artifact.bytes)
        .await
        .map_err(ServerError::Spool)?;
    let id = state.store.put_file(spooled.path(), REPORT_FILENAME).await?;
    drop(spooled);

    info!(
        "Report {} generated: {} pages, {} omitted spans",
        id, report.artifact.page_count, omissions
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, report.artifact.mime_type)
        .header(header::CONTENT_DISPOSITION, attachment(REPORT_FILENAME))
        .header(REPORT_ID_HEADER, id.to_string())
        .header(REPORT_OMISSIONS_HEADER, omissions.to_string())
        .body(Body::from(report.artifact.bytes))
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// Handler: GET /api/reports/:id
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServerError> {
    let not_found = || ServerError::NotFound(id.clone());

    let report_id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let report = state.store.get(report_id).await?.ok_or_else(not_found)?;

    debug!(
        "Serving report {} ({} bytes, created {})",
        report.id,
        report.bytes.len(),
        report.created_at
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, typst_engine::compiler::PDF_MIME_TYPE)
        .header(header::CONTENT_DISPOSITION, attachment(&report.filename))
        .header(REPORT_ID_HEADER, report.id.to_string())
        .body(Body::from(report.bytes))
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// Compose and render on a blocking thread, bounded by the render timeout
async fn render(state: &AppState, req: ReportRequest) -> Result<GeneratedReport, ServerError> {
    let composer = state.composer.clone();
    let timeout = state.render_timeout;

    let task = tokio::task::spawn_blocking(move || composer.generate(&req.content, &req.result));

    let joined = tokio::time::timeout(timeout, task)
        .await
        .map_err(|_| ServerError::Timeout(millis(timeout)))?;
    let generated = joined.map_err(|e| ServerError::Internal(format!("Render task failed: {}", e)))?;

    Ok(generated?)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn reject(rejection: JsonRejection) -> ServerError {
    debug!("Rejected request body: {}", rejection);
    ServerError::InvalidRequest
}

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename)
}
