//! Thin HTTP transport over the extraction pipeline.
//!
//! One real endpoint — `POST /pdf/toText` — plus health probes. The handler
//! maps the JSON body onto [`extract_text`](crate::extract_text) and the
//! error taxonomy onto status codes: pipeline failures (bad base64, broken
//! document, rejected passwords) are the caller's problem and answer 400
//! with a descriptive body; anything internal answers 500. CORS is wide
//! open — the service sits behind whatever gateway does auth.

use crate::config::ExtractOptions;
use crate::error::ExtractError;
use crate::extract;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// ── Request / Response types ─────────────────────────────────────────────

/// Body of `POST /pdf/toText`.
#[derive(Debug, Deserialize)]
pub struct PdfToTextRequest {
    /// Base64-encoded PDF file content.
    pub pdf: String,
    /// Candidate passwords for encrypted documents, tried in order.
    #[serde(default)]
    pub passwords: Vec<String>,
    /// Skip native extraction and OCR every page.
    #[serde(default, rename = "forceOcr", alias = "forceOCR")]
    pub force_ocr: bool,
}

/// Successful response body.
#[derive(Debug, Serialize)]
pub struct PdfToTextResponse {
    /// Extracted text, pages joined with newlines.
    pub text: String,
}

// ── Error mapping ────────────────────────────────────────────────────────

struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        let status = match e {
            ExtractError::Internal(_) | ExtractError::Save { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        AppError(status, e.to_string())
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "pdf2text",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn pdf_to_text(
    Json(req): Json<PdfToTextRequest>,
) -> Result<Json<PdfToTextResponse>, AppError> {
    let options = ExtractOptions::builder().force_ocr(req.force_ocr).build();
    let text = extract::extract_text(req.pdf, &req.passwords, &options).await?;
    Ok(Json(PdfToTextResponse { text }))
}

// ── Wiring ───────────────────────────────────────────────────────────────

/// Build the service router. Exposed separately from [`serve`] so tests and
/// embedders can mount it themselves.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/pdf/toText", post(pdf_to_text))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str) -> Result<(), ExtractError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ExtractError::Internal(format!("failed to bind {addr}: {e}")))?;

    info!("pdf2text service listening on {addr}");

    axum::serve(listener, router())
        .await
        .map_err(|e| ExtractError::Internal(format!("server error: {e}")))
}
