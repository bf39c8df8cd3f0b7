//! HTTP surface — the generate endpoint and a health check.
//!
//! Thin layer over the pipeline: deserialize, delegate, map the error
//! taxonomy to statuses. Provider error detail goes to the log, never into
//! a response body.

use crate::error::GenerateError;
use crate::pipeline::{GenerationRequest, ReplyGenerationService};
use axum::{
    extract::State,
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReplyGenerationService>,
}

/// Build the API router.
pub fn create_router(service: Arc<ReplyGenerationService>) -> Router {
    Router::new()
        .route("/api/generateReplies", post(generate_replies))
        .route("/api/health", get(health_check))
        .with_state(AppState { service })
}

/// Success envelope for the generate endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRepliesResponse {
    success: bool,
    suggestions: Vec<String>,
    platform: String,
    tone: String,
    processing_time: u64,
    timestamp: String,
}

async fn generate_replies(
    State(state): State<AppState>,
    Json(body): Json<GenerationRequest>,
) -> Response {
    match state.service.generate(&body).await {
        Ok(result) => {
            let elapsed_ms = result.processing_time_ms;
            let envelope = GenerateRepliesResponse {
                success: true,
                suggestions: result.suggestions,
                // Already validated by generate().
                platform: body.platform,
                tone: body.tone,
                processing_time: elapsed_ms,
                timestamp: result.timestamp,
            };
            let mut response = (StatusCode::OK, Json(envelope)).into_response();
            if let Ok(value) = HeaderValue::from_str(&format!("{elapsed_ms}ms")) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static("x-processing-time"), value);
            }
            response
        }
        Err(err) => error_response(err),
    }
}

/// Map the error taxonomy to HTTP statuses: validation 400, cancellation
/// 499, upstream 500 with a generic body.
fn error_response(err: GenerateError) -> Response {
    match err {
        GenerateError::MissingInput { .. } | GenerateError::InvalidParameter { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        GenerateError::Cancelled => (
            StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({ "error": "Request cancelled" })),
        )
            .into_response(),
        GenerateError::Upstream(upstream) => {
            log::error!("[SERVER] Reply generation failed: {}", upstream);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Failed to generate replies",
                })),
            )
                .into_response()
        }
    }
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "reply-copilot-backend",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
