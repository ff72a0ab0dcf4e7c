//! Lead analysis endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::models::CompositeResult;
use crate::{ApiError, ApiResult, AppState};

/// POST /api/analyze-lead request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeLeadRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /api/analyze-lead
///
/// Returns the composite result for one lead message.
///
/// **Errors:**
/// - 400: body absent or not JSON, `message` missing or blank
/// - 500: the scoring task aborted unexpectedly
pub async fn analyze_lead(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeLeadRequest>, JsonRejection>,
) -> ApiResult<Json<CompositeResult>> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::BadRequest("Content-Type must be application/json".to_string())
        }
        other => ApiError::BadRequest(format!("Invalid JSON body: {}", other.body_text())),
    })?;

    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message field is required".to_string()))?;

    info!(message_len = message.len(), "Analyzing lead");

    // A panic inside the pipeline surfaces as a 500 instead of a dropped connection
    let scorer = Arc::clone(&state.scorer);
    let result = tokio::spawn(async move { scorer.score(&message).await })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(result))
}

/// Build lead analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze-lead", post(analyze_lead))
}
