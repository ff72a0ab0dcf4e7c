//! Health check endpoint
//!
//! Reports liveness of this process only. Downstream provider availability
//! does not affect the response.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "lead-score-ai-agent";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}
