//! leadscore-ai library interface
//!
//! Scores inbound sales-lead messages by blending a lexicon sentiment signal
//! with an LLM judgment, and exposes the pipeline over HTTP.

pub mod api;
pub mod cli;
pub mod error;
pub mod models;
pub mod report;
pub mod services;
pub mod startup;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::LeadScorer;

/// Application state shared across handlers
///
/// Holds only the long-lived scoring pipeline; no per-request state is shared.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<LeadScorer>,
}

impl AppState {
    pub fn new(scorer: LeadScorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::analyze_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
