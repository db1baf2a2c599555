//! Health check endpoint

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is reachable
    pub status: &'static str,
    /// Whether the segmentation model has been published
    pub model_loaded: bool,
}

/// `GET /health` - always succeeds, reports the model load state
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.slot.is_ready(),
    })
}
