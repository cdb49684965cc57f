//! Health check.

use axum::{extract::State, Json};
use pulse_core::ModelInfo;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models: ModelInfo,
}

/// GET /health - Liveness plus the configured model ids.
///
/// Does not trigger model loading.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        models: state.analyzer.models(),
    })
}
