//! JSON API handlers.

use axum::{extract::State, http::StatusCode, Json};
use pulse_core::{AnalysisRequest, AnalysisResponse, PulseError, SampleSource};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub text: String,
}

/// Error body returned by every failing API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SampleEntry {
    pub slug: String,
    pub name: String,
    pub text: Option<String>,
}

/// HTTP status for an analysis failure.
pub fn status_for(err: &PulseError) -> StatusCode {
    match err {
        PulseError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PulseError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PulseError::Inference(_) => StatusCode::BAD_GATEWAY,
        PulseError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: PulseError) -> (StatusCode, Json<ErrorBody>) {
    (
        status_for(&err),
        Json(ErrorBody {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }),
    )
}

/// POST /api/analyze - Analyze one text.
pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResponse>, (StatusCode, Json<ErrorBody>)> {
    let request = AnalysisRequest::new(body.text);
    let response = state.analyzer.analyze(&request).await.map_err(error_response)?;
    Ok(Json(response))
}

/// GET /api/samples - Preset sample texts.
pub async fn list_samples() -> Json<Vec<SampleEntry>> {
    let samples = SampleSource::ALL
        .iter()
        .map(|s| SampleEntry {
            slug: s.slug().to_string(),
            name: s.display_name().to_string(),
            text: s.text().map(str::to_string),
        })
        .collect();
    Json(samples)
}
