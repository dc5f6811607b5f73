//! Axum route handlers for the Scorecard API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::scorecard::engine::{self, Scorecard};
use crate::scorecard::report::{export_scorecard, ExportedFiles};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScorecardRequest {
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct ScorecardResponse {
    pub success: bool,
    pub scorecard: Scorecard,
    pub files: ExportedFiles,
}

/// POST /api/v1/scorecards
///
/// Scores a transcript against the rubric, writes the JSON/CSV/Markdown
/// exports, and returns the normalized scorecard. Contract failures come back
/// as structured error bodies via `AppError`, never a partial scorecard.
pub async fn handle_create_scorecard(
    State(state): State<AppState>,
    Json(request): Json<ScorecardRequest>,
) -> Result<Json<ScorecardResponse>, AppError> {
    let scorecard = engine::score(&state.llm, &request.transcript).await?;
    let files = export_scorecard(&state.config.output_dir, &scorecard)?;

    info!(
        "Scorecard {} exported to {}",
        scorecard.aggregate.grade,
        files.markdown.display()
    );

    Ok(Json(ScorecardResponse {
        success: true,
        scorecard,
        files,
    }))
}
