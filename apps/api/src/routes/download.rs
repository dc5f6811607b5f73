//! Download endpoint for previously exported scorecard files.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Filenames are opaque tokens handed out by the scorecard endpoint;
/// anything path-like is rejected.
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}

fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("md") => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// GET /download/:filename
/// Serves a file from the export directory.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_safe_filename(&filename) {
        warn!("Invalid filename requested: {filename}");
        return Err(AppError::Validation("Invalid filename".to_string()));
    }

    let path = state.config.output_dir.join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("File {filename} not found")))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&filename).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
