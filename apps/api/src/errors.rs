#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::scorecard::engine::ScoreError;
use crate::scorecard::report::ExportError;
use crate::search_client::SearchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Engine failures always surface as a structured `{code, message}` body,
/// never a raw panic or bare string across the HTTP boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Score(ScoreError::InvalidInput) => (
                StatusCode::BAD_REQUEST,
                "INVALID_TRANSCRIPT",
                ScoreError::InvalidInput.to_string(),
            ),
            AppError::Score(ScoreError::MalformedResponse { raw, source }) => {
                tracing::error!("Unparseable scoring reply: {source}; raw: {raw}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_CONTRACT_ERROR",
                    "The scoring model returned an invalid reply".to_string(),
                )
            }
            AppError::Score(ScoreError::SchemaViolation(msg)) => {
                tracing::error!("Scoring schema violation: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_CONTRACT_ERROR",
                    "The scoring model returned an invalid reply".to_string(),
                )
            }
            AppError::Score(ScoreError::Transport(err)) => {
                tracing::error!("LLM transport error: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_TRANSPORT_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Search(err) => {
                tracing::error!("Search error: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SEARCH_ERROR",
                    "A profile search error occurred".to_string(),
                )
            }
            AppError::Export(err) => {
                tracing::error!("Export error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "Failed to write scorecard exports".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
