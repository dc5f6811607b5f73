pub mod download;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::live::session::live_session_handler;
use crate::scorecard::handlers::handle_create_scorecard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scorecard API
        .route("/api/v1/scorecards", post(handle_create_scorecard))
        .route("/download/:filename", get(download::handle_download))
        // Live session (question suggestion protocol)
        .route("/ws", get(live_session_handler))
        .with_state(state)
}
