use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object for container orchestration.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "interview-api",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
