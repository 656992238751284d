use axum::{routing::get, Json, Router};
use chrono::Utc;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Liveness only; providers are not probed.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running!".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
