//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DatabaseHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        read_only: state.config.comments.read_only,
    }))
}

/// GET /api/health/database
pub async fn database(State(state): State<AppState>) -> Json<ApiResponse<DatabaseHealthResponse>> {
    let database = match state.db_pool.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "unavailable",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "unavailable"
        }
    };
    Json(ApiResponse::ok(DatabaseHealthResponse {
        database: database.to_string(),
    }))
}
