//! Health and readiness handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Readiness probe; round-trips the database.
pub async fn ready(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    jobly_db::ping(&state.pool).await?;
    Ok(Json(HealthResponse { status: "ready" }))
}
