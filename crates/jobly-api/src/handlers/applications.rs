//! Job application handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct AppliedResponse {
    pub applied: i32,
}

/// Apply a user to a job. The caller must be that user or an admin.
pub async fn apply(
    State(state): State<AppState>,
    Path((username, job_id)): Path<(String, i32)>,
    user: AuthUser,
) -> ApiResult<(StatusCode, Json<AppliedResponse>)> {
    user.require_self_or_admin(&username)?;

    let application = state.applications.create(&username, job_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(AppliedResponse {
            applied: application.job_id,
        }),
    ))
}
