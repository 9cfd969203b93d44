//! Job API handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

use jobly_models::{Job, JobFilter, JobPatch, NewJob};

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Serialize)]
pub struct JobDeletedResponse {
    pub deleted: i32,
}

/// Create a job. Admin only.
pub async fn create_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(new): Json<NewJob>,
) -> ApiResult<(StatusCode, Json<JobResponse>)> {
    new.validate()?;
    validate_equity(new.equity)?;
    let job = state.jobs.create(&new).await?;
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// List jobs, optionally filtered by title, minimum salary, and equity.
/// Open to anonymous callers.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> ApiResult<Json<JobsResponse>> {
    let jobs = if filter.is_empty() {
        state.jobs.list().await?
    } else {
        state.jobs.filter(&filter).await?
    };
    Ok(Json(JobsResponse { jobs }))
}

/// Fetch a single job by id.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<JobResponse>> {
    let job = state.jobs.get(id).await?;
    Ok(Json(JobResponse { job }))
}

/// Partially update a job. Admin only.
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
    Json(patch): Json<JobPatch>,
) -> ApiResult<Json<JobResponse>> {
    patch.validate()?;
    validate_equity(patch.equity)?;
    let job = state.jobs.update(id, &patch).await?;
    Ok(Json(JobResponse { job }))
}

/// Equity is a share of the company and must stay within [0, 1].
fn validate_equity(equity: Option<Decimal>) -> ApiResult<()> {
    if equity.is_some_and(|e| e < Decimal::ZERO || e > Decimal::ONE) {
        return Err(ApiError::bad_request("equity must be between 0 and 1"));
    }
    Ok(())
}

/// Delete a job. Admin only.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
) -> ApiResult<Json<JobDeletedResponse>> {
    state.jobs.delete(id).await?;
    Ok(Json(JobDeletedResponse { deleted: id }))
}
