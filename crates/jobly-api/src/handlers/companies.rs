//! Company API handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use jobly_models::{Company, CompanyFilter, CompanyPatch, CompanyWithJobs, NewCompany};

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

#[derive(Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<CompanyWithJobs>,
}

#[derive(Serialize)]
pub struct CompanyDeletedResponse {
    pub deleted: String,
}

/// Create a company. Admin only.
pub async fn create_company(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(new): Json<NewCompany>,
) -> ApiResult<(StatusCode, Json<CompanyResponse>)> {
    new.validate()?;
    let company = state.companies.create(&new).await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// List companies, optionally filtered by name and employee-count range.
/// Open to anonymous callers.
pub async fn list_companies(
    State(state): State<AppState>,
    Query(filter): Query<CompanyFilter>,
) -> ApiResult<Json<CompaniesResponse>> {
    let companies = if filter.is_empty() {
        state.companies.list().await?
    } else {
        state.companies.filter(&filter).await?
    };
    Ok(Json(CompaniesResponse { companies }))
}

/// Fetch a single company by handle.
pub async fn get_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> ApiResult<Json<CompanyResponse>> {
    let company = state.companies.get(&handle).await?;
    Ok(Json(CompanyResponse { company }))
}

/// Partially update a company. Admin only.
pub async fn update_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    _admin: AdminUser,
    Json(patch): Json<CompanyPatch>,
) -> ApiResult<Json<CompanyResponse>> {
    patch.validate()?;
    let company = state.companies.update(&handle, &patch).await?;
    Ok(Json(CompanyResponse { company }))
}

/// Delete a company. Admin only.
pub async fn delete_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    _admin: AdminUser,
) -> ApiResult<Json<CompanyDeletedResponse>> {
    state.companies.delete(&handle).await?;
    Ok(Json(CompanyDeletedResponse { deleted: handle }))
}
