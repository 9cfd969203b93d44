//! User API handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use jobly_models::{NewUser, User, UserDetail, UserPatch};

use crate::auth::{AdminUser, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Serialize)]
pub struct UserDetailResponse {
    pub user: UserDetail,
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Serialize)]
pub struct UserCreatedResponse {
    pub user: User,
    pub token: String,
}

#[derive(Serialize)]
pub struct UserDeletedResponse {
    pub deleted: String,
}

/// List all users. Admin only.
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<UsersResponse>> {
    let users = state.users.list().await?;
    Ok(Json(UsersResponse { users }))
}

/// Create a user, possibly an admin. Admin only; unlike registration the
/// `isAdmin` flag in the payload is honored.
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(new): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<UserCreatedResponse>)> {
    new.validate()?;

    let hash = bcrypt::hash(&new.password, state.config.bcrypt_cost)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let user = state.users.create(&new, &hash).await?;
    let token = state.signer.issue(&user.username, user.is_admin)?;

    Ok((StatusCode::CREATED, Json(UserCreatedResponse { user, token })))
}

/// Fetch a user and their job applications. Self or admin.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<UserDetailResponse>> {
    user.require_self_or_admin(&username)?;

    let detail = state.users.detail(&username).await?;
    Ok(Json(UserDetailResponse { user: detail }))
}

/// Partially update a user. Self or admin. A new password is re-hashed
/// before it goes anywhere near the database.
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: AuthUser,
    Json(patch): Json<UserPatch>,
) -> ApiResult<Json<UserResponse>> {
    user.require_self_or_admin(&username)?;
    patch.validate()?;

    let password_hash = match patch.password.as_deref() {
        Some(password) => Some(
            bcrypt::hash(password, state.config.bcrypt_cost)
                .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?,
        ),
        None => None,
    };

    let updated = state.users.update(&username, &patch, password_hash).await?;
    Ok(Json(UserResponse { user: updated }))
}

/// Delete a user. Self or admin.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<UserDeletedResponse>> {
    user.require_self_or_admin(&username)?;

    state.users.delete(&username).await?;
    Ok(Json(UserDeletedResponse { deleted: username }))
}
