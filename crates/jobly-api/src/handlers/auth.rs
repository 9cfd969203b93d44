//! Token issuance handlers: login and self-registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use jobly_db::DbError;
use jobly_models::{Credentials, NewUser, User};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: String,
}

/// Exchange a username/password for a bearer token.
///
/// Unknown usernames and wrong passwords get the same answer, so the
/// endpoint can't be used to probe which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    let hash = match state.users.password_hash(&credentials.username).await {
        Ok(hash) => hash,
        Err(DbError::NotFound(_)) => {
            return Err(ApiError::unauthorized("invalid username/password"))
        }
        Err(e) => return Err(e.into()),
    };

    let matches = bcrypt::verify(&credentials.password, &hash)
        .map_err(|e| ApiError::internal(format!("password verification failed: {e}")))?;
    if !matches {
        return Err(ApiError::unauthorized("invalid username/password"));
    }

    let user = state.users.get(&credentials.username).await?;
    let token = state.signer.issue(&user.username, user.is_admin)?;

    info!(username = %user.username, "issued token");
    Ok(Json(TokenResponse { token }))
}

/// Self-service registration. Always creates a non-admin account.
pub async fn register(
    State(state): State<AppState>,
    Json(mut new): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    new.validate()?;
    new.is_admin = false;

    let hash = bcrypt::hash(&new.password, state.config.bcrypt_cost)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let user = state.users.create(&new, &hash).await?;
    let token = state.signer.issue(&user.username, user.is_admin)?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user, token })))
}
