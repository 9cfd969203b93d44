//! Bearer-token authentication and authorization guards.
//!
//! Authentication and authorization are two separate stages. The
//! [`authenticate`] middleware runs on every request and only ever *attaches*
//! an identity: a missing, malformed, or unverifiable token is not an error
//! there. Rejection is the guards' job: [`AuthUser`], [`AdminUser`], and
//! [`AuthUser::require_self_or_admin`] deny with 401 when the attached
//! identity (or its absence) doesn't satisfy them.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Verified claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a shared HS256 secret.
///
/// Constructed once from config and injected via [`AppState`].
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, username: &str, is_admin: bool) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            is_admin,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
    }
}

/// Authentication middleware, applied to every API route.
///
/// Attaches verified [`Claims`] to the request when a valid bearer token is
/// present. Verification failures are swallowed: the request simply continues
/// without an identity and the guards decide what that means.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let claims =
        bearer_token(request.headers()).and_then(|token| state.signer.verify(token).ok());
    if let Some(claims) = claims {
        request.extensions_mut().insert(claims);
    }
    next.run(request).await
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
/// Scheme matching is case-insensitive; surrounding whitespace is trimmed.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Guard predicate: someone is logged in.
pub fn is_logged_in(claims: Option<&Claims>) -> bool {
    claims.is_some()
}

/// Guard predicate: the identity is the named user, or an admin.
/// No identity means denial, never a fault.
pub fn is_self_or_admin(claims: Option<&Claims>, route_username: &str) -> bool {
    claims.is_some_and(|c| c.is_admin || c.username == route_username)
}

/// Guard predicate: the identity is an admin.
pub fn is_admin(claims: Option<&Claims>) -> bool {
    claims.is_some_and(|c| c.is_admin)
}

/// Extractor for routes that require a logged-in user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }
}

impl AuthUser {
    /// Deny unless this identity is the named user or an admin.
    pub fn require_self_or_admin(&self, route_username: &str) -> Result<(), ApiError> {
        if is_self_or_admin(Some(&self.0), route_username) {
            Ok(())
        } else {
            Err(ApiError::unauthorized("must be the named user or an admin"))
        }
    }
}

/// Extractor for routes that require an admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Claims>() {
            Some(claims) if is_admin(Some(claims)) => Ok(AdminUser(claims.clone())),
            _ => Err(ApiError::unauthorized("must be an admin")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", Duration::hours(1))
    }

    fn claims(username: &str, is_admin: bool) -> Claims {
        Claims {
            username: username.to_string(),
            is_admin,
            iat: 0,
            exp: 0,
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn token_round_trips() {
        let signer = signer();
        let token = signer.issue("u1", true).unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.username, "u1");
        assert!(claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = signer().issue("u1", false).unwrap();
        let other = TokenSigner::new("different-secret", Duration::hours(1));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        // Negative TTL puts exp well behind the default validation leeway.
        let stale = TokenSigner::new("test-secret", Duration::hours(-2));
        let token = stale.issue("u1", false).unwrap();
        assert!(signer().verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(signer().verify("not-a-token").is_err());
    }

    #[test]
    fn bearer_scheme_is_case_insensitive_and_trimmed() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("BEARER   abc  ")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("  Bearer abc")), Some("abc"));
    }

    #[test]
    fn bearer_rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&headers_with("Basic abc")), None);
        assert_eq!(bearer_token(&headers_with("Bearerabc")), None);
        assert_eq!(bearer_token(&headers_with("Bearer  ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn logged_in_requires_any_identity() {
        assert!(!is_logged_in(None));
        assert!(is_logged_in(Some(&claims("u1", false))));
    }

    #[test]
    fn self_or_admin_matrix() {
        let user = claims("u1", false);
        let admin = claims("root", true);

        assert!(is_self_or_admin(Some(&user), "u1"));
        assert!(is_self_or_admin(Some(&admin), "u1"));
        assert!(!is_self_or_admin(Some(&user), "u2"));
        assert!(!is_self_or_admin(None, "u1"));
    }

    #[test]
    fn admin_matrix() {
        assert!(is_admin(Some(&claims("root", true))));
        assert!(!is_admin(Some(&claims("u1", false))));
        assert!(!is_admin(None));
    }
}
