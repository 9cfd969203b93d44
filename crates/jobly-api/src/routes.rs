//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::auth::authenticate;
use crate::handlers::applications::apply;
use crate::handlers::auth::{login, register};
use crate::handlers::companies::{
    create_company, delete_company, get_company, list_companies, update_company,
};
use crate::handlers::health::{health, ready};
use crate::handlers::jobs::{create_job, delete_job, get_job, list_jobs, update_job};
use crate::handlers::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::metrics::track_requests;
use crate::middleware::{
    cors_layer, rate_limit, request_id, request_logging, security_headers, RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let auth_routes = Router::new()
        .route("/auth/token", post(login))
        .route("/auth/register", post(register));

    let company_routes = Router::new()
        .route("/companies", post(create_company).get(list_companies))
        .route(
            "/companies/:handle",
            get(get_company).patch(update_company).delete(delete_company),
        );

    let job_routes = Router::new()
        .route("/jobs", post(create_job).get(list_jobs))
        .route("/jobs/:id", get(get_job).patch(update_job).delete(delete_job));

    let user_routes = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:username",
            get(get_user).patch(update_user).delete(delete_user),
        )
        // Applications live under the user they belong to.
        .route("/users/:username/jobs/:id", post(apply));

    let rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(company_routes)
        .merge(job_routes)
        .merge(user_routes)
        // Authentication attaches an identity (or nothing) to every request;
        // the guards on individual handlers do the rejecting.
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn_with_state(rate_limiter, rate_limit));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(track_requests))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
