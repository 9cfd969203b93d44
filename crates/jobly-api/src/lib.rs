//! Axum HTTP API server for the Jobly job board.
//!
//! This crate provides:
//! - JWT bearer authentication and role/identity guards
//! - CRUD handlers for companies, jobs, users, and applications
//! - Rate limiting and security headers
//! - Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
