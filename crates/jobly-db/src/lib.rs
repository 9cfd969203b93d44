//! PostgreSQL data access for the Jobly backend.
//!
//! This crate provides:
//! - A deadpool-backed connection pool
//! - The partial-update SQL builder used by every PATCH endpoint
//! - One store per resource (companies, jobs, users, applications) issuing
//!   hand-written parameterized SQL
//!
//! The schema lives in `schema.sql` next to this crate.

pub mod application;
pub mod company;
pub mod error;
pub mod job;
pub mod pool;
pub mod sql;
pub mod user;

pub use application::ApplicationStore;
pub use company::CompanyStore;
pub use error::{DbError, DbResult};
pub use job::JobStore;
pub use pool::{create_pool, ping, Pool};
pub use sql::{partial_update, PartialUpdate, SqlValue, UpdateFields};
pub use user::UserStore;
