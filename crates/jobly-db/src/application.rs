//! Application data access.

use tracing::info;

use jobly_models::Application;

use crate::error::{DbError, DbResult};
use crate::pool::Pool;

/// Store for job applications.
#[derive(Clone)]
pub struct ApplicationStore {
    pool: Pool,
}

impl ApplicationStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Record that a user applied to a job.
    ///
    /// Both sides of the link are checked up front so missing rows surface
    /// as 404s instead of foreign-key failures; applying twice is rejected.
    pub async fn create(&self, username: &str, job_id: i32) -> DbResult<Application> {
        let client = self.pool.get().await?;

        let user = client
            .query_opt("SELECT username FROM users WHERE username = $1", &[&username])
            .await?;
        if user.is_none() {
            return Err(DbError::not_found(format!("no user: {username}")));
        }

        let job = client
            .query_opt("SELECT id FROM jobs WHERE id = $1", &[&job_id])
            .await?;
        if job.is_none() {
            return Err(DbError::not_found(format!("no job: {job_id}")));
        }

        let duplicate = client
            .query_opt(
                "SELECT username, job_id FROM applications WHERE username = $1 AND job_id = $2",
                &[&username, &job_id],
            )
            .await?;
        if duplicate.is_some() {
            return Err(DbError::duplicate("duplicate application"));
        }

        let row = client
            .query_one(
                "INSERT INTO applications (username, job_id)
                 VALUES ($1, $2)
                 RETURNING username, job_id",
                &[&username, &job_id],
            )
            .await?;

        info!(username, job_id, "created application");
        Ok(Application {
            username: row.get("username"),
            job_id: row.get("job_id"),
        })
    }
}
