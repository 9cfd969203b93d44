//! Job applications linking users to jobs.

use serde::{Deserialize, Serialize};

/// A user's application to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub username: String,
    pub job_id: i32,
}
