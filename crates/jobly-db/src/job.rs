//! Job data access.

use rust_decimal::Decimal;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;
use tracing::info;

use jobly_models::{Job, JobFilter, JobPatch, NewJob};

use crate::error::{DbError, DbResult};
use crate::pool::Pool;
use crate::sql::{partial_update, UpdateFields};

const COLUMN_ALIASES: &[(&str, &str)] = &[("companyHandle", "company_handle")];

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Store for job rows.
#[derive(Clone)]
pub struct JobStore {
    pool: Pool,
}

impl JobStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a job. The company must already exist.
    pub async fn create(&self, new: &NewJob) -> DbResult<Job> {
        let client = self.pool.get().await?;

        let company = client
            .query_opt(
                "SELECT handle FROM companies WHERE handle = $1",
                &[&new.company_handle],
            )
            .await?;
        if company.is_none() {
            return Err(DbError::not_found(format!("no company: {}", new.company_handle)));
        }

        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {JOB_COLUMNS}"
        );
        let row = client
            .query_one(
                sql.as_str(),
                &[&new.title, &new.salary, &new.equity, &new.company_handle],
            )
            .await?;

        let job = job_from_row(&row);
        info!(id = job.id, company = %job.company_handle, "created job");
        Ok(job)
    }

    /// All jobs, ordered by company.
    pub async fn list(&self) -> DbResult<Vec<Job>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY company_handle");
        let rows = client.query(sql.as_str(), &[]).await?;
        Ok(rows.iter().map(job_from_row).collect())
    }

    /// Jobs matching the search filters. Title matching is case-insensitive
    /// and substring-based; `has_equity` only narrows when true.
    pub async fn filter(&self, filter: &JobFilter) -> DbResult<Vec<Job>> {
        let pattern = match filter.title.as_deref() {
            Some(title) => format!("%{}%", title.to_lowercase()),
            None => "%".to_string(),
        };
        let min_salary = filter.min_salary.unwrap_or(0);

        let mut sql = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE LOWER(title) LIKE $1 AND salary >= $2"
        );
        let mut params: Vec<&(dyn ToSql + Sync)> = vec![&pattern, &min_salary];

        let zero = Decimal::ZERO;
        if filter.has_equity == Some(true) {
            params.push(&zero);
            sql.push_str(&format!(" AND equity != ${}", params.len()));
        }
        sql.push_str(" ORDER BY company_handle");

        let client = self.pool.get().await?;
        let rows = client.query(sql.as_str(), &params).await?;
        Ok(rows.iter().map(job_from_row).collect())
    }

    /// A single job by id.
    pub async fn get(&self, id: i32) -> DbResult<Job> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = client.query_opt(sql.as_str(), &[&id]).await?;

        row.map(|r| job_from_row(&r))
            .ok_or_else(|| DbError::not_found(format!("no job: {id}")))
    }

    /// Partially update a job; only the supplied fields change.
    ///
    /// All values travel as positional parameters, never as SQL text.
    pub async fn update(&self, id: i32, patch: &JobPatch) -> DbResult<Job> {
        let mut fields = UpdateFields::new();
        fields.set_opt("title", patch.title.clone());
        fields.set_opt("salary", patch.salary);
        fields.set_opt("equity", patch.equity);
        fields.set_opt("companyHandle", patch.company_handle.clone());

        let update = partial_update(fields, COLUMN_ALIASES)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            update.set_clause(),
            update.next_placeholder(),
        );

        let client = self.pool.get().await?;
        let mut params = update.params();
        params.push(&id);

        let row = client
            .query_opt(sql.as_str(), &params)
            .await?
            .ok_or_else(|| DbError::not_found(format!("no job: {id}")))?;

        info!(id, "updated job");
        Ok(job_from_row(&row))
    }

    /// Delete a job.
    pub async fn delete(&self, id: i32) -> DbResult<()> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("DELETE FROM jobs WHERE id = $1 RETURNING id", &[&id])
            .await?;

        if row.is_none() {
            return Err(DbError::not_found(format!("no job: {id}")));
        }
        info!(id, "deleted job");
        Ok(())
    }
}

fn job_from_row(row: &Row) -> Job {
    Job {
        id: row.get("id"),
        title: row.get("title"),
        salary: row.get("salary"),
        equity: row.get("equity"),
        company_handle: row.get("company_handle"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_routes_company_handle_through_alias() {
        let patch = JobPatch {
            title: Some("Archivist".to_string()),
            salary: None,
            equity: None,
            company_handle: Some("acme".to_string()),
        };

        let mut fields = UpdateFields::new();
        fields.set_opt("title", patch.title.clone());
        fields.set_opt("salary", patch.salary);
        fields.set_opt("equity", patch.equity);
        fields.set_opt("companyHandle", patch.company_handle.clone());

        let update = partial_update(fields, COLUMN_ALIASES).unwrap();
        assert_eq!(update.set_clause(), r#""title"=$1, "company_handle"=$2"#);
        assert_eq!(update.next_placeholder(), 3);
    }
}
