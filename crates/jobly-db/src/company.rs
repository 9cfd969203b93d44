//! Company data access.

use std::collections::HashMap;

use tokio_postgres::types::ToSql;
use tokio_postgres::Row;
use tracing::info;

use jobly_models::{Company, CompanyFilter, CompanyPatch, CompanyWithJobs, JobSummary, NewCompany};

use crate::error::{DbError, DbResult};
use crate::pool::Pool;
use crate::sql::{partial_update, UpdateFields};

/// Logical API field -> physical column, for fields whose names differ.
const COLUMN_ALIASES: &[(&str, &str)] = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Store for company rows.
#[derive(Clone)]
pub struct CompanyStore {
    pool: Pool,
}

impl CompanyStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a company. Fails with `Duplicate` if the handle is taken.
    pub async fn create(&self, new: &NewCompany) -> DbResult<Company> {
        let client = self.pool.get().await?;

        let duplicate = client
            .query_opt("SELECT handle FROM companies WHERE handle = $1", &[&new.handle])
            .await?;
        if duplicate.is_some() {
            return Err(DbError::duplicate(format!("duplicate company: {}", new.handle)));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COMPANY_COLUMNS}"
        );
        let row = client
            .query_one(
                sql.as_str(),
                &[
                    &new.handle,
                    &new.name,
                    &new.description,
                    &new.num_employees,
                    &new.logo_url,
                ],
            )
            .await?;

        info!(handle = %new.handle, "created company");
        Ok(company_from_row(&row))
    }

    /// All companies, each with its job listings.
    pub async fn list(&self) -> DbResult<Vec<CompanyWithJobs>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY handle");
        let rows = client.query(sql.as_str(), &[]).await?;
        let companies = rows.iter().map(company_from_row).collect();
        attach_jobs(&client, companies).await
    }

    /// Companies matching the search filters, each with its job listings.
    ///
    /// A name is required; an employee range with min above max is rejected.
    pub async fn filter(&self, filter: &CompanyFilter) -> DbResult<Vec<CompanyWithJobs>> {
        let name = filter
            .name
            .as_deref()
            .ok_or_else(|| DbError::invalid_input("must have a company name"))?;

        if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
            if min > max {
                return Err(DbError::invalid_input(
                    "minEmployees cannot be greater than maxEmployees",
                ));
            }
        }

        let pattern = format!("%{}%", name.to_lowercase());
        let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE LOWER(name) LIKE $1");
        let mut params: Vec<&(dyn ToSql + Sync)> = vec![&pattern];

        if let Some(min) = filter.min_employees.as_ref() {
            params.push(min);
            sql.push_str(&format!(" AND num_employees >= ${}", params.len()));
        }
        if let Some(max) = filter.max_employees.as_ref() {
            params.push(max);
            sql.push_str(&format!(" AND num_employees <= ${}", params.len()));
        }
        sql.push_str(" ORDER BY handle");

        let client = self.pool.get().await?;
        let rows = client.query(sql.as_str(), &params).await?;
        let companies = rows.iter().map(company_from_row).collect();
        attach_jobs(&client, companies).await
    }

    /// A single company by handle, without its jobs.
    pub async fn get(&self, handle: &str) -> DbResult<Company> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
        let row = client.query_opt(sql.as_str(), &[&handle]).await?;

        row.map(|r| company_from_row(&r))
            .ok_or_else(|| DbError::not_found(format!("no company: {handle}")))
    }

    /// Partially update a company; only the supplied fields change.
    pub async fn update(&self, handle: &str, patch: &CompanyPatch) -> DbResult<Company> {
        let mut fields = UpdateFields::new();
        fields.set_opt("name", patch.name.clone());
        fields.set_opt("description", patch.description.clone());
        fields.set_opt("numEmployees", patch.num_employees);
        fields.set_opt("logoUrl", patch.logo_url.clone());

        let update = partial_update(fields, COLUMN_ALIASES)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLUMNS}",
            update.set_clause(),
            update.next_placeholder(),
        );

        let client = self.pool.get().await?;
        let mut params = update.params();
        params.push(&handle);

        let row = client
            .query_opt(sql.as_str(), &params)
            .await?
            .ok_or_else(|| DbError::not_found(format!("no company: {handle}")))?;

        info!(handle, "updated company");
        Ok(company_from_row(&row))
    }

    /// Delete a company (its jobs cascade).
    pub async fn delete(&self, handle: &str) -> DbResult<()> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "DELETE FROM companies WHERE handle = $1 RETURNING handle",
                &[&handle],
            )
            .await?;

        if row.is_none() {
            return Err(DbError::not_found(format!("no company: {handle}")));
        }
        info!(handle, "deleted company");
        Ok(())
    }
}

/// Fetch the job listings for a set of companies in one query and zip them
/// onto their owners.
async fn attach_jobs(
    client: &deadpool_postgres::Object,
    companies: Vec<Company>,
) -> DbResult<Vec<CompanyWithJobs>> {
    let handles: Vec<String> = companies.iter().map(|c| c.handle.clone()).collect();
    let rows = client
        .query(
            "SELECT id, title, salary, equity, company_handle
             FROM jobs WHERE company_handle = ANY($1) ORDER BY id",
            &[&handles],
        )
        .await?;

    let mut by_handle: HashMap<String, Vec<JobSummary>> = HashMap::new();
    for row in &rows {
        by_handle
            .entry(row.get("company_handle"))
            .or_default()
            .push(JobSummary {
                id: row.get("id"),
                title: row.get("title"),
                salary: row.get("salary"),
                equity: row.get("equity"),
            });
    }

    Ok(companies
        .into_iter()
        .map(|company| {
            let jobs = by_handle.remove(&company.handle).unwrap_or_default();
            CompanyWithJobs { company, jobs }
        })
        .collect())
}

fn company_from_row(row: &Row) -> Company {
    Company {
        handle: row.get("handle"),
        name: row.get("name"),
        description: row.get("description"),
        num_employees: row.get("num_employees"),
        logo_url: row.get("logo_url"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_fields_resolve_aliases_in_declared_order() {
        let patch = CompanyPatch {
            name: Some("Acme".to_string()),
            description: None,
            num_employees: Some(10),
            logo_url: Some("https://acme.example/logo.png".to_string()),
        };

        let mut fields = UpdateFields::new();
        fields.set_opt("name", patch.name.clone());
        fields.set_opt("description", patch.description.clone());
        fields.set_opt("numEmployees", patch.num_employees);
        fields.set_opt("logoUrl", patch.logo_url.clone());

        let update = partial_update(fields, COLUMN_ALIASES).unwrap();
        assert_eq!(
            update.set_clause(),
            r#""name"=$1, "num_employees"=$2, "logo_url"=$3"#
        );
    }
}
