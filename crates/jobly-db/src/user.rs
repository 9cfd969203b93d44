//! User data access.
//!
//! Password hashes are write-only from the API's perspective: they go in at
//! create/update time and only come back out through [`UserStore::password_hash`]
//! for credential checks.

use tokio_postgres::Row;
use tracing::info;

use jobly_models::{NewUser, User, UserDetail, UserPatch};

use crate::error::{DbError, DbResult};
use crate::pool::Pool;
use crate::sql::{partial_update, UpdateFields};

const COLUMN_ALIASES: &[(&str, &str)] =
    &[("firstName", "first_name"), ("lastName", "last_name")];

const USER_COLUMNS: &str = "username, first_name, last_name, email, is_admin";

/// Store for user rows.
#[derive(Clone)]
pub struct UserStore {
    pool: Pool,
}

impl UserStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a user from an already-hashed password.
    pub async fn create(&self, new: &NewUser, password_hash: &str) -> DbResult<User> {
        let client = self.pool.get().await?;

        let duplicate = client
            .query_opt("SELECT username FROM users WHERE username = $1", &[&new.username])
            .await?;
        if duplicate.is_some() {
            return Err(DbError::duplicate(format!("duplicate username: {}", new.username)));
        }

        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        );
        let row = client
            .query_one(
                sql.as_str(),
                &[
                    &new.username,
                    &password_hash,
                    &new.first_name,
                    &new.last_name,
                    &new.email,
                    &new.is_admin,
                ],
            )
            .await?;

        info!(username = %new.username, "created user");
        Ok(user_from_row(&row))
    }

    /// All users.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");
        let rows = client.query(sql.as_str(), &[]).await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    /// A single user by username.
    pub async fn get(&self, username: &str) -> DbResult<User> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let row = client.query_opt(sql.as_str(), &[&username]).await?;

        row.map(|r| user_from_row(&r))
            .ok_or_else(|| DbError::not_found(format!("no user: {username}")))
    }

    /// A user plus the ids of the jobs they applied to.
    pub async fn detail(&self, username: &str) -> DbResult<UserDetail> {
        let user = self.get(username).await?;
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id",
                &[&username],
            )
            .await?;
        let applications = rows.iter().map(|r| r.get("job_id")).collect();
        Ok(UserDetail { user, applications })
    }

    /// The stored bcrypt hash for a username, for credential verification.
    pub async fn password_hash(&self, username: &str) -> DbResult<String> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT password FROM users WHERE username = $1", &[&username])
            .await?;

        row.map(|r| r.get("password"))
            .ok_or_else(|| DbError::not_found(format!("no user: {username}")))
    }

    /// Partially update a user. A new password must arrive pre-hashed.
    pub async fn update(
        &self,
        username: &str,
        patch: &UserPatch,
        password_hash: Option<String>,
    ) -> DbResult<User> {
        let mut fields = UpdateFields::new();
        fields.set_opt("password", password_hash);
        fields.set_opt("firstName", patch.first_name.clone());
        fields.set_opt("lastName", patch.last_name.clone());
        fields.set_opt("email", patch.email.clone());

        let update = partial_update(fields, COLUMN_ALIASES)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = ${} RETURNING {USER_COLUMNS}",
            update.set_clause(),
            update.next_placeholder(),
        );

        let client = self.pool.get().await?;
        let mut params = update.params();
        params.push(&username);

        let row = client
            .query_opt(sql.as_str(), &params)
            .await?
            .ok_or_else(|| DbError::not_found(format!("no user: {username}")))?;

        info!(username, "updated user");
        Ok(user_from_row(&row))
    }

    /// Delete a user (their applications cascade).
    pub async fn delete(&self, username: &str) -> DbResult<()> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "DELETE FROM users WHERE username = $1 RETURNING username",
                &[&username],
            )
            .await?;

        if row.is_none() {
            return Err(DbError::not_found(format!("no user: {username}")));
        }
        info!(username, "deleted user");
        Ok(())
    }
}

fn user_from_row(row: &Row) -> User {
    User {
        username: row.get("username"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        is_admin: row.get("is_admin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_sorts_first_in_update_fields() {
        let patch = UserPatch {
            password: Some("ignored-raw".to_string()),
            first_name: Some("Aliya".to_string()),
            last_name: None,
            email: None,
        };

        let mut fields = UpdateFields::new();
        fields.set_opt("password", Some("$2b$12$hash".to_string()));
        fields.set_opt("firstName", patch.first_name.clone());
        fields.set_opt("lastName", patch.last_name.clone());
        fields.set_opt("email", patch.email.clone());

        let update = partial_update(fields, COLUMN_ALIASES).unwrap();
        assert_eq!(update.set_clause(), r#""password"=$1, "first_name"=$2"#);
    }
}
