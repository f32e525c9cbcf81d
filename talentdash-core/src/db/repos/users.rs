//! Users repository
//!
//! Raw storage for credentials. Authorization and hashing live in
//! `auth::AuthService`; nothing here sees a plaintext password.

use sqlx::Row;

use crate::auth::PasswordHash;
use crate::db::Database;
use crate::error::{DashError, Result};
use crate::models::{Role, User, Username};

/// Stored credentials for one user
#[derive(Debug, Clone)]
pub struct Credentials {
    pub hash: PasswordHash,
    /// `None` when the stored role is outside {admin, recruiter}
    pub role: Option<Role>,
}

pub struct UserRepo<'a> {
    db: &'a Database,
}

impl<'a> UserRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a user, relying on the unique constraint on `Username`.
    pub async fn insert(&self, username: &Username, hash: &PasswordHash, role: Role) -> Result<()> {
        let mut conn = self.db.acquire().await?;
        let outcome = self
            .db
            .timed(
                sqlx::query("INSERT INTO Users (Username, Password, Role) VALUES (?, ?, ?)")
                    .bind(username.as_str())
                    .bind(hash.as_str())
                    .bind(role.as_str())
                    .execute(&mut *conn),
            )
            .await;
        conn.release().await;

        outcome.map_err(|e| duplicate_or(e, username))?;
        Ok(())
    }

    /// Insert an admin only while the table is empty. Returns whether a row
    /// was written.
    pub async fn insert_first_admin(&self, username: &Username, hash: &PasswordHash) -> Result<bool> {
        let mut conn = self.db.acquire().await?;
        let outcome = self
            .db
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO Users (Username, Password, Role)
                    SELECT ?, ?, ? FROM DUAL
                    WHERE NOT EXISTS (SELECT 1 FROM Users)
                    "#,
                )
                .bind(username.as_str())
                .bind(hash.as_str())
                .bind(Role::Admin.as_str())
                .execute(&mut *conn),
            )
            .await;
        conn.release().await;

        let done = outcome.map_err(|e| duplicate_or(e, username))?;
        Ok(done.rows_affected() == 1)
    }

    /// Stored hash and role for `username`, if the user exists.
    pub async fn credentials(&self, username: &str) -> Result<Option<Credentials>> {
        let mut conn = self.db.acquire().await?;
        let row = self
            .db
            .timed(
                sqlx::query(
                    "SELECT Password, CAST(Role AS CHAR) AS Role FROM Users WHERE Username = ?",
                )
                .bind(username)
                .fetch_optional(&mut *conn),
            )
            .await?;
        conn.release().await;

        let Some(row) = row else {
            return Ok(None);
        };
        let hash: String = row.try_get("Password")?;
        let role: String = row.try_get("Role")?;
        let role = match role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                tracing::warn!(username, "stored role is not recognised; login will be refused");
                None
            }
        };
        Ok(Some(Credentials {
            hash: PasswordHash::from_stored(hash),
            role,
        }))
    }

    /// All users with a recognised role, without credentials.
    pub async fn list(&self) -> Result<Vec<User>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query("SELECT Username, CAST(Role AS CHAR) AS Role FROM Users ORDER BY Username")
                    .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let username: String = row.try_get("Username")?;
            let role: String = row.try_get("Role")?;
            if let Ok(role) = role.parse() {
                users.push(User { username, role });
            }
        }
        Ok(users)
    }
}

fn duplicate_or(err: DashError, username: &Username) -> DashError {
    match err {
        DashError::Query {
            source: sqlx::Error::Database(db),
        } if db.is_unique_violation() => DashError::DuplicateUser {
            username: username.to_string(),
        },
        other => other,
    }
}
