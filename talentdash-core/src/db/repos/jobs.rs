//! Job repository
//!
//! Handles job CRUD with:
//! - Insert returning the `AUTO_INCREMENT` key
//! - Salary range update, the only mutation of an existing row, feeding the
//!   audit log either through the database trigger or in-transaction

use serde::Serialize;
use sqlx::Connection;

use crate::auth::Session;
use crate::config::AuditMode;
use crate::db::Database;
use crate::error::{DashError, Result};
use crate::models::audit::ACTION_UPDATE;
use crate::models::validation::{bounded, required};
use crate::models::{Job, JobTitle, NewJob};
use crate::reports::parse;

const MAX_SALARY_RANGE_LEN: usize = 255;

/// Outcome of a salary range update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryChange {
    pub job_id: i64,
    pub old_salary_range: Option<String>,
    pub new_salary_range: String,
}

pub struct JobRepo<'a> {
    db: &'a Database,
}

impl<'a> JobRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a job posting, returning the new `JobID`.
    pub async fn insert(&self, session: &Session, job: &NewJob) -> Result<i64> {
        session.require_authenticated()?;

        let mut conn = self.db.acquire().await?;
        let done = self
            .db
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO Job (Location, Date, Experience, Skills, Title, ContactPerson, SalaryRange)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&job.location)
                .bind(&job.date)
                .bind(&job.experience)
                .bind(job.skills.as_deref())
                .bind(&job.title)
                .bind(&job.contact_person)
                .bind(job.salary_range.as_deref())
                .execute(&mut *conn),
            )
            .await?;
        conn.release().await;

        let id = done.last_insert_id() as i64;
        tracing::info!(job_id = id, title = %job.title, "job added");
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<Job>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, Job>(
                    r#"
                    SELECT JobID, Location, Date, Experience, Skills, Title, ContactPerson, SalaryRange
                    FROM Job
                    ORDER BY JobID
                    "#,
                )
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }

    /// `(JobID, Title)` pairs for choosing a job to update.
    pub async fn list_titles(&self) -> Result<Vec<JobTitle>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, JobTitle>("SELECT JobID, Title FROM Job ORDER BY JobID")
                    .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }

    /// Get a single job by id.
    pub async fn get(&self, job_id: i64) -> Result<Job> {
        let mut conn = self.db.acquire().await?;
        let job = self
            .db
            .timed(
                sqlx::query_as::<_, Job>(
                    r#"
                    SELECT JobID, Location, Date, Experience, Skills, Title, ContactPerson, SalaryRange
                    FROM Job
                    WHERE JobID = ?
                    "#,
                )
                .bind(job_id)
                .fetch_optional(&mut *conn),
            )
            .await?;
        conn.release().await;
        job.ok_or(DashError::JobNotFound { job_id })
    }

    /// Replace a job's salary range.
    ///
    /// Existence is checked inside the update's transaction, so a missing id
    /// yields `JobNotFound` with nothing written, and rewriting the same value
    /// still succeeds. In `AuditMode::Application` the audit row is inserted
    /// in the same transaction.
    pub async fn update_salary_range(
        &self,
        session: &Session,
        job_id: i64,
        new_range: &str,
    ) -> Result<SalaryChange> {
        session.require_authenticated()?;
        let new_range = bounded(
            "salary range",
            required("salary range", new_range)?,
            MAX_SALARY_RANGE_LEN,
        )?;
        if parse::salary_bounds(&new_range).is_none() {
            tracing::warn!(job_id, range = %new_range, "salary range is not <low>-<high>; reports will treat it as unparsable");
        }

        let mut conn = self.db.acquire().await?;
        let mut tx = self.db.timed(conn.begin()).await?;

        let current: Option<(Option<String>,)> = self
            .db
            .timed(
                sqlx::query_as("SELECT SalaryRange FROM Job WHERE JobID = ? FOR UPDATE")
                    .bind(job_id)
                    .fetch_optional(&mut *tx),
            )
            .await?;

        let Some((old_range,)) = current else {
            // Dropping the transaction rolls back
            return Err(DashError::JobNotFound { job_id });
        };

        self.db
            .timed(
                sqlx::query("UPDATE Job SET SalaryRange = ? WHERE JobID = ?")
                    .bind(&new_range)
                    .bind(job_id)
                    .execute(&mut *tx),
            )
            .await?;

        if self.db.audit_mode() == AuditMode::Application {
            self.db
                .timed(
                    sqlx::query(
                        r#"
                        INSERT INTO Job_Audit (JobID, ActionType, OldSalaryRange, NewSalaryRange, ModifiedAt)
                        VALUES (?, ?, ?, ?, NOW())
                        "#,
                    )
                    .bind(job_id)
                    .bind(ACTION_UPDATE)
                    .bind(old_range.as_deref())
                    .bind(&new_range)
                    .execute(&mut *tx),
                )
                .await?;
        }

        self.db.timed(tx.commit()).await?;
        conn.release().await;

        tracing::info!(
            job_id,
            old = old_range.as_deref().unwrap_or(""),
            new = %new_range,
            by = session.username().unwrap_or(""),
            "salary range updated"
        );
        Ok(SalaryChange {
            job_id,
            old_salary_range: old_range,
            new_salary_range: new_range,
        })
    }
}
