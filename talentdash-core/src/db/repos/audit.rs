//! Audit log repository (`Job_Audit`)

use crate::db::Database;
use crate::error::Result;
use crate::models::AuditEntry;

pub struct AuditRepo<'a> {
    db: &'a Database,
}

impl<'a> AuditRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All entries, newest first. `AuditID` breaks ties within one second.
    pub async fn list(&self) -> Result<Vec<AuditEntry>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, AuditEntry>(
                    r#"
                    SELECT AuditID, JobID, ActionType, OldSalaryRange, NewSalaryRange, ModifiedAt
                    FROM Job_Audit
                    ORDER BY ModifiedAt DESC, AuditID DESC
                    "#,
                )
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }

    /// Entries for one job, newest first.
    pub async fn list_for_job(&self, job_id: i64) -> Result<Vec<AuditEntry>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, AuditEntry>(
                    r#"
                    SELECT AuditID, JobID, ActionType, OldSalaryRange, NewSalaryRange, ModifiedAt
                    FROM Job_Audit
                    WHERE JobID = ?
                    ORDER BY ModifiedAt DESC, AuditID DESC
                    "#,
                )
                .bind(job_id)
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }
}
