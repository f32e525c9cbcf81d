//! Job salary audit log (`Job_Audit`), read-only from this crate's side
//! unless the application audit mode is configured.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Action type written for salary range changes
pub const ACTION_UPDATE: &str = "UPDATE";

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AuditEntry {
    #[sqlx(rename = "AuditID")]
    pub audit_id: i64,
    #[sqlx(rename = "JobID")]
    pub job_id: i64,
    #[sqlx(rename = "ActionType")]
    pub action_type: Option<String>,
    #[sqlx(rename = "OldSalaryRange")]
    pub old_salary_range: Option<String>,
    #[sqlx(rename = "NewSalaryRange")]
    pub new_salary_range: Option<String>,
    #[sqlx(rename = "ModifiedAt")]
    pub modified_at: NaiveDateTime,
}
