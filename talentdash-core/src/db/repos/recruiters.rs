//! Recruiter repository

use crate::auth::Session;
use crate::db::Database;
use crate::error::Result;
use crate::models::{NewRecruiter, Recruiter};

pub struct RecruiterRepo<'a> {
    db: &'a Database,
}

impl<'a> RecruiterRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a recruiter. Returns its key, the contact person name.
    pub async fn insert(&self, session: &Session, recruiter: &NewRecruiter) -> Result<String> {
        session.require_authenticated()?;

        let mut conn = self.db.acquire().await?;
        self.db
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO Recruiter (ContactPerson, Contact, Company, CompanyProfile)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(recruiter.contact_person())
                .bind(recruiter.contact())
                .bind(recruiter.company())
                .bind(recruiter.company_profile())
                .execute(&mut *conn),
            )
            .await?;
        conn.release().await;

        tracing::info!(contact_person = recruiter.contact_person(), "recruiter added");
        Ok(recruiter.contact_person().to_owned())
    }

    pub async fn list(&self) -> Result<Vec<Recruiter>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, Recruiter>(
                    r#"
                    SELECT ContactPerson, Contact, Company, CompanyProfile
                    FROM Recruiter
                    ORDER BY ContactPerson
                    "#,
                )
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }
}
