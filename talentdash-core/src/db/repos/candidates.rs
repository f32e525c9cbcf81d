//! Candidate repository

use crate::auth::Session;
use crate::db::{contains_pattern, Database};
use crate::error::Result;
use crate::models::validation::required;
use crate::models::{Candidate, EdLevel, NewCandidate};

pub struct CandidateRepo<'a> {
    db: &'a Database,
}

impl<'a> CandidateRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a candidate, returning the new `CandidateID`.
    pub async fn insert(&self, session: &Session, candidate: &NewCandidate) -> Result<i64> {
        session.require_authenticated()?;

        let mut conn = self.db.acquire().await?;
        let done = self
            .db
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO Candidate (EdLevel, Gender, YearsCoded, Country, PreviousSalary, Skills)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(candidate.ed_level.as_str())
                .bind(&candidate.gender)
                .bind(candidate.years_coded)
                .bind(&candidate.country)
                .bind(candidate.previous_salary)
                .bind(candidate.skills.as_deref())
                .execute(&mut *conn),
            )
            .await?;
        conn.release().await;

        let id = done.last_insert_id() as i64;
        tracing::info!(candidate_id = id, "candidate added");
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, Candidate>(
                    r#"
                    SELECT CandidateID, EdLevel, Gender, YearsCoded, Country, PreviousSalary, Skills
                    FROM Candidate
                    ORDER BY CandidateID
                    "#,
                )
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }

    /// Candidates whose Skills contain `skill`, with exactly `ed_level` and at
    /// least `min_years_coded` years.
    ///
    /// Substring matching is deliberately loose ("Python" matches
    /// "Python3, SQL"); case sensitivity follows the column collation.
    pub async fn find(
        &self,
        skill: &str,
        ed_level: EdLevel,
        min_years_coded: i64,
    ) -> Result<Vec<Candidate>> {
        let skill = required("skill", skill)?;

        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, Candidate>(
                    r#"
                    SELECT CandidateID, EdLevel, Gender, YearsCoded, Country, PreviousSalary, Skills
                    FROM Candidate
                    WHERE Skills LIKE ?
                      AND EdLevel = ?
                      AND YearsCoded >= ?
                    ORDER BY CandidateID
                    "#,
                )
                .bind(contains_pattern(&skill))
                .bind(ed_level.as_str())
                .bind(min_years_coded)
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;

        tracing::debug!(matches = rows.len(), "candidate search");
        Ok(rows)
    }
}
