//! Job postings
//!
//! Experience ("<number> <unit>"), Skills (comma separated) and SalaryRange
//! ("<low>-<high>") are free text. Parsing happens per row in
//! [`crate::reports::parse`] and never fails the surrounding call.

use serde::Serialize;
use sqlx::FromRow;

use super::validation::{bounded, required};
use super::ValidationError;
use crate::reports::parse;

const MAX_FIELD_LEN: usize = 255;
const MAX_SKILLS_LEN: usize = 1024;

/// Job row as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Job {
    #[sqlx(rename = "JobID")]
    pub job_id: i64,
    #[sqlx(rename = "Location")]
    pub location: Option<String>,
    #[sqlx(rename = "Date")]
    pub date: Option<String>,
    #[sqlx(rename = "Experience")]
    pub experience: Option<String>,
    #[sqlx(rename = "Skills")]
    pub skills: Option<String>,
    #[sqlx(rename = "Title")]
    pub title: Option<String>,
    #[sqlx(rename = "ContactPerson")]
    pub contact_person: Option<String>,
    #[sqlx(rename = "SalaryRange")]
    pub salary_range: Option<String>,
}

impl Job {
    /// Upper bound of `SalaryRange`, or `None` when unparsable.
    pub fn salary_upper_bound(&self) -> Option<u64> {
        self.salary_range.as_deref().and_then(parse::salary_upper_bound)
    }

    /// Leading integer of `Experience`, or `None` when unparsable.
    pub fn experience_years(&self) -> Option<u32> {
        self.experience.as_deref().and_then(parse::leading_integer)
    }
}

/// `(JobID, Title)` pair for pickers
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct JobTitle {
    #[sqlx(rename = "JobID")]
    pub job_id: i64,
    #[sqlx(rename = "Title")]
    pub title: Option<String>,
}

/// Validated input for `JobRepo::insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub(crate) location: String,
    pub(crate) date: String,
    pub(crate) experience: String,
    pub(crate) skills: Option<String>,
    pub(crate) title: String,
    pub(crate) contact_person: String,
    pub(crate) salary_range: Option<String>,
}

impl NewJob {
    /// Builder entry point with the required fields.
    pub fn new(
        location: &str,
        date: &str,
        experience: &str,
        title: &str,
        contact_person: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            location: bounded("location", required("location", location)?, MAX_FIELD_LEN)?,
            date: bounded("date", required("date", date)?, MAX_FIELD_LEN)?,
            experience: bounded(
                "experience",
                required("experience", experience)?,
                MAX_FIELD_LEN,
            )?,
            skills: None,
            title: bounded("title", required("title", title)?, MAX_FIELD_LEN)?,
            contact_person: bounded(
                "contact person",
                required("contact person", contact_person)?,
                MAX_FIELD_LEN,
            )?,
            salary_range: None,
        })
    }

    /// Comma-separated skills; blank input clears the field.
    pub fn with_skills(mut self, skills: &str) -> Result<Self, ValidationError> {
        let skills = skills.trim();
        self.skills = if skills.is_empty() {
            None
        } else {
            Some(bounded("skills", skills.to_owned(), MAX_SKILLS_LEN)?)
        };
        Ok(self)
    }

    /// Free-text salary range. Stored verbatim; reports parse it per row.
    pub fn with_salary_range(mut self, range: &str) -> Result<Self, ValidationError> {
        let range = range.trim();
        self.salary_range = if range.is_empty() {
            None
        } else {
            Some(bounded("salary range", range.to_owned(), MAX_FIELD_LEN)?)
        };
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn contact_person(&self) -> &str {
        &self.contact_person
    }
}
