//! Candidate records and education levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{bounded, required};
use super::ValidationError;

const MAX_FIELD_LEN: usize = 255;
const MAX_SKILLS_LEN: usize = 1024;

/// Education level. Stored as its exact display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdLevel {
    Undergraduate,
    Master,
    #[serde(rename = "PhD")]
    Phd,
}

impl EdLevel {
    pub const ALL: [EdLevel; 3] = [EdLevel::Undergraduate, EdLevel::Master, EdLevel::Phd];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdLevel::Undergraduate => "Undergraduate",
            EdLevel::Master => "Master",
            EdLevel::Phd => "PhD",
        }
    }
}

impl fmt::Display for EdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdLevel {
    type Err = ValidationError;

    /// Exact match only; filters compare with `=` in SQL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "education level",
                value: s.to_owned(),
            })
    }
}

/// Candidate row as stored. `ed_level` keeps whatever text the row holds.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Candidate {
    #[sqlx(rename = "CandidateID")]
    pub candidate_id: i64,
    #[sqlx(rename = "EdLevel")]
    pub ed_level: Option<String>,
    #[sqlx(rename = "Gender")]
    pub gender: Option<String>,
    #[sqlx(rename = "YearsCoded")]
    pub years_coded: Option<i64>,
    #[sqlx(rename = "Country")]
    pub country: Option<String>,
    #[sqlx(rename = "PreviousSalary")]
    pub previous_salary: Option<i64>,
    #[sqlx(rename = "Skills")]
    pub skills: Option<String>,
}

/// Validated input for `CandidateRepo::insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub(crate) ed_level: EdLevel,
    pub(crate) gender: String,
    pub(crate) years_coded: i64,
    pub(crate) country: String,
    pub(crate) previous_salary: i64,
    pub(crate) skills: Option<String>,
}

impl NewCandidate {
    pub fn new(
        ed_level: EdLevel,
        gender: &str,
        years_coded: i64,
        country: &str,
        previous_salary: i64,
        skills: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if years_coded < 0 {
            return Err(ValidationError::InvalidFormat {
                field: "years coded",
                reason: "must not be negative",
            });
        }
        if previous_salary < 0 {
            return Err(ValidationError::InvalidFormat {
                field: "previous salary",
                reason: "must not be negative",
            });
        }
        let skills = match skills.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(bounded("skills", s.to_owned(), MAX_SKILLS_LEN)?),
            None => None,
        };
        Ok(Self {
            ed_level,
            gender: bounded("gender", required("gender", gender)?, MAX_FIELD_LEN)?,
            years_coded,
            country: bounded("country", required("country", country)?, MAX_FIELD_LEN)?,
            previous_salary,
            skills,
        })
    }

    pub fn ed_level(&self) -> EdLevel {
        self.ed_level
    }
}
