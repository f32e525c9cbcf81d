//! Recruiter records
//!
//! `ContactPerson` is the join key to `Job`. There is no surrogate id in the
//! external schema, so two recruiters sharing a name share their jobs.

use serde::Serialize;
use sqlx::FromRow;

use super::validation::{bounded, required};
use super::ValidationError;

const MAX_FIELD_LEN: usize = 255;

/// Recruiter row as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Recruiter {
    #[sqlx(rename = "ContactPerson")]
    pub contact_person: String,
    #[sqlx(rename = "Contact")]
    pub contact: Option<String>,
    #[sqlx(rename = "Company")]
    pub company: Option<String>,
    #[sqlx(rename = "CompanyProfile")]
    pub company_profile: Option<String>,
}

/// Validated input for `RecruiterRepo::insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecruiter {
    contact_person: String,
    contact: String,
    company: String,
    company_profile: Option<String>,
}

impl NewRecruiter {
    /// Contact person, contact and company are required; the profile may be blank.
    pub fn new(
        contact_person: &str,
        contact: &str,
        company: &str,
        company_profile: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            contact_person: bounded(
                "contact person",
                required("contact person", contact_person)?,
                MAX_FIELD_LEN,
            )?,
            contact: bounded("contact", required("contact", contact)?, MAX_FIELD_LEN)?,
            company: bounded("company", required("company", company)?, MAX_FIELD_LEN)?,
            company_profile: company_profile
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_owned),
        })
    }

    pub fn contact_person(&self) -> &str {
        &self.contact_person
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn company_profile(&self) -> Option<&str> {
        self.company_profile.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_optional() {
        let r = NewRecruiter::new("Jane Roe", "jane@acme.io", "Acme", Some("   ")).unwrap();
        assert_eq!(r.company_profile(), None);
        assert_eq!(r.contact_person(), "Jane Roe");
    }

    #[test]
    fn rejects_missing_company() {
        let err = NewRecruiter::new("Jane Roe", "jane@acme.io", "", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "company" });
    }
}
