//! Tabular results with a declared column schema

use std::fmt;

use serde::Serialize;

use crate::models::{AuditEntry, Candidate, Job, JobTitle, Recruiter, User};

/// One table cell. Serializes to plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(x) => write!(f, "{:.2}", x),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_owned())
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Float(x)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// A row type that knows its column headers
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

/// Display-ready result of a report or listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn from_rows<R: TableRow>(title: impl Into<String>, rows: &[R]) -> Self {
        Self {
            title: title.into(),
            columns: R::COLUMNS.to_vec(),
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TableRow for Recruiter {
    const COLUMNS: &'static [&'static str] = &["Contact Person", "Contact", "Company", "Company Profile"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.contact_person.as_str().into(),
            self.contact.clone().into(),
            self.company.clone().into(),
            self.company_profile.clone().into(),
        ]
    }
}

impl TableRow for Job {
    const COLUMNS: &'static [&'static str] = &[
        "JobID",
        "Location",
        "Date",
        "Experience",
        "Skills",
        "Title",
        "Contact Person",
        "Salary Range",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.job_id.into(),
            self.location.clone().into(),
            self.date.clone().into(),
            self.experience.clone().into(),
            self.skills.clone().into(),
            self.title.clone().into(),
            self.contact_person.clone().into(),
            self.salary_range.clone().into(),
        ]
    }
}

impl TableRow for JobTitle {
    const COLUMNS: &'static [&'static str] = &["JobID", "Title"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.job_id.into(), self.title.clone().into()]
    }
}

impl TableRow for Candidate {
    const COLUMNS: &'static [&'static str] = &[
        "CandidateID",
        "Education Level",
        "Gender",
        "Years Coded",
        "Country",
        "Previous Salary",
        "Skills",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.candidate_id.into(),
            self.ed_level.clone().into(),
            self.gender.clone().into(),
            self.years_coded.into(),
            self.country.clone().into(),
            self.previous_salary.into(),
            self.skills.clone().into(),
        ]
    }
}

impl TableRow for AuditEntry {
    const COLUMNS: &'static [&'static str] = &[
        "AuditID",
        "JobID",
        "Action Type",
        "Old Salary Range",
        "New Salary Range",
        "Modified At",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.audit_id.into(),
            self.job_id.into(),
            self.action_type.clone().into(),
            self.old_salary_range.clone().into(),
            self.new_salary_range.clone().into(),
            self.modified_at.format("%Y-%m-%d %H:%M:%S").to_string().into(),
        ]
    }
}

impl TableRow for User {
    const COLUMNS: &'static [&'static str] = &["Username", "Role"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.username.as_str().into(), self.role.as_str().into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn cells_serialize_as_plain_json() {
        let row = vec![Cell::Null, Cell::Int(3), Cell::Float(1.5), Cell::from("x")];
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"[null,3,1.5,"x"]"#
        );
    }

    #[test]
    fn display_formats_floats_and_nulls() {
        assert_eq!(Cell::Float(85000.0).to_string(), "85000.00");
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::from(None::<i64>), Cell::Null);
    }

    #[test]
    fn table_from_rows_uses_declared_columns() {
        let users = vec![User {
            username: "jane".into(),
            role: Role::Recruiter,
        }];
        let table = ReportTable::from_rows("Users", &users);
        assert_eq!(table.columns, vec!["Username", "Role"]);
        assert_eq!(table.rows, vec![vec![Cell::from("jane"), Cell::from("recruiter")]]);
        assert!(!table.is_empty());
    }
}
