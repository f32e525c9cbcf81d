//! The fixed report catalog
//!
//! SQL does the filtering with bound parameters; parsing of free-text
//! columns and the aggregations over them run here, per row, so a single
//! malformed `SalaryRange` or `Experience` never aborts a report.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use sqlx::FromRow;

use super::parse;
use super::table::{Cell, ReportTable, TableRow};
use crate::db::{contains_pattern, Database};
use crate::error::Result;
use crate::models::validation::required;
use crate::models::{EdLevel, ValidationError};

/// How many skills the in-demand report keeps
pub const TOP_SKILLS_LIMIT: usize = 3;

/// How many jobs the salary-by-skill report keeps
pub const TOP_SALARY_JOBS_LIMIT: usize = 5;

/// Catalog entries, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    RecruiterJobCounts,
    TopSkills,
    RecruitersByLocation,
    JobsBySkillSalary,
    JobsByMinExperience,
    MeanSalaryByEdLevel,
    MeanSalaryBySkill,
    SkillsSalaryBenchmark,
}

impl ReportKind {
    pub const ALL: [ReportKind; 8] = [
        ReportKind::RecruiterJobCounts,
        ReportKind::TopSkills,
        ReportKind::RecruitersByLocation,
        ReportKind::JobsBySkillSalary,
        ReportKind::JobsByMinExperience,
        ReportKind::MeanSalaryByEdLevel,
        ReportKind::MeanSalaryBySkill,
        ReportKind::SkillsSalaryBenchmark,
    ];

    /// Stable machine name
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::RecruiterJobCounts => "recruiter-job-counts",
            ReportKind::TopSkills => "top-skills",
            ReportKind::RecruitersByLocation => "recruiters-by-location",
            ReportKind::JobsBySkillSalary => "jobs-by-skill-salary",
            ReportKind::JobsByMinExperience => "jobs-by-min-experience",
            ReportKind::MeanSalaryByEdLevel => "mean-salary-by-ed-level",
            ReportKind::MeanSalaryBySkill => "mean-salary-by-skill",
            ReportKind::SkillsSalaryBenchmark => "skills-salary-benchmark",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::RecruiterJobCounts => "Total Jobs Posted by Each Recruiter",
            ReportKind::TopSkills => "Top 3 Most In-Demand Skills",
            ReportKind::RecruitersByLocation => "Recruiters Posting Jobs in a Location",
            ReportKind::JobsBySkillSalary => "Best-Paying Jobs for a Skill",
            ReportKind::JobsByMinExperience => "Jobs by Recruiter with Minimum Experience",
            ReportKind::MeanSalaryByEdLevel => "Mean Candidate Salary by Education Level",
            ReportKind::MeanSalaryBySkill => "Mean Candidate Salary by Skill",
            ReportKind::SkillsSalaryBenchmark => "In-Demand Skills with Salary Benchmark",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "report",
                value: s.to_owned(),
            })
    }
}

/// Inputs for [`ReportCatalog::run`]; each report reads only what it needs.
#[derive(Debug, Clone, Default)]
pub struct ReportParams {
    pub location: Option<String>,
    pub skill: Option<String>,
    pub ed_level: Option<EdLevel>,
    pub recruiter: Option<String>,
    pub min_experience: u32,
}

// ============================================================================
// Row types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RecruiterJobCount {
    #[sqlx(rename = "ContactPerson")]
    pub contact_person: String,
    #[sqlx(rename = "TotalJobsPosted")]
    pub total_jobs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RecruiterPosting {
    #[sqlx(rename = "ContactPerson")]
    pub contact_person: String,
    #[sqlx(rename = "Company")]
    pub company: Option<String>,
    #[sqlx(rename = "Title")]
    pub title: Option<String>,
    #[sqlx(rename = "Location")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SkillJob {
    #[sqlx(rename = "Title")]
    pub title: Option<String>,
    #[sqlx(rename = "Location")]
    pub location: Option<String>,
    #[sqlx(rename = "SalaryRange")]
    pub salary_range: Option<String>,
    #[sqlx(rename = "Skills")]
    pub skills: Option<String>,
}

impl SkillJob {
    pub fn salary_upper_bound(&self) -> Option<u64> {
        self.salary_range.as_deref().and_then(parse::salary_upper_bound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RecruiterJob {
    #[sqlx(rename = "ContactPerson")]
    pub contact_person: String,
    #[sqlx(rename = "Company")]
    pub company: Option<String>,
    #[sqlx(rename = "Title")]
    pub title: Option<String>,
    #[sqlx(rename = "Experience")]
    pub experience: Option<String>,
}

impl RecruiterJob {
    pub fn experience_years(&self) -> Option<u32> {
        self.experience.as_deref().and_then(parse::leading_integer)
    }
}

/// Mean of `PreviousSalary` over the matching candidates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MeanSalary {
    /// No candidate matched (or none had a salary)
    NoData,
    Value { candidates: i64, mean: f64 },
}

impl MeanSalary {
    /// Combine `COUNT(PreviousSalary)` and `SUM(PreviousSalary)`.
    pub fn from_totals(count: i64, sum: Option<i64>) -> Self {
        match sum {
            Some(sum) if count > 0 => MeanSalary::Value {
                candidates: count,
                mean: sum as f64 / count as f64,
            },
            _ => MeanSalary::NoData,
        }
    }

    pub fn mean(&self) -> Option<f64> {
        match self {
            MeanSalary::NoData => None,
            MeanSalary::Value { mean, .. } => Some(*mean),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsBenchmark {
    /// The raw, unsplit Skills value of the group
    pub skills: Option<String>,
    /// `None` when no job in the group has a parsable upper bound
    pub average_salary: Option<f64>,
}

// ============================================================================
// Aggregations (pure)
// ============================================================================

/// Count skill tokens across Skills fields and keep the `limit` most common.
///
/// Tokens are whitespace-trimmed and compared case-insensitively; the first
/// spelling seen is reported. Ties keep first-seen order.
pub fn top_skills<'s, I>(skills_fields: I, limit: usize) -> Vec<SkillCount>
where
    I: IntoIterator<Item = &'s str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<SkillCount> = Vec::new();

    for field in skills_fields {
        for token in parse::skill_tokens(field) {
            let key = token.to_lowercase();
            match index.get(&key) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(key, counts.len());
                    counts.push(SkillCount {
                        skill: token.to_owned(),
                        count: 1,
                    });
                }
            }
        }
    }

    // sort_by_key is stable, so equal counts stay in first-seen order
    counts.sort_by_key(|s| Reverse(s.count));
    counts.truncate(limit);
    counts
}

/// Order by salary upper bound, highest first; unparsable ranges sort last.
pub fn rank_by_upper_salary(mut jobs: Vec<SkillJob>, limit: usize) -> Vec<SkillJob> {
    // Reverse(None) > Reverse(Some(_)), which puts unparsable rows at the end
    jobs.sort_by_key(|j| Reverse(j.salary_upper_bound()));
    jobs.truncate(limit);
    jobs
}

/// Keep rows whose Experience parses to at least `min_years`.
pub fn filter_min_experience(rows: Vec<RecruiterJob>, min_years: u32) -> Vec<RecruiterJob> {
    rows.into_iter()
        .filter(|r| r.experience_years().is_some_and(|y| y >= min_years))
        .collect()
}

/// Average upper salary bound per distinct raw Skills value, highest first.
///
/// Groups are the unsplit Skills strings, so "Python, SQL" and "SQL, Python"
/// are different groups.
pub fn salary_benchmark<I>(rows: I) -> Vec<SkillsBenchmark>
where
    I: IntoIterator<Item = (Option<String>, Option<String>)>,
{
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    // u128 sums cannot overflow on u64 bounds
    let mut groups: Vec<(Option<String>, u128, u64)> = Vec::new();

    for (skills, range) in rows {
        let upper = range.as_deref().and_then(parse::salary_upper_bound);
        let i = match index.get(&skills) {
            Some(&i) => i,
            None => {
                index.insert(skills.clone(), groups.len());
                groups.push((skills, 0, 0));
                groups.len() - 1
            }
        };
        if let Some(upper) = upper {
            groups[i].1 += u128::from(upper);
            groups[i].2 += 1;
        }
    }

    let mut out: Vec<SkillsBenchmark> = groups
        .into_iter()
        .map(|(skills, sum, n)| SkillsBenchmark {
            skills,
            average_salary: (n > 0).then(|| sum as f64 / n as f64),
        })
        .collect();

    out.sort_by(|a, b| match (a.average_salary, b.average_salary) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    out
}

// ============================================================================
// Catalog
// ============================================================================

pub struct ReportCatalog<'a> {
    db: &'a Database,
}

impl<'a> ReportCatalog<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every recruiter with the number of distinct jobs posted under their name.
    pub async fn recruiter_job_counts(&self) -> Result<Vec<RecruiterJobCount>> {
        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, RecruiterJobCount>(
                    r#"
                    SELECT r.ContactPerson, COUNT(DISTINCT j.JobID) AS TotalJobsPosted
                    FROM Recruiter r
                    LEFT JOIN Job j ON r.ContactPerson = j.ContactPerson
                    GROUP BY r.ContactPerson
                    ORDER BY TotalJobsPosted DESC, r.ContactPerson
                    "#,
                )
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }

    /// The three most frequent skill tokens across all jobs.
    pub async fn top_skills(&self) -> Result<Vec<SkillCount>> {
        let mut conn = self.db.acquire().await?;
        let rows: Vec<(String,)> = self
            .db
            .timed(
                sqlx::query_as("SELECT Skills FROM Job WHERE Skills IS NOT NULL ORDER BY JobID")
                    .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;

        Ok(top_skills(rows.iter().map(|(s,)| s.as_str()), TOP_SKILLS_LIMIT))
    }

    /// Recruiters joined to their jobs at exactly `location`.
    pub async fn recruiters_by_location(&self, location: &str) -> Result<Vec<RecruiterPosting>> {
        let location = required("location", location)?;

        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, RecruiterPosting>(
                    r#"
                    SELECT r.ContactPerson, r.Company, j.Title, j.Location
                    FROM Recruiter r
                    JOIN Job j ON r.ContactPerson = j.ContactPerson
                    WHERE j.Location = ?
                    ORDER BY j.JobID
                    "#,
                )
                .bind(&location)
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(rows)
    }

    /// Up to five jobs mentioning `skill`, best-paying first.
    pub async fn jobs_by_skill_salary(&self, skill: &str) -> Result<Vec<SkillJob>> {
        let skill = required("skill", skill)?;

        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, SkillJob>(
                    r#"
                    SELECT Title, Location, SalaryRange, Skills
                    FROM Job
                    WHERE Skills LIKE ?
                    ORDER BY JobID
                    "#,
                )
                .bind(contains_pattern(&skill))
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;

        Ok(rank_by_upper_salary(rows, TOP_SALARY_JOBS_LIMIT))
    }

    /// Jobs requiring at least `min_years`, optionally for one recruiter.
    pub async fn jobs_by_min_experience(
        &self,
        recruiter: Option<&str>,
        min_years: u32,
    ) -> Result<Vec<RecruiterJob>> {
        let recruiter = recruiter.map(str::trim).filter(|r| !r.is_empty());

        let mut conn = self.db.acquire().await?;
        let rows = self
            .db
            .timed(
                sqlx::query_as::<_, RecruiterJob>(
                    r#"
                    SELECT r.ContactPerson, r.Company, j.Title, j.Experience
                    FROM Recruiter r
                    JOIN Job j ON r.ContactPerson = j.ContactPerson
                    WHERE (? IS NULL OR r.ContactPerson = ?)
                    ORDER BY j.JobID
                    "#,
                )
                .bind(recruiter)
                .bind(recruiter)
                .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;

        Ok(filter_min_experience(rows, min_years))
    }

    pub async fn mean_salary_by_ed_level(&self, ed_level: EdLevel) -> Result<MeanSalary> {
        let mut conn = self.db.acquire().await?;
        let (count, sum): (i64, Option<i64>) = self
            .db
            .timed(
                sqlx::query_as(
                    r#"
                    SELECT COUNT(PreviousSalary), CAST(SUM(PreviousSalary) AS SIGNED)
                    FROM Candidate
                    WHERE EdLevel = ?
                    "#,
                )
                .bind(ed_level.as_str())
                .fetch_one(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(MeanSalary::from_totals(count, sum))
    }

    pub async fn mean_salary_by_skill(&self, skill: &str) -> Result<MeanSalary> {
        let skill = required("skill", skill)?;

        let mut conn = self.db.acquire().await?;
        let (count, sum): (i64, Option<i64>) = self
            .db
            .timed(
                sqlx::query_as(
                    r#"
                    SELECT COUNT(PreviousSalary), CAST(SUM(PreviousSalary) AS SIGNED)
                    FROM Candidate
                    WHERE Skills LIKE ?
                    "#,
                )
                .bind(contains_pattern(&skill))
                .fetch_one(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(MeanSalary::from_totals(count, sum))
    }

    /// Average upper salary bound per distinct Skills value.
    pub async fn skills_salary_benchmark(&self) -> Result<Vec<SkillsBenchmark>> {
        let mut conn = self.db.acquire().await?;
        let rows: Vec<(Option<String>, Option<String>)> = self
            .db
            .timed(
                sqlx::query_as("SELECT Skills, SalaryRange FROM Job ORDER BY JobID")
                    .fetch_all(&mut *conn),
            )
            .await?;
        conn.release().await;
        Ok(salary_benchmark(rows))
    }

    /// Run any catalog entry and shape it for display.
    pub async fn run(&self, kind: ReportKind, params: &ReportParams) -> Result<ReportTable> {
        let title = kind.title();
        let table = match kind {
            ReportKind::RecruiterJobCounts => {
                ReportTable::from_rows(title, &self.recruiter_job_counts().await?)
            }
            ReportKind::TopSkills => ReportTable::from_rows(title, &self.top_skills().await?),
            ReportKind::RecruitersByLocation => {
                let location = params.location.as_deref().unwrap_or_default();
                ReportTable::from_rows(title, &self.recruiters_by_location(location).await?)
            }
            ReportKind::JobsBySkillSalary => {
                let skill = params.skill.as_deref().unwrap_or_default();
                ReportTable::from_rows(title, &self.jobs_by_skill_salary(skill).await?)
            }
            ReportKind::JobsByMinExperience => ReportTable::from_rows(
                title,
                &self
                    .jobs_by_min_experience(params.recruiter.as_deref(), params.min_experience)
                    .await?,
            ),
            ReportKind::MeanSalaryByEdLevel => {
                let ed_level = params.ed_level.ok_or(ValidationError::Empty {
                    field: "education level",
                })?;
                ReportTable::from_rows(title, &[self.mean_salary_by_ed_level(ed_level).await?])
            }
            ReportKind::MeanSalaryBySkill => {
                let skill = params.skill.as_deref().unwrap_or_default();
                ReportTable::from_rows(title, &[self.mean_salary_by_skill(skill).await?])
            }
            ReportKind::SkillsSalaryBenchmark => {
                ReportTable::from_rows(title, &self.skills_salary_benchmark().await?)
            }
        };
        tracing::debug!(report = kind.name(), rows = table.rows.len(), "report complete");
        Ok(table)
    }
}

// ============================================================================
// Table shapes
// ============================================================================

impl TableRow for RecruiterJobCount {
    const COLUMNS: &'static [&'static str] = &["Recruiter", "Total Jobs Posted"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.contact_person.as_str().into(), self.total_jobs.into()]
    }
}

impl TableRow for SkillCount {
    const COLUMNS: &'static [&'static str] = &["Skill", "Skill Count"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.skill.as_str().into(), self.count.into()]
    }
}

impl TableRow for RecruiterPosting {
    const COLUMNS: &'static [&'static str] = &["Contact Person", "Company", "Title", "Location"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.contact_person.as_str().into(),
            self.company.clone().into(),
            self.title.clone().into(),
            self.location.clone().into(),
        ]
    }
}

impl TableRow for SkillJob {
    const COLUMNS: &'static [&'static str] = &["Title", "Location", "Salary Range", "Skills"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.title.clone().into(),
            self.location.clone().into(),
            self.salary_range.clone().into(),
            self.skills.clone().into(),
        ]
    }
}

impl TableRow for RecruiterJob {
    const COLUMNS: &'static [&'static str] = &["Contact Person", "Company", "Title", "Experience"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.contact_person.as_str().into(),
            self.company.clone().into(),
            self.title.clone().into(),
            self.experience.clone().into(),
        ]
    }
}

impl TableRow for MeanSalary {
    const COLUMNS: &'static [&'static str] = &["Candidates", "Mean Salary"];

    /// No data renders as a null mean, distinct from a mean of 0.
    fn cells(&self) -> Vec<Cell> {
        match self {
            MeanSalary::NoData => vec![Cell::Int(0), Cell::Null],
            MeanSalary::Value { candidates, mean } => vec![Cell::Int(*candidates), Cell::Float(*mean)],
        }
    }
}

impl TableRow for SkillsBenchmark {
    const COLUMNS: &'static [&'static str] = &["Skills", "Average Salary"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.skills.clone().into(), self.average_salary.into()]
    }
}
