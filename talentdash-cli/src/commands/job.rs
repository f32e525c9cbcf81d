//! `talentdash job` - job postings and salary range updates

use anyhow::Result;
use clap::{Parser, Subcommand};
use talentdash_core::db::{AuditRepo, JobRepo};
use talentdash_core::models::NewJob;

use crate::context::AppContext;
use crate::ui;

#[derive(Parser, Debug)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Post a job (requires login)
    Add(AddJob),
    /// List all jobs
    List,
    /// List job IDs and titles
    Titles,
    /// Replace a job's salary range and show its audit trail (requires login)
    SetSalary {
        /// Job ID (see `talentdash job titles`)
        job_id: i64,
        /// New range, e.g. "90000-120000"
        range: String,
    },
}

#[derive(Parser, Debug)]
pub struct AddJob {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub location: String,
    /// Posting date as free text (e.g. 2024-05-01)
    #[arg(long)]
    pub date: String,
    /// Required experience, e.g. "3 years"
    #[arg(long)]
    pub experience: String,
    /// Recruiter contact person posting the job
    #[arg(long)]
    pub contact_person: String,
    /// Comma-separated skills
    #[arg(long)]
    pub skills: Option<String>,
    /// Salary range "<low>-<high>"
    #[arg(long)]
    pub salary_range: Option<String>,
}

impl AddJob {
    fn to_new_job(&self) -> Result<NewJob> {
        let mut job = NewJob::new(
            &self.location,
            &self.date,
            &self.experience,
            &self.title,
            &self.contact_person,
        )?;
        if let Some(skills) = &self.skills {
            job = job.with_skills(skills)?;
        }
        if let Some(range) = &self.salary_range {
            job = job.with_salary_range(range)?;
        }
        Ok(job)
    }
}

pub async fn run_job(ctx: &AppContext, args: JobArgs) -> Result<()> {
    let repo = JobRepo::new(&ctx.db);
    match args.command {
        JobCommand::Add(add) => {
            let job = add.to_new_job()?;
            let session = ctx.session().await?;
            let job_id = repo.insert(&session, &job).await?;
            ui::success(format!("Job {} '{}' added", job_id, job.title()));
        }
        JobCommand::List => ui::emit_rows("Jobs", &repo.list().await?, ctx.json)?,
        JobCommand::Titles => ui::emit_rows("Job Titles", &repo.list_titles().await?, ctx.json)?,
        JobCommand::SetSalary { job_id, range } => {
            let session = ctx.session().await?;
            let change = repo.update_salary_range(&session, job_id, &range).await?;
            let trail = AuditRepo::new(&ctx.db).list_for_job(job_id).await?;

            if ctx.json {
                ui::print_json(&serde_json::json!({ "change": change, "audit": trail }))?;
            } else {
                ui::success(format!(
                    "Job {} salary range: {} -> {}",
                    change.job_id,
                    change.old_salary_range.as_deref().unwrap_or("(none)"),
                    change.new_salary_range
                ));
                ui::emit_rows("Audit Trail", &trail, false)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_job() -> AddJob {
        AddJob {
            title: "Data Engineer".into(),
            location: "Remote".into(),
            date: "2024-05-01".into(),
            experience: "3 years".into(),
            contact_person: "Jane Roe".into(),
            skills: Some("Python, SQL".into()),
            salary_range: Some("90000-120000".into()),
        }
    }

    #[test]
    fn builds_new_job() {
        let job = add_job().to_new_job().unwrap();
        assert_eq!(job.title(), "Data Engineer");
        assert_eq!(job.contact_person(), "Jane Roe");
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut add = add_job();
        add.location = "  ".into();
        assert!(add.to_new_job().is_err());
    }
}
