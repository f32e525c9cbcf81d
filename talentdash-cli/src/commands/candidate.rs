//! `talentdash candidate` - candidate records and search

use anyhow::Result;
use clap::{Parser, Subcommand};
use talentdash_core::db::CandidateRepo;
use talentdash_core::models::{EdLevel, NewCandidate};

use crate::context::AppContext;
use crate::ui;

#[derive(Parser, Debug)]
pub struct CandidateArgs {
    #[command(subcommand)]
    pub command: CandidateCommand,
}

#[derive(Subcommand, Debug)]
pub enum CandidateCommand {
    /// Add a candidate (requires login)
    Add {
        /// Undergraduate, Master or PhD
        #[arg(long)]
        ed_level: EdLevel,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        years_coded: i64,
        #[arg(long)]
        country: String,
        #[arg(long)]
        previous_salary: i64,
        /// Comma-separated skills
        #[arg(long)]
        skills: Option<String>,
    },
    /// List all candidates
    List,
    /// Candidates with a skill, an education level and minimum years coded
    Find {
        /// Substring matched against the Skills field
        #[arg(long)]
        skill: String,
        /// Undergraduate, Master or PhD
        #[arg(long)]
        ed_level: EdLevel,
        #[arg(long, default_value_t = 0)]
        min_years: i64,
    },
}

pub async fn run_candidate(ctx: &AppContext, args: CandidateArgs) -> Result<()> {
    let repo = CandidateRepo::new(&ctx.db);
    match args.command {
        CandidateCommand::Add {
            ed_level,
            gender,
            years_coded,
            country,
            previous_salary,
            skills,
        } => {
            let candidate = NewCandidate::new(
                ed_level,
                &gender,
                years_coded,
                &country,
                previous_salary,
                skills.as_deref(),
            )?;
            let session = ctx.session().await?;
            let id = repo.insert(&session, &candidate).await?;
            ui::success(format!("Candidate {} added", id));
        }
        CandidateCommand::List => ui::emit_rows("Candidates", &repo.list().await?, ctx.json)?,
        CandidateCommand::Find {
            skill,
            ed_level,
            min_years,
        } => {
            let found = repo.find(&skill, ed_level, min_years).await?;
            let title = format!("Candidates: {} / {} / {}+ years", skill, ed_level, min_years);
            ui::emit_rows(&title, &found, ctx.json)?;
        }
    }
    Ok(())
}
