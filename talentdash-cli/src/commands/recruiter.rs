//! `talentdash recruiter` - add and list recruiters

use anyhow::Result;
use clap::{Parser, Subcommand};
use talentdash_core::db::RecruiterRepo;
use talentdash_core::models::NewRecruiter;

use crate::context::AppContext;
use crate::ui;

#[derive(Parser, Debug)]
pub struct RecruiterArgs {
    #[command(subcommand)]
    pub command: RecruiterCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecruiterCommand {
    /// Add a recruiter (requires login)
    Add {
        /// Contact person; jobs reference the recruiter by this name
        contact_person: String,
        /// Email or phone
        #[arg(long)]
        contact: String,
        #[arg(long)]
        company: String,
        /// Free-text company profile
        #[arg(long)]
        profile: Option<String>,
    },
    /// List all recruiters
    List,
}

pub async fn run_recruiter(ctx: &AppContext, args: RecruiterArgs) -> Result<()> {
    let repo = RecruiterRepo::new(&ctx.db);
    match args.command {
        RecruiterCommand::Add {
            contact_person,
            contact,
            company,
            profile,
        } => {
            let recruiter =
                NewRecruiter::new(&contact_person, &contact, &company, profile.as_deref())?;
            let session = ctx.session().await?;
            let key = repo.insert(&session, &recruiter).await?;
            ui::success(format!("Recruiter '{}' added", key));
        }
        RecruiterCommand::List => {
            ui::emit_rows("Recruiters", &repo.list().await?, ctx.json)?;
        }
    }
    Ok(())
}
