//! `talentdash audit` - salary range audit log

use anyhow::Result;
use clap::Parser;
use talentdash_core::db::AuditRepo;

use crate::context::AppContext;
use crate::ui;

#[derive(Parser, Debug)]
pub struct AuditArgs {
    /// Only entries for this job
    #[arg(long, value_name = "JOB_ID")]
    pub job: Option<i64>,
}

pub async fn run_audit(ctx: &AppContext, args: AuditArgs) -> Result<()> {
    let repo = AuditRepo::new(&ctx.db);
    let entries = match args.job {
        Some(job_id) => repo.list_for_job(job_id).await?,
        None => repo.list().await?,
    };
    ui::emit_rows("Job Audit Log", &entries, ctx.json)
}
