//! talentdash CLI - talent acquisition dashboard
//!
//! Thin presentation layer over `talentdash-core`:
//! - Data entry for recruiters, jobs and candidates
//! - Dumps and filtered lookups (`list`, `candidate find`, `job titles`)
//! - Salary range updates and the audit trail (`job set-salary`, `audit`)
//! - The report catalog (`report <kind>`)
//! - User management (`user add`, `user bootstrap`, `user list`)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod context;
mod tracing_setup;
mod ui;

use context::AppContext;

#[derive(Parser, Debug)]
#[command(
    name = "talentdash",
    author,
    version,
    about = "Talent acquisition dashboard: recruiters, jobs, candidates and reports",
    long_about = "Manage recruiter, job and candidate records in the talent database, \
                  update salary ranges with an audit trail, and run the analytic report catalog."
)]
pub(crate) struct Cli {
    /// Config file (default: ./talentdash.toml, then ~/.talentdash/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log in as this user (password from TALENTDASH_PASSWORD or a prompt)
    #[arg(long, short = 'u', global = true, env = "TALENTDASH_USER")]
    user: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true, conflicts_with = "debug")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create users and bootstrap the first admin
    User(commands::user::UserArgs),
    /// Add or list recruiters
    Recruiter(commands::recruiter::RecruiterArgs),
    /// Add or list jobs, update salary ranges
    Job(commands::job::JobArgs),
    /// Add, list or search candidates
    Candidate(commands::candidate::CandidateArgs),
    /// Show the salary range audit log
    Audit(commands::audit::AuditArgs),
    /// Run a report from the catalog
    Report(commands::report::ReportArgs),
    /// Check that the database is reachable
    Ping,
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        quiet: cli.quiet,
    })
    .ok();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions(args) = &cli.command {
        return run_completions(args);
    }

    let ctx = AppContext::load(&cli)?;
    match cli.command {
        Commands::User(args) => commands::run_user(&ctx, args).await,
        Commands::Recruiter(args) => commands::run_recruiter(&ctx, args).await,
        Commands::Job(args) => commands::run_job(&ctx, args).await,
        Commands::Candidate(args) => commands::run_candidate(&ctx, args).await,
        Commands::Audit(args) => commands::run_audit(&ctx, args).await,
        Commands::Report(args) => commands::run_report(&ctx, args).await,
        Commands::Ping => {
            ctx.db.ping().await?;
            ui::success("database reachable");
            Ok(())
        }
        Commands::Completions(_) => Ok(()),
    }
}

fn run_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
