//! `talentdash user` - user management

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::context::{secret, AppContext, NEW_PASSWORD_ENV};
use crate::ui;

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a user (admin login required)
    ///
    /// The new password is read from TALENTDASH_NEW_PASSWORD or prompted for.
    Add {
        username: String,
        /// admin or recruiter
        #[arg(long, default_value = "recruiter")]
        role: String,
    },
    /// Create the first admin on an empty Users table (no login)
    Bootstrap { username: String },
    /// List users and roles (admin login required)
    List,
}

pub async fn run_user(ctx: &AppContext, args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Add { username, role } => {
            let session = ctx.session().await?;
            let password = secret(NEW_PASSWORD_ENV, &format!("New password for {}:", username), true)?;
            ctx.auth.create_user(&session, &username, &password, &role).await?;
            ui::success(format!("User '{}' created with role {}", username, role));
        }
        UserCommand::Bootstrap { username } => {
            let password = secret(NEW_PASSWORD_ENV, &format!("New password for {}:", username), true)?;
            ctx.auth.bootstrap_admin(&username, &password).await?;
            ui::success(format!("Admin '{}' created", username));
        }
        UserCommand::List => {
            let session = ctx.session().await?;
            ui::emit_rows("Users", &ctx.auth.list_users(&session).await?, ctx.json)?;
        }
    }
    Ok(())
}
