//! Per-invocation state: configuration, database handle and login

use std::io::IsTerminal;

use anyhow::{bail, Context, Result};
use inquire::Password;
use talentdash_core::auth::{AuthService, Session};
use talentdash_core::{DashConfig, Database};

use crate::Cli;

/// Environment variable read before prompting for the login password
pub const PASSWORD_ENV: &str = "TALENTDASH_PASSWORD";

/// Environment variable read before prompting for a new user's password
pub const NEW_PASSWORD_ENV: &str = "TALENTDASH_NEW_PASSWORD";

pub struct AppContext {
    pub db: Database,
    pub auth: AuthService,
    pub json: bool,
    user: Option<String>,
}

impl AppContext {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = DashConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
        tracing::debug!(?config, "configuration loaded");

        let db = Database::from_config(&config);
        let auth = AuthService::from_config(db.clone(), &config);
        Ok(Self {
            db,
            auth,
            json: cli.json,
            user: cli.user.clone(),
        })
    }

    /// Log in as `--user`. Mutating commands call this; reads do not.
    pub async fn session(&self) -> Result<Session> {
        let Some(username) = self.user.as_deref() else {
            bail!("this command needs a login; pass --user or set TALENTDASH_USER");
        };
        let password = secret(PASSWORD_ENV, &format!("Password for {}:", username), false)?;

        match self.auth.login(username, &password).await? {
            Some(session) => Ok(session),
            None => bail!("invalid username or password"),
        }
    }
}

/// Read a password from `env_var`, else prompt without echo.
pub fn secret(env_var: &str, prompt: &str, confirm: bool) -> Result<String> {
    if let Ok(value) = std::env::var(env_var) {
        return Ok(value);
    }
    if !std::io::stdin().is_terminal() {
        bail!("no terminal to prompt on; set {}", env_var);
    }

    let mut prompt = Password::new(prompt);
    if !confirm {
        prompt = prompt.without_confirmation();
    }
    prompt.prompt().context("Failed to read password")
}
