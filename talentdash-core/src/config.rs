//! Configuration for talentdash
//!
//! Database credentials live in an untracked TOML file created from
//! `talentdash.example.toml`. Lookup order:
//!
//! 1. explicit path (`--config`)
//! 2. `./talentdash.toml`
//! 3. `~/.talentdash/config.toml`
//!
//! `TALENTDASH_DB_*` environment variables override the file values.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};

/// The committed copy-and-fill template
pub const TEMPLATE: &str = include_str!("../../talentdash.example.toml");

const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Work factors the bcrypt crate accepts
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    pub database: DatabaseConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    /// Upper bound for one database round trip
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// bcrypt work factor for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

/// Connection parameters for the external MySQL database
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

// Hand-written so the password never reaches logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions older than this are rejected. `None` keeps them forever.
    #[serde(default)]
    pub max_age_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub mode: AuditMode,
}

/// Who writes `Job_Audit` rows on salary updates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditMode {
    /// A database trigger on `Job` appends the row
    #[default]
    Trigger,
    /// The update statement's transaction appends the row itself
    Application,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_query_timeout_secs() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl DashConfig {
    /// Load from the first config file found, then apply env overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(DashError::config(format!(
                        "config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => Self::search_paths()
                .into_iter()
                .find(|p| p.exists())
                .ok_or_else(|| {
                    DashError::config(
                        "no config found; copy talentdash.example.toml to talentdash.toml and fill it in",
                    )
                })?,
        };

        tracing::debug!("loading config from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| {
            DashError::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse configuration text without touching the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DashError::config(format!("invalid TOML: {}", e)))?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&config.bcrypt_cost) {
            return Err(DashError::config(format!(
                "bcrypt_cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, config.bcrypt_cost
            )));
        }
        Ok(config)
    }

    /// Candidate locations in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("talentdash.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".talentdash").join("config.toml"));
        }
        paths
    }

    /// Override database fields from `TALENTDASH_DB_*` variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = &mut self.database;
        if let Some(host) = lookup("TALENTDASH_DB_HOST") {
            db.host = host;
        }
        if let Some(port) = lookup("TALENTDASH_DB_PORT") {
            db.port = port
                .parse()
                .map_err(|_| DashError::config(format!("TALENTDASH_DB_PORT is not a port: {}", port)))?;
        }
        if let Some(user) = lookup("TALENTDASH_DB_USER") {
            db.user = user;
        }
        if let Some(password) = lookup("TALENTDASH_DB_PASSWORD") {
            db.password = password;
        }
        if let Some(name) = lookup("TALENTDASH_DB_NAME") {
            db.database = name;
        }
        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs.max(1))
    }

    pub fn session_max_age(&self) -> Option<chrono::Duration> {
        self.session
            .max_age_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(chrono::Duration::try_seconds)
    }
}
