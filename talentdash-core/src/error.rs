//! Structured error types for talentdash-core.
//!
//! Every DAL, auth and report call returns [`DashError`]. The presentation
//! layer decides how to word them; nothing in here formats user-facing text
//! beyond the `Display` impls used for logs.

use thiserror::Error;

use crate::models::{Role, ValidationError};

/// Main error type for talentdash-core operations
#[derive(Error, Debug)]
pub enum DashError {
    /// The database could not be reached, the connection dropped, or the
    /// per-call timeout expired. No partial effect was committed.
    #[error("connection error: {reason}")]
    Connection { reason: String },

    /// Username already taken
    #[error("user '{username}' already exists")]
    DuplicateUser { username: String },

    /// No job row with this id
    #[error("job {job_id} not found")]
    JobNotFound { job_id: i64 },

    /// Missing or malformed input field
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Role string outside {admin, recruiter}
    #[error("invalid role '{value}'")]
    InvalidRole { value: String },

    /// Session has a role, but not the one this operation needs
    #[error("operation requires {required} role")]
    Unauthorized { required: Role },

    /// Session never authenticated (or logged out)
    #[error("not authenticated")]
    NotAuthenticated,

    /// Session outlived its configured max age
    #[error("session expired")]
    SessionExpired,

    /// Statement rejected by the database
    #[error("query error: {source}")]
    Query {
        #[source]
        source: sqlx::Error,
    },

    /// bcrypt failed or the blocking task panicked
    #[error("password hashing failed: {reason}")]
    Hashing { reason: String },

    /// Configuration could not be loaded
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for talentdash-core operations
pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }

    pub fn hashing(reason: impl Into<String>) -> Self {
        Self::Hashing {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// True for failures the caller may retry later (connection class).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

impl From<sqlx::Error> for DashError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(e) => Self::connection(e.to_string()),
            sqlx::Error::Tls(e) => Self::connection(format!("tls: {}", e)),
            sqlx::Error::Protocol(msg) => Self::connection(format!("protocol: {}", msg)),
            sqlx::Error::PoolTimedOut => Self::connection("timed out acquiring connection"),
            sqlx::Error::PoolClosed => Self::connection("connection provider closed"),
            sqlx::Error::WorkerCrashed => Self::connection("database worker crashed"),
            // Configuration errors can echo the connect URL; keep them out of messages.
            sqlx::Error::Configuration(_) => Self::connection("invalid connection settings"),
            other => Self::Query { source: other },
        }
    }
}
