//! Connection provider
//!
//! No pooling and no retry: each DAL call opens its own connection, runs its
//! statements and closes it. A call that outlives the configured timeout is
//! reported as a connection failure.

use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use crate::config::{AuditMode, DashConfig, DatabaseConfig};
use crate::error::{DashError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle to the external database. Cheap to clone; holds no open socket.
#[derive(Clone)]
pub struct Database {
    options: MySqlConnectOptions,
    timeout: Duration,
    audit_mode: AuditMode,
}

impl Database {
    /// Build from loaded configuration.
    pub fn from_config(config: &DashConfig) -> Self {
        Self {
            options: connect_options(&config.database),
            timeout: config.query_timeout(),
            audit_mode: config.audit.mode,
        }
    }

    /// Build from a `mysql://` URL (used by integration tests).
    pub fn from_url(url: &str) -> Result<Self> {
        let options = MySqlConnectOptions::from_str(url)
            .map_err(|_| DashError::config("invalid database URL"))?;
        Ok(Self {
            options,
            timeout: DEFAULT_TIMEOUT,
            audit_mode: AuditMode::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_audit_mode(mut self, mode: AuditMode) -> Self {
        self.audit_mode = mode;
        self
    }

    pub fn audit_mode(&self) -> AuditMode {
        self.audit_mode
    }

    /// Open a fresh connection.
    ///
    /// # Errors
    ///
    /// Any failure here, including rejected credentials, is a
    /// `DashError::Connection`.
    pub async fn acquire(&self) -> Result<ScopedConnection> {
        let started = Instant::now();
        let conn = tokio::time::timeout(self.timeout, MySqlConnection::connect_with(&self.options))
            .await
            .map_err(|_| DashError::connection("timed out connecting to database"))?
            .map_err(|e| match DashError::from(e) {
                DashError::Query { source } => DashError::connection(source.to_string()),
                other => other,
            })?;

        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "connection acquired");
        Ok(ScopedConnection {
            conn,
            opened_at: started,
        })
    }

    /// Run one round trip under the per-call timeout.
    pub async fn timed<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(DashError::from),
            Err(_) => Err(DashError::connection(format!(
                "query exceeded {}s timeout",
                self.timeout.as_secs()
            ))),
        }
    }

    /// Health check (`SELECT 1`).
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.acquire().await?;
        let _: (i64,) = self
            .timed(sqlx::query_as("SELECT 1").fetch_one(&mut *conn))
            .await?;
        conn.release().await;
        Ok(())
    }
}

fn connect_options(db: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .username(&db.user)
        .password(&db.password)
        .database(&db.database)
}

/// One open connection. Dropping it closes the socket; `release` closes it
/// gracefully.
pub struct ScopedConnection {
    conn: MySqlConnection,
    opened_at: Instant,
}

impl ScopedConnection {
    /// Close the connection. Failures are logged, not returned: the work
    /// already completed.
    pub async fn release(self) {
        let held = self.opened_at.elapsed();
        if let Err(e) = self.conn.close().await {
            tracing::warn!("error closing connection: {}", e);
        }
        tracing::debug!(held_ms = held.as_millis() as u64, "connection released");
    }
}

impl Deref for ScopedConnection {
    type Target = MySqlConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_is_config_error() {
        let err = Database::from_url("not a url").err().unwrap();
        assert!(matches!(err, DashError::Config { .. }));
    }

    #[test]
    fn from_url_defaults() {
        let db = Database::from_url("mysql://dash:pw@localhost:3306/final_project").unwrap();
        assert_eq!(db.audit_mode(), AuditMode::Trigger);
        let db = db.with_audit_mode(AuditMode::Application);
        assert_eq!(db.audit_mode(), AuditMode::Application);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_maps_timeout_to_connection_error() {
        let db = Database::from_url("mysql://localhost/final_project")
            .unwrap()
            .with_timeout(Duration::from_secs(1));
        let err = db
            .timed(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, sqlx::Error>(())
            })
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn timed_passes_results_through() {
        let db = Database::from_url("mysql://localhost/final_project").unwrap();
        let value = db.timed(async { Ok::<_, sqlx::Error>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_live_database() {
        let url = std::env::var("TALENTDASH_TEST_DATABASE_URL")
            .expect("TALENTDASH_TEST_DATABASE_URL required");
        Database::from_url(&url).unwrap().ping().await.unwrap();
    }
}
