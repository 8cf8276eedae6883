//! PostgreSQL connection pooling and driver error classification

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StorageConfig;
use crate::domain::UserStoreError;

/// PostgreSQL pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/user_traits".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

impl From<&StorageConfig> for PostgresConfig {
    fn from(config: &StorageConfig) -> Self {
        Self::new(&config.url)
            .with_max_connections(config.max_connections)
            .with_min_connections(config.min_connections)
            .with_connect_timeout(config.connect_timeout_secs)
            .with_idle_timeout(config.idle_timeout_secs)
    }
}

/// Open a pool and verify the database answers
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, UserStoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| UserStoreError::unavailable_caused_by("Failed to connect to PostgreSQL", e))?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| UserStoreError::unavailable_caused_by("Failed to ping PostgreSQL", e))?;

    Ok(pool)
}

/// SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Whether the driver reported a unique constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() || db.code().as_deref() == Some(UNIQUE_VIOLATION)
        }
        _ => false,
    }
}

/// Classify a driver error into a store error kind
///
/// Transport failures and connection-class SQLSTATEs (`08xxx`, `57P0x`)
/// are `Unavailable`; everything else is `Storage`. The driver error is
/// kept as the source either way.
pub fn classify_error(err: sqlx::Error) -> UserStoreError {
    let message = err.to_string();

    if is_unavailable(&err) {
        UserStoreError::unavailable_caused_by(message, err)
    } else {
        UserStoreError::storage_caused_by(message, err)
    }
}

fn is_unavailable(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => true,
        sqlx::Error::Database(db) => is_connection_state(db.code().as_deref()),
        _ => false,
    }
}

fn is_connection_state(code: Option<&str>) -> bool {
    match code {
        Some(code) => code.starts_with("08") || code.starts_with("57P0"),
        None => false,
    }
}
