//! Database connection pool management.

use crate::error::DbError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Default maximum number of pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default timeout when acquiring a connection from the pool.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// A wrapper around `sqlx::PgPool` with SmartRetail defaults.
#[derive(Debug, Clone)]
pub struct DbPool {
    inner: PgPool,
}

impl DbPool {
    /// Connect to the database with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the database is unreachable
    /// or the connection string is invalid.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        Self::connect_with_max(database_url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with an explicit maximum connection count.
    pub async fn connect_with_max(database_url: &str, max: u32) -> Result<Self, DbError> {
        let inner = PgPoolOptions::new()
            .max_connections(max)
            .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        tracing::info!(max_connections = max, "Database pool connected");
        Ok(Self { inner })
    }

    /// Returns a reference to the underlying `PgPool`.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.inner
    }
}

/// Probe database reachability with a minimal query.
///
/// # Errors
///
/// Returns the underlying `sqlx::Error` when the store is unreachable;
/// callers map this to their own health/error representation.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
