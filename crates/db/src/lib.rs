pub mod probe;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Upper bound on waiting for a connection, so diagnostics fail fast.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Build a SQLite pool without opening a connection. Connectivity is only
/// checked when the pool is first used, so a missing database never blocks
/// startup.
pub fn connect_lazy(database_url: &str) -> Result<SqlitePool, DbError> {
    let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy_with(opts);

    Ok(pool)
}
