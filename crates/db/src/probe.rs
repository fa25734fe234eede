use sqlx::SqlitePool;
use tracing::debug;

use crate::DbError;

/// Tables listed in a diagnostics report.
pub const MAX_LISTED_TABLES: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStatus {
    /// First [`MAX_LISTED_TABLES`] table names, alphabetically.
    pub tables: Vec<String>,
}

/// Round-trip to the database and list its tables.
pub async fn probe(pool: &SqlitePool) -> Result<DbStatus, DbError> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name LIMIT ?",
    )
    .bind(MAX_LISTED_TABLES)
    .fetch_all(pool)
    .await?;

    debug!(count = tables.len(), "database probe succeeded");
    Ok(DbStatus { tables })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_lists_tables() {
        let pool = crate::connect_lazy("sqlite::memory:").unwrap();
        sqlx::query("CREATE TABLE watchlist (id INTEGER PRIMARY KEY)")
            .execute(&pool)
            .await
            .unwrap();

        let status = probe(&pool).await.unwrap();
        assert_eq!(status.tables, vec!["watchlist".to_string()]);
    }

    #[tokio::test]
    async fn probe_reports_unreachable_database() {
        let pool = crate::connect_lazy("sqlite:///nonexistent/dir/reelgate.db").unwrap();
        let outcome = tokio::time::timeout(crate::ACQUIRE_TIMEOUT * 2, probe(&pool))
            .await
            .expect("probe should give up within the acquire timeout");
        assert!(outcome.is_err());
    }
}
