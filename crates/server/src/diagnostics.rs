//! Operational diagnostics. None of the TMDB handlers depend on anything here.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::state::AppState;

/// Longest probe error text echoed back in a report.
const MAX_ERROR_CHARS: usize = 50;

/// Result of one database connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseCheck {
    NotConfigured,
    Connected { tables: Vec<String> },
    Failed(String),
}

/// Reports whether a database is reachable.
#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self) -> DatabaseCheck;
}

/// Probe used when no `DATABASE_URL` is configured.
pub struct NoDatabase;

#[async_trait::async_trait]
impl HealthProbe for NoDatabase {
    async fn check(&self) -> DatabaseCheck {
        DatabaseCheck::NotConfigured
    }
}

pub struct SqliteProbe {
    pool: SqlitePool,
}

impl SqliteProbe {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl HealthProbe for SqliteProbe {
    async fn check(&self) -> DatabaseCheck {
        match reelgate_db::probe::probe(&self.pool).await {
            Ok(status) => DatabaseCheck::Connected {
                tables: status.tables,
            },
            Err(e) => {
                tracing::warn!(error = %e, "database probe failed");
                DatabaseCheck::Failed(e.to_string())
            }
        }
    }
}

/// Which optional settings were present at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Configured {
    pub tmdb_api_key: bool,
    pub database_url: bool,
    pub database_name: bool,
}

impl From<&Config> for Configured {
    fn from(config: &Config) -> Self {
        Self {
            tmdb_api_key: config.tmdb.has_api_key(),
            database_url: config.database_url.is_some(),
            database_name: config.database_name.is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub tmdb_api_key: String,
}

fn set_label(present: bool) -> String {
    let label = if present { "set" } else { "not set" };
    label.to_string()
}

fn truncate(msg: &str) -> String {
    msg.chars().take(MAX_ERROR_CHARS).collect()
}

impl DiagnosticsReport {
    pub fn build(check: DatabaseCheck, configured: Configured) -> Self {
        let (database, connection_status, collections) = match check {
            DatabaseCheck::NotConfigured => {
                ("not configured".to_string(), "Not Connected", Vec::new())
            }
            DatabaseCheck::Connected { tables } => {
                ("connected & working".to_string(), "Connected", tables)
            }
            DatabaseCheck::Failed(e) => {
                (format!("error: {}", truncate(&e)), "Not Connected", Vec::new())
            }
        };

        Self {
            backend: "running".to_string(),
            database,
            database_url: set_label(configured.database_url),
            database_name: set_label(configured.database_name),
            connection_status: connection_status.to_string(),
            collections,
            tmdb_api_key: set_label(configured.tmdb_api_key),
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the reelgate backend!".to_string(),
    })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!".to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Database and configuration report. Always 200; failures are reported in
/// the body.
pub async fn report(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let check = state.probe.check().await;
    Json(DiagnosticsReport::build(check, state.configured))
}
