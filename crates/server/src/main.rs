use std::sync::Arc;

use anyhow::Context;
use reelgate_metadata::tmdb::TmdbClient;
use reelgate_server::config::Config;
use reelgate_server::diagnostics::{Configured, HealthProbe, NoDatabase, SqliteProbe};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().context("failed to read configuration")?;
    let configured = Configured::from(&config);

    if !configured.tmdb_api_key {
        warn!("TMDB_API_KEY not set; /api/tmdb endpoints will fail");
    }

    let probe: Arc<dyn HealthProbe> = match &config.database_url {
        Some(url) => {
            let pool = reelgate_db::connect_lazy(url).context("invalid DATABASE_URL")?;
            info!("database probe enabled");
            Arc::new(SqliteProbe::new(pool))
        }
        None => Arc::new(NoDatabase),
    };

    let upstream = TmdbClient::new(config.tmdb.clone()).context("failed to build TMDB client")?;
    info!(base_url = %config.tmdb.base_url, "TMDB client ready");

    let app_state = reelgate_server::state::AppState {
        upstream: Arc::new(upstream),
        probe,
        configured,
    };

    let app = reelgate_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
