use reelgate_metadata::tmdb::{BASE_URL, TmdbConfig};

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub tmdb: TmdbConfig,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(p) => p.trim().parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };
        let bind_addr = var("REELGATE_BIND").unwrap_or_else(|| format!("0.0.0.0:{port}"));

        let tmdb = TmdbConfig {
            api_key: var("TMDB_API_KEY"),
            base_url: var("TMDB_BASE_URL").unwrap_or_else(|| BASE_URL.to_string()),
            ..Default::default()
        };

        Ok(Self {
            bind_addr,
            tmdb,
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
        })
    }
}
