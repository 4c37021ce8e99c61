//! Server configuration, read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use imposter_game::ServiceConfig;
use imposter_session::StoreConfig;

use crate::ConfigError;

const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:8081", "http://localhost:19006"];

/// Everything the server needs to start.
///
/// [`Default`] gives the reference deployment; [`from_env`](Self::from_env)
/// overrides individual fields from environment variables:
///
/// | Variable           | Field                        |
/// |--------------------|------------------------------|
/// | `HOST`             | `host`                       |
/// | `PORT`             | `port`                       |
/// | `GAME_TTL_MS`      | `store.ttl`                  |
/// | `CLEANUP_EVERY_MS` | `store.sweep_interval`       |
/// | `CORS_ORIGINS`     | `cors_origins` (comma list)  |
/// | `CATALOG_PATH`     | `catalog_path`               |
/// | `GAME_SEED`        | `seed`                       |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    /// Browser origins allowed by CORS.
    pub cors_origins: Vec<String>,
    /// Replaces the embedded catalog when set.
    pub catalog_path: Option<PathBuf>,
    /// Fixes every RNG seed. Only useful for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store: StoreConfig::default(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            catalog_path: None,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value
    /// of a variable or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(ttl) = parse_millis(&lookup, "GAME_TTL_MS")? {
            config.store.ttl = ttl;
        }
        if let Some(every) = parse_millis(&lookup, "CLEANUP_EVERY_MS")? {
            config.store.sweep_interval = every;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(path) = lookup("CATALOG_PATH").filter(|p| !p.is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }
        config.seed = parse_var(&lookup, "GAME_SEED")?;

        Ok(config)
    }

    /// The `host:port` string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Game limits with this configuration's seed applied.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            seed: self.seed,
            ..ServiceConfig::default()
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

/// A positive duration in milliseconds.
fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    match parse_var::<u64>(lookup, key)? {
        Some(0) => Err(ConfigError::InvalidValue {
            key,
            value: "0".to_string(),
        }),
        other => Ok(other.map(Duration::from_millis)),
    }
}
