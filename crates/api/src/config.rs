use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Mount point of the live-webinar pages (default: `/live-webinar`).
    pub live_webinar_base: String,
    /// Upper bound on one checkout-session request in seconds (default: `15`).
    pub checkout_timeout_secs: u64,
    /// Base URL the stub checkout service builds session URLs from.
    pub checkout_base_url: String,
    /// Optional JSON file with webinar and attendee snapshots to preload.
    pub snapshot_seed_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `HOST`                   | `0.0.0.0`                        |
    /// | `PORT`                   | `3000`                           |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                             |
    /// | `LIVE_WEBINAR_BASE_PATH` | `/live-webinar`                  |
    /// | `CHECKOUT_TIMEOUT_SECS`  | `15`                             |
    /// | `CHECKOUT_BASE_URL`      | `https://checkout.local/session` |
    /// | `SNAPSHOT_SEED_PATH`     | unset                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port = parse_env("PORT", "3000", "u16")?;

        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    expected: "header value",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", "30", "u64")?;

        let live_webinar_base = env_or("LIVE_WEBINAR_BASE_PATH", "/live-webinar");
        let live_webinar_base = live_webinar_base.trim_end_matches('/').to_string();
        if !live_webinar_base.starts_with('/') || live_webinar_base.len() < 2 {
            return Err(ConfigError::Invalid {
                name: "LIVE_WEBINAR_BASE_PATH",
                expected: "absolute path other than '/'",
                value: live_webinar_base,
            });
        }

        let checkout_timeout_secs = parse_env("CHECKOUT_TIMEOUT_SECS", "15", "u64")?;
        let checkout_base_url = env_or("CHECKOUT_BASE_URL", "https://checkout.local/session");
        let snapshot_seed_path = std::env::var("SNAPSHOT_SEED_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            live_webinar_base,
            checkout_timeout_secs,
            checkout_base_url,
            snapshot_seed_path,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn parse_env<T: FromStr>(
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let raw = env_or(name, default);
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value: raw,
    })
}
