// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup. A `.env` file in the working directory
//! is honored for local development.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Largest `limit` a recommendation request may ask for.
pub const MAX_RECOMMENDATION_LIMIT: usize = 50;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the marathon REST backend
    pub backend_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID; preferences are kept in memory when unset
    pub gcp_project_id: Option<String>,
    /// Server port
    pub port: u16,
    /// HS256 key shared with the token issuer (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Per-request timeout for backend calls
    pub backend_timeout: Duration,
    /// Attempts for idempotent backend reads
    pub backend_max_retries: u32,
    /// Recommendations returned when a request gives no limit
    pub recommendation_limit: usize,
    /// Look up training stats for the pace bonus
    pub fetch_training_stats: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: None,
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            backend_timeout: Duration::from_secs(10),
            backend_max_retries: 3,
            recommendation_limit: 6,
            fetch_training_stats: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let recommendation_limit: usize = parse_var("RECOMMENDATION_LIMIT", 6)?;
        if recommendation_limit == 0 || recommendation_limit > MAX_RECOMMENDATION_LIMIT {
            return Err(ConfigError::Invalid {
                name: "RECOMMENDATION_LIMIT",
                value: recommendation_limit.to_string(),
            });
        }

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("BACKEND_URL"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            port: parse_var("PORT", 8080)?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            backend_timeout: Duration::from_secs(parse_var("BACKEND_TIMEOUT_SECS", 10)?),
            backend_max_retries: parse_var("BACKEND_MAX_RETRIES", 3)?,
            recommendation_limit,
            fetch_training_stats: parse_var("FETCH_TRAINING_STATS", false)?,
        })
    }

    /// Config pointed at a specific backend, for tests.
    pub fn test_default(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            backend_max_retries: 1,
            ..Self::default()
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
