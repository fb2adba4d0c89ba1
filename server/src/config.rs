//! Server configuration parsed from environment variables.

use client::prefetch::{DEFAULT_MAX_PASSES, PrefetchLimits};

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_STATIC_DIR: &str = "dist";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} not defined")]
    Missing(&'static str),
    #[error("environment variable {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Route the GraphQL endpoint is mounted at, e.g. `/graphql`.
    pub graphql_path: String,
    /// Public base URI of this server, used for the SSR loopback transport.
    pub public_base_uri: String,
    pub port: u16,
    /// Directory the client bundle is served from.
    pub static_dir: String,
    pub prefetch_max_passes: usize,
    /// Upper bound on one prefetch query; expiry is a per-query failure.
    pub query_timeout_secs: u64,
}

impl Config {
    /// Build server config from environment variables.
    ///
    /// Required: `PUBLIC_GRAPHQL_PATH`, `PUBLIC_BASE_URI`, `PORT`.
    /// Optional: `STATIC_DIR`, `PREFETCH_MAX_PASSES`, `QUERY_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the variable when a required value is
    /// absent or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let graphql_path = require("PUBLIC_GRAPHQL_PATH")?;
        if !graphql_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                name: "PUBLIC_GRAPHQL_PATH",
                reason: "must start with '/'".to_owned(),
            });
        }

        let public_base_uri = require("PUBLIC_BASE_URI")?.trim_end_matches('/').to_owned();

        let port = require("PORT")?
            .parse()
            .map_err(|err: std::num::ParseIntError| ConfigError::Invalid {
                name: "PORT",
                reason: err.to_string(),
            })?;

        Ok(Self {
            graphql_path,
            public_base_uri,
            port,
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_owned()),
            prefetch_max_passes: env_parse_usize("PREFETCH_MAX_PASSES", DEFAULT_MAX_PASSES),
            query_timeout_secs: env_parse_u64("QUERY_TIMEOUT_SECS", DEFAULT_QUERY_TIMEOUT_SECS),
        })
    }

    /// Absolute URI of the GraphQL endpoint, the SSR loopback target.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!("{}{}", self.public_base_uri, self.graphql_path)
    }

    #[must_use]
    pub fn prefetch_limits(&self) -> PrefetchLimits {
        PrefetchLimits { max_passes: self.prefetch_max_passes }
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn env_parse_usize(key: &str, default: usize) -> usize {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
