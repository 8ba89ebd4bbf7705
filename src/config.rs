//! Configuration Module
//!
//! Loads server configuration from environment variables. Backend
//! credentials are read at startup but only validated when a lookup misses
//! the cache and actually needs the backend.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::cache::DEFAULT_PARTITION;
use crate::error::{ProximityError, Result};

/// Default Cloudflare API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for cached proximity results
    pub cache_ttl: u64,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Maximum rows requested from the backend per lookup
    pub row_limit: usize,
    /// Cache partition holding proximity results
    pub cache_partition: String,
    /// Base URL of the Cloudflare API
    pub api_base_url: String,
    /// Timeout in seconds for one backend request
    pub request_timeout: u64,
    /// Backend credentials, validated lazily
    pub backend: BackendConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Result TTL in seconds (default: 60)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `ROW_LIMIT` - Rows per backend query (default: 10)
    /// - `CACHE_PARTITION` - Cache partition name (default: atm-cache)
    /// - `CLOUDFLARE_API_BASE_URL` - API base URL
    /// - `REQUEST_TIMEOUT_SECS` - Backend request timeout (default: 10)
    /// - `CLOUDFLARE_AUTH_TOKEN`, `CLOUDFLARE_ACCOUNT_ID`,
    ///   `CLOUDFLARE_DATABASE_ID` - backend credentials (no default)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            row_limit: env_or("ROW_LIMIT", defaults.row_limit),
            cache_partition: env_or("CACHE_PARTITION", defaults.cache_partition),
            api_base_url: env_or("CLOUDFLARE_API_BASE_URL", defaults.api_base_url),
            request_timeout: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            backend: BackendConfig::new(
                env_secret("CLOUDFLARE_AUTH_TOKEN"),
                env_secret("CLOUDFLARE_ACCOUNT_ID"),
                env_secret("CLOUDFLARE_DATABASE_ID"),
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: 60,
            max_entries: 1000,
            cleanup_interval: 1,
            row_limit: 10,
            cache_partition: DEFAULT_PARTITION.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: 10,
            backend: BackendConfig::default(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_secret(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// == Backend Config ==
/// Backend secrets as supplied, possibly incomplete.
#[derive(Clone, Default)]
pub struct BackendConfig {
    api_token: Option<String>,
    account_id: Option<String>,
    database_id: Option<String>,
}

impl BackendConfig {
    /// Empty strings are treated as absent.
    pub fn new(
        api_token: Option<String>,
        account_id: Option<String>,
        database_id: Option<String>,
    ) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            api_token: present(api_token),
            account_id: present(account_id),
            database_id: present(database_id),
        }
    }

    /// Returns complete credentials, or a configuration error naming every
    /// missing value.
    pub fn credentials(&self) -> Result<D1Credentials> {
        match (&self.api_token, &self.account_id, &self.database_id) {
            (Some(api_token), Some(account_id), Some(database_id)) => Ok(D1Credentials {
                api_token: api_token.clone(),
                account_id: account_id.clone(),
                database_id: database_id.clone(),
            }),
            _ => {
                let missing: Vec<&str> = [
                    ("CLOUDFLARE_AUTH_TOKEN", self.api_token.is_none()),
                    ("CLOUDFLARE_ACCOUNT_ID", self.account_id.is_none()),
                    ("CLOUDFLARE_DATABASE_ID", self.database_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(ProximityError::Configuration(format!(
                    "missing {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("account_id", &self.account_id)
            .field("database_id", &self.database_id)
            .finish()
    }
}

// == D1 Credentials ==
/// Complete credentials for the D1 query API.
#[derive(Clone, PartialEq, Eq)]
pub struct D1Credentials {
    pub api_token: String,
    pub account_id: String,
    pub database_id: String,
}

impl fmt::Debug for D1Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("D1Credentials")
            .field("api_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("database_id", &self.database_id)
            .finish()
    }
}
