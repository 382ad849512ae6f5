//! Server configuration from the environment.
//!
//! - `FREIGHT_DATASET`: path to the node dataset (default `data/nodes.json`)
//! - `FREIGHT_BIND`: listen address (default `127.0.0.1:3000`)
//! - `FREIGHT_CACHE_TTL_SECS`: city lookup cache TTL in seconds (default 600)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::directory::CacheConfig;

const DEFAULT_DATASET: &str = "data/nodes.json";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Error from reading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid FREIGHT_BIND address {value:?}: {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid FREIGHT_CACHE_TTL_SECS {value:?}: {source}")]
    InvalidTtl {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// JSON dataset of ports, airports and places
    pub dataset_path: PathBuf,

    /// Address to listen on
    pub bind: SocketAddr,

    /// City lookup cache settings
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dataset_path: PathBuf = lookup("FREIGHT_DATASET")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATASET.to_string())
            .into();

        let bind_value = lookup("FREIGHT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_value.clone(),
                source,
            })?;

        let mut cache = CacheConfig::default();
        if let Some(value) = lookup("FREIGHT_CACHE_TTL_SECS") {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidTtl {
                    value: value.clone(),
                    source,
                })?;
            cache = cache.with_ttl(Duration::from_secs(secs));
        }

        Ok(Self {
            dataset_path,
            bind,
            cache,
        })
    }
}
