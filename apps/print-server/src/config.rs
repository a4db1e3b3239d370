//! Print server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default request body limit: 50 MiB, enough for a very long day.
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Print server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintServerConfig {
    /// Listening port (`TALLY_PRINT_PORT`, default 3000)
    pub port: u16,

    /// Listening address (`TALLY_BIND_ADDR`, default 0.0.0.0)
    pub bind_addr: IpAddr,

    /// Where closeout backups are written (`TALLY_BACKUP_DIR`, default `backups`)
    pub backup_dir: PathBuf,

    /// Largest accepted request body (`TALLY_MAX_BODY_BYTES`)
    pub max_body_bytes: usize,

    /// Single allowed CORS origin (`TALLY_ALLOWED_ORIGIN`); any origin when unset
    pub allowed_origin: Option<String>,
}

impl Default for PrintServerConfig {
    fn default() -> Self {
        PrintServerConfig {
            port: 3000,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            backup_dir: PathBuf::from("backups"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allowed_origin: None,
        }
    }
}

impl PrintServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PrintServerConfig::default();

        let config = PrintServerConfig {
            port: parse_or(&lookup, "TALLY_PRINT_PORT", defaults.port)?,
            bind_addr: parse_or(&lookup, "TALLY_BIND_ADDR", defaults.bind_addr)?,
            backup_dir: lookup("TALLY_BACKUP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.backup_dir),
            max_body_bytes: parse_or(&lookup, "TALLY_MAX_BODY_BYTES", defaults.max_body_bytes)?,
            allowed_origin: lookup("TALLY_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty()),
        };

        if config.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue("TALLY_MAX_BODY_BYTES".to_string()));
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
