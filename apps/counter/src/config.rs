//! # Counter Configuration
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults                                                            │
//! │  2. counter.toml                                                        │
//! │     --config <path>, or the platform config dir:                        │
//! │       ~/.config/counter/counter.toml (Linux)                            │
//! │       ~/Library/Application Support/com.tally.counter/counter.toml     │
//! │  3. Environment                                                         │
//! │     TALLY_DB_PATH, TALLY_LEDGER_SLOT, TALLY_PRINT_URL,                  │
//! │     TALLY_OUTPUT_DIR, TALLY_PRINT_TIMEOUT_SECS                          │
//! │  4. Command line flags                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```toml
//! # counter.toml
//! db_path = "/var/lib/tally/tally.db"
//! ledger_slot = "day_ledger"
//! print_url = "http://127.0.0.1:3000"
//! output_dir = "documents"
//! print_timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tally_core::DEFAULT_LEDGER_SLOT;
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "counter.toml";

/// Configuration loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Command line flags.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "counter", version, about = "Ticket Tally sales counter")]
pub struct CliArgs {
    /// Config file (default: counter.toml in the platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ledger database file
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Ledger slot name
    #[arg(long)]
    pub slot: Option<String>,

    /// Print server base URL
    #[arg(long, value_name = "URL")]
    pub print_url: Option<String>,

    /// Directory for printed documents
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub print_timeout_secs: Option<u64>,

    /// Write the resolved configuration back to the config file and continue
    #[arg(long)]
    pub save_config: bool,
}

/// Resolved counter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub db_path: PathBuf,
    pub ledger_slot: String,
    pub print_url: String,
    pub output_dir: PathBuf,
    pub print_timeout_secs: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        CounterConfig {
            db_path: default_db_path(),
            ledger_slot: DEFAULT_LEDGER_SLOT.to_string(),
            print_url: "http://127.0.0.1:3000".to_string(),
            output_dir: PathBuf::from("documents"),
            print_timeout_secs: 10,
        }
    }
}

impl CounterConfig {
    /// Loads configuration from file, environment, flags and defaults.
    pub fn load(args: &CliArgs) -> ConfigResult<Self> {
        let path = args.config.clone().or_else(default_config_path);
        Self::from_sources(path.as_deref(), |key| std::env::var(key).ok(), args)
    }

    /// Same as [`CounterConfig::load`] with an explicit file and environment.
    pub fn from_sources<F>(file: Option<&Path>, lookup: F, args: &CliArgs) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(path) if path.exists() => {
                info!(?path, "Loading counter config from file");
                let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                toml::from_str(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                CounterConfig::default()
            }
            None => CounterConfig::default(),
        };

        config.apply_env_overrides(lookup);
        config.apply_cli_overrides(args);
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration as TOML, creating the parent directory.
    pub fn save(&self, config_path: Option<&Path>) -> ConfigResult<PathBuf> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        let write_err = |e: std::io::Error| ConfigError::Write {
            path: path.clone(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(write_err)?;

        info!(?path, "Counter config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.print_url.starts_with("http://") && !self.print_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "print_url must start with http:// or https://, got: {}",
                self.print_url
            )));
        }

        if self.ledger_slot.trim().is_empty() {
            return Err(ConfigError::Invalid("ledger_slot must not be empty".into()));
        }

        if self.print_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "print_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TALLY_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.db_path = PathBuf::from(path);
        }

        if let Some(slot) = lookup("TALLY_LEDGER_SLOT") {
            self.ledger_slot = slot;
        }

        if let Some(url) = lookup("TALLY_PRINT_URL") {
            debug!(url = %url, "Overriding print URL from environment");
            self.print_url = url;
        }

        if let Some(dir) = lookup("TALLY_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(secs) = lookup("TALLY_PRINT_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.print_timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric TALLY_PRINT_TIMEOUT_SECS"),
            }
        }
    }

    fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(path) = &args.db {
            self.db_path = path.clone();
        }
        if let Some(slot) = &args.slot {
            self.ledger_slot = slot.clone();
        }
        if let Some(url) = &args.print_url {
            self.print_url = url.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(secs) = args.print_timeout_secs {
            self.print_timeout_secs = secs;
        }
    }

    /// Print server URL without a trailing slash.
    pub fn print_base_url(&self) -> &str {
        self.print_url.trim_end_matches('/')
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tally", "counter")
}

/// Returns the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// `tally.db` in the platform data dir, or the working directory.
fn default_db_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("tally.db"))
        .unwrap_or_else(|| PathBuf::from("tally.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CounterConfig::from_sources(None, env(&[]), &CliArgs::default()).unwrap();
        assert_eq!(config.ledger_slot, "day_ledger");
        assert_eq!(config.print_url, "http://127.0.0.1:3000");
        assert_eq!(config.print_timeout_secs, 10);
    }

    #[test]
    fn test_file_then_env_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.toml");
        std::fs::write(
            &path,
            "ledger_slot = \"from_file\"\nprint_url = \"http://file:3000\"\nprint_timeout_secs = 3\n",
        )
        .unwrap();

        let config = CounterConfig::from_sources(Some(&path), env(&[]), &CliArgs::default()).unwrap();
        assert_eq!(config.ledger_slot, "from_file");
        assert_eq!(config.print_timeout_secs, 3);
        assert_eq!(config.output_dir, PathBuf::from("documents"));

        let lookup = env(&[
            ("TALLY_LEDGER_SLOT", "from_env"),
            ("TALLY_PRINT_URL", "https://env:3000/"),
        ]);
        let config = CounterConfig::from_sources(Some(&path), &lookup, &CliArgs::default()).unwrap();
        assert_eq!(config.ledger_slot, "from_env");
        assert_eq!(config.print_base_url(), "https://env:3000");

        let args = CliArgs {
            slot: Some("from_flag".into()),
            ..CliArgs::default()
        };
        let config = CounterConfig::from_sources(Some(&path), &lookup, &args).unwrap();
        assert_eq!(config.ledger_slot, "from_flag");
        assert_eq!(config.print_url, "https://env:3000/");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = CounterConfig::from_sources(Some(&path), env(&[]), &CliArgs::default()).unwrap();
        assert_eq!(config.ledger_slot, "day_ledger");
    }

    #[test]
    fn test_validation() {
        let bad_url = env(&[("TALLY_PRINT_URL", "ftp://host")]);
        assert!(matches!(
            CounterConfig::from_sources(None, bad_url, &CliArgs::default()),
            Err(ConfigError::Invalid(_))
        ));

        let blank_slot = CliArgs {
            slot: Some("  ".into()),
            ..CliArgs::default()
        };
        assert!(CounterConfig::from_sources(None, env(&[]), &blank_slot).is_err());

        let zero = env(&[("TALLY_PRINT_TIMEOUT_SECS", "0")]);
        assert!(CounterConfig::from_sources(None, zero, &CliArgs::default()).is_err());

        let junk = env(&[("TALLY_PRINT_TIMEOUT_SECS", "soon")]);
        let config = CounterConfig::from_sources(None, junk, &CliArgs::default()).unwrap();
        assert_eq!(config.print_timeout_secs, 10);
    }

    #[test]
    fn test_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.toml");
        std::fs::write(&path, "print_timeout_secs = \"ten\"").unwrap();
        assert!(matches!(
            CounterConfig::from_sources(Some(&path), env(&[]), &CliArgs::default()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("counter.toml");
        let config = CounterConfig {
            ledger_slot: "register_2".into(),
            print_timeout_secs: 4,
            ..CounterConfig::default()
        };

        assert_eq!(config.save(Some(&path)).unwrap(), path);
        let reloaded = CounterConfig::from_sources(Some(&path), env(&[]), &CliArgs::default()).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_cli_flags_parse() {
        let args = CliArgs::try_parse_from([
            "counter",
            "--slot",
            "x",
            "--print-timeout-secs",
            "7",
            "--save-config",
        ])
        .unwrap();
        assert_eq!(args.slot.as_deref(), Some("x"));
        assert_eq!(args.print_timeout_secs, Some(7));
        assert!(args.save_config);
    }
}
