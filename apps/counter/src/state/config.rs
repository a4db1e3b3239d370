//! # Configuration State
//!
//! The resolved configuration and the file it came from.
//! Read-only after startup, so no lock.

use std::path::{Path, PathBuf};

use crate::config::{ConfigResult, CounterConfig};

#[derive(Debug, Clone)]
pub struct ConfigState {
    config: CounterConfig,
    source: Option<PathBuf>,
}

impl ConfigState {
    pub fn new(config: CounterConfig, source: Option<PathBuf>) -> Self {
        ConfigState { config, source }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// File the configuration is loaded from and saved to.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Writes the resolved configuration back to its file.
    pub fn save(&self) -> ConfigResult<PathBuf> {
        self.config.save(self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_to_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.toml");
        let state = ConfigState::new(CounterConfig::default(), Some(path.clone()));

        assert_eq!(state.save().unwrap(), path);
        let saved: CounterConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(&saved, state.config());
    }
}
