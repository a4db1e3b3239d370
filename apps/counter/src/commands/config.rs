//! # Config Commands

use std::path::PathBuf;

use crate::config::CounterConfig;
use crate::error::ApiError;
use crate::state::ConfigState;

pub fn get_config(config: &ConfigState) -> CounterConfig {
    config.config().clone()
}

pub fn save_config(config: &ConfigState) -> Result<PathBuf, ApiError> {
    config.save().map_err(|e| ApiError::internal(e.to_string()))
}
