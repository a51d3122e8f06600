//! Plaint CLI library

pub mod commands;
pub mod error;

use plaint::PlaintConfig;
use std::path::Path;

/// Load the config file when given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<PlaintConfig, error::CliError> {
    match path {
        Some(path) => PlaintConfig::load_from_file(path)
            .map_err(|e| error::CliError::InvalidInput(e.to_string())),
        None => Ok(PlaintConfig::default()),
    }
}
