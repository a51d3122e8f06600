//! Error types for plaint-cli

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Plaint(#[from] plaint::PlaintError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<plaint::DatasetError> for CliError {
    fn from(e: plaint::DatasetError) -> Self {
        CliError::Plaint(e.into())
    }
}

impl From<plaint::ModelError> for CliError {
    fn from(e: plaint::ModelError) -> Self {
        CliError::Plaint(e.into())
    }
}
