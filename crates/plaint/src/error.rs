//! Error types for plaint crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaintError {
    #[error("Core error: {0}")]
    Core(#[from] plaint_core::CoreError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] crate::dataset::DatasetError),

    #[error("Model error: {0}")]
    Model(#[from] crate::model::ModelError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

pub type Result<T> = std::result::Result<T, PlaintError>;
