//! Error types for plaint-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Empty dataset: at least one document is required")]
    EmptyDataset,

    #[error("Empty vocabulary; the documents may only contain stop words")]
    EmptyVocabulary,

    #[error("Length mismatch: {documents} documents but {labels} labels")]
    LengthMismatch { documents: usize, labels: usize },

    #[error("Feature width mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Inconsistent model: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
