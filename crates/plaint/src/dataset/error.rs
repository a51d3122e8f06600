use thiserror::Error;

/// Dataset related errors
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Dataset has no rows")]
    Empty,

    #[error("Invalid split: {0}")]
    InvalidSplit(String),
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
