use thiserror::Error;

/// Model persistence and inference errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Invalid model artifact {path}: {reason}")]
    InvalidArtifact { path: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Inference error: {0}")]
    Core(#[from] plaint_core::CoreError),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
