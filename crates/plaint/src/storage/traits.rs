use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StorageResult;

/// Storage trait for abstract file operations
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Read file contents
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Write file contents, creating parent directories
    async fn write(&self, path: &str, content: &[u8]) -> StorageResult<()>;

    /// Create directory
    async fn create_dir(&self, path: &str) -> StorageResult<()>;

    /// Get file metadata (size, modified time)
    async fn metadata(&self, path: &str) -> StorageResult<FileMetadata>;
}

/// File metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub size: u64,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
}
