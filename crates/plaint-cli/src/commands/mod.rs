//! CLI command handlers

pub mod evaluate;
pub mod info;
pub mod predict;
pub mod train;

pub use evaluate::run_evaluate;
pub use info::run_info;
pub use predict::run_predict;
pub use train::{TrainArgs, run_train};

use plaint::PlaintConfig;
use plaint::storage::LocalStorage;
use plaint::{Dataset, ModelStore};
use std::path::Path;
use std::sync::Arc;

use crate::error::CliError;

/// Model store rooted at the configured base directory
pub(crate) fn model_store(config: &PlaintConfig, model_dir: Option<&str>) -> ModelStore {
    let storage = Arc::new(LocalStorage::from_config(config));
    ModelStore::new(storage, model_dir.unwrap_or(&config.model_dir))
}

/// Read a CSV dataset from the filesystem
pub(crate) async fn read_dataset(path: &Path, config: &PlaintConfig) -> Result<Dataset, CliError> {
    let content = tokio::fs::read(path).await.map_err(|e| {
        CliError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(Dataset::from_csv(&content, &config.dataset)?)
}
