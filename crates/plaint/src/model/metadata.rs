use plaint_core::PipelineOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// NewType pattern for model ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(String);

impl ModelId {
    /// Create a new ModelId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Facts about a trained model, persisted as `meta.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub id: ModelId,
    /// RFC 3339 training timestamp
    pub trained_at: String,
    /// SHA-256 of the training data
    pub dataset_hash: String,
    pub sample_count: usize,
    pub vocabulary_size: usize,
    /// Sorted category labels
    pub classes: Vec<String>,
    pub class_counts: BTreeMap<String, usize>,
    pub options: PipelineOptions,
}
