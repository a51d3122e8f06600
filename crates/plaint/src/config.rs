use crate::triage::TriageConfig;
use plaint_core::PipelineOptions;
use serde::{Deserialize, Serialize};

/// Plaint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaintConfig {
    /// Base directory for all storage
    pub base_dir: String,

    /// Model directory, relative to `base_dir`
    pub model_dir: String,

    /// CSV column layout
    pub dataset: DatasetConfig,

    /// Vectorizer and classifier settings used for training
    pub training: PipelineOptions,

    /// Urgency keywords and department routing
    pub triage: TriageConfig,
}

impl Default for PlaintConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            model_dir: "model".to_string(),
            dataset: DatasetConfig::default(),
            training: PipelineOptions::default(),
            triage: TriageConfig::default(),
        }
    }
}

impl PlaintConfig {
    /// Load from configuration file
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }
}

/// Dataset column configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Column holding the complaint text
    pub text_column: String,

    /// Column holding the category label
    pub label_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            text_column: "text".to_string(),
            label_column: "category".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PlaintConfig =
            serde_json::from_str(r#"{"model_dir": "models/v2", "training": {"alpha": 0.5}}"#)
                .unwrap();

        assert_eq!(config.model_dir, "models/v2");
        assert_eq!(config.base_dir, ".");
        assert_eq!(config.training.alpha, 0.5);
        assert!(config.training.tfidf.stop_words);
        assert_eq!(config.dataset.label_column, "category");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plaint.json");
        std::fs::write(&path, r#"{"dataset": {"text_column": "description"}}"#).unwrap();

        let config = PlaintConfig::load_from_file(&path).unwrap();
        assert_eq!(config.dataset.text_column, "description");
        assert_eq!(config.dataset.label_column, "category");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = PlaintConfig::load_from_file(std::path::Path::new("/nonexistent/plaint.json"));
        assert!(result.is_err());
    }
}
