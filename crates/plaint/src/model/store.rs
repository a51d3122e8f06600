use plaint_core::{MultinomialNb, Pipeline, TfidfVectorizer};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{ModelError, ModelMetadata, Result};
use crate::storage::{Storage, StorageError};
use crate::training::TrainedModel;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "model.json";
pub const METADATA_FILE: &str = "meta.toml";

/// Reads and writes model artifacts under one directory.
///
/// The vectorizer and the classifier are separate artifacts; `meta.toml`
/// carries provenance and is human readable.
#[derive(Clone)]
pub struct ModelStore {
    storage: Arc<dyn Storage>,
    dir: String,
}

impl ModelStore {
    pub fn new(storage: Arc<dyn Storage>, dir: impl Into<String>) -> Self {
        Self {
            storage,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    fn path(&self, file: &str) -> String {
        format!("{}/{}", self.dir, file)
    }

    fn invalid(&self, file: &str, reason: impl ToString) -> ModelError {
        ModelError::InvalidArtifact {
            path: self.path(file),
            reason: reason.to_string(),
        }
    }

    /// Whether every artifact is present
    pub async fn exists(&self) -> Result<bool> {
        for file in [VECTORIZER_FILE, CLASSIFIER_FILE, METADATA_FILE] {
            if !self.storage.exists(&self.path(file)).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Persist a trained model, overwriting previous artifacts
    pub async fn save(&self, model: &TrainedModel) -> Result<()> {
        self.storage.create_dir(&self.dir).await?;

        let vectorizer = to_json(model.pipeline.vectorizer())?;
        self.storage
            .write(&self.path(VECTORIZER_FILE), &vectorizer)
            .await?;

        let classifier = to_json(model.pipeline.classifier())?;
        self.storage
            .write(&self.path(CLASSIFIER_FILE), &classifier)
            .await?;

        let meta_toml = toml::to_string_pretty(&model.metadata).map_err(|e| {
            ModelError::SerializationError(format!("Failed to serialize model metadata: {}", e))
        })?;
        self.storage
            .write(&self.path(METADATA_FILE), meta_toml.as_bytes())
            .await?;

        tracing::info!(dir = %self.dir, model_id = %model.metadata.id, "Saved model artifacts");
        Ok(())
    }

    /// Load artifacts and check they belong together
    pub async fn load(&self) -> Result<TrainedModel> {
        let vectorizer: TfidfVectorizer = self.read_json(VECTORIZER_FILE).await?;
        vectorizer
            .validate()
            .map_err(|e| self.invalid(VECTORIZER_FILE, e))?;
        let classifier: MultinomialNb = self.read_json(CLASSIFIER_FILE).await?;
        classifier
            .validate()
            .map_err(|e| self.invalid(CLASSIFIER_FILE, e))?;
        let metadata = self.load_metadata().await?;

        let pipeline = Pipeline::new(vectorizer, classifier)?;
        if pipeline.classifier().classes() != metadata.classes.as_slice() {
            return Err(ModelError::InvalidArtifact {
                path: self.path(METADATA_FILE),
                reason: "classes do not match the classifier".to_string(),
            });
        }

        tracing::info!(
            dir = %self.dir,
            model_id = %metadata.id,
            classes = metadata.classes.len(),
            "Loaded model"
        );
        Ok(TrainedModel { pipeline, metadata })
    }

    /// Load only `meta.toml`
    pub async fn load_metadata(&self) -> Result<ModelMetadata> {
        let path = self.path(METADATA_FILE);
        let content = self.read(&path).await?;
        let text = String::from_utf8(content).map_err(|e| ModelError::InvalidArtifact {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ModelError::InvalidArtifact {
            path,
            reason: e.to_string(),
        })
    }

    /// Sizes of each artifact in bytes
    pub async fn artifact_sizes(&self) -> Result<Vec<(&'static str, u64)>> {
        let mut sizes = Vec::new();
        for file in [VECTORIZER_FILE, CLASSIFIER_FILE, METADATA_FILE] {
            let metadata = self.storage.metadata(&self.path(file)).await?;
            sizes.push((file, metadata.size));
        }
        Ok(sizes)
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        match self.storage.read(path).await {
            Ok(content) => Ok(content),
            Err(StorageError::NotFound(p)) => Err(ModelError::NotFound(p)),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        let content = self.read(&path).await?;
        serde_json::from_slice(&content).map_err(|e| ModelError::InvalidArtifact {
            path,
            reason: e.to_string(),
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        ModelError::SerializationError(format!("Failed to serialize model artifact: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use crate::dataset::Dataset;
    use crate::storage::LocalStorage;
    use crate::training::train;
    use plaint_core::{PipelineOptions, TextClassifier};

    fn trained() -> TrainedModel {
        let csv = "text,category\nwater pipe burst,Water\npower outage,Electricity\n";
        let dataset = Dataset::from_csv(csv.as_bytes(), &DatasetConfig::default()).unwrap();
        train(&dataset, &PipelineOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(Arc::new(LocalStorage::new(dir.path())), "model");
        let model = trained();

        assert!(!store.exists().await.unwrap());
        store.save(&model).await.unwrap();
        assert!(store.exists().await.unwrap());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.metadata, model.metadata);
        assert_eq!(
            loaded.pipeline.predict("burst pipe").unwrap().category,
            "Water"
        );
        assert_eq!(store.artifact_sizes().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_model_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(Arc::new(LocalStorage::new(dir.path())), "model");

        let result = store.load().await;
        assert!(matches!(result, Err(ModelError::NotFound(p)) if p == "model/vectorizer.json"));
    }

    #[tokio::test]
    async fn test_corrupt_artifact_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let store = ModelStore::new(storage.clone(), "model");
        store.save(&trained()).await.unwrap();

        storage.write("model/model.json", b"not json").await.unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(ModelError::InvalidArtifact { .. })));
    }

    async fn rewrite_json(
        storage: &LocalStorage,
        path: &str,
        edit: impl FnOnce(&mut serde_json::Value),
    ) {
        let mut json: serde_json::Value =
            serde_json::from_slice(&storage.read(path).await.unwrap()).unwrap();
        edit(&mut json);
        storage
            .write(path, &serde_json::to_vec(&json).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_vocabulary_index_out_of_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let store = ModelStore::new(storage.clone(), "model");
        store.save(&trained()).await.unwrap();

        rewrite_json(&storage, "model/vectorizer.json", |json| {
            json["vocabulary"]["water"] = serde_json::json!(99);
        })
        .await;

        let result = store.load().await;
        assert!(matches!(
            result,
            Err(ModelError::InvalidArtifact { path, .. }) if path == "model/vectorizer.json"
        ));
    }

    #[tokio::test]
    async fn test_ragged_classifier_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let store = ModelStore::new(storage.clone(), "model");
        store.save(&trained()).await.unwrap();

        rewrite_json(&storage, "model/model.json", |json| {
            json["feature_log_prob"][1] = serde_json::json!([-1.0]);
        })
        .await;

        let result = store.load().await;
        assert!(matches!(
            result,
            Err(ModelError::InvalidArtifact { path, .. }) if path == "model/model.json"
        ));
    }

    #[tokio::test]
    async fn test_class_prior_length_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let store = ModelStore::new(storage.clone(), "model");
        store.save(&trained()).await.unwrap();

        rewrite_json(&storage, "model/model.json", |json| {
            json["class_log_prior"] = serde_json::json!([-0.5]);
        })
        .await;

        let result = store.load().await;
        assert!(matches!(result, Err(ModelError::InvalidArtifact { .. })));
    }
}
