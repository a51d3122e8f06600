use plaint_core::{ClassScore, Prediction, TextClassifier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ModelMetadata, ModelStore, Result};
use crate::training::TrainedModel;
use crate::triage::{Triage, Urgency};

/// Full triage result for one complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
    pub department: String,
    pub urgency: Option<Urgency>,
    /// Most probable first
    pub scores: Vec<ClassScore>,
}

/// Service answering classification requests against a loaded model
#[derive(Clone)]
pub struct ClassifierService {
    classifier: Arc<dyn TextClassifier>,
    metadata: ModelMetadata,
    triage: Triage,
}

impl ClassifierService {
    /// Create a service from an in-memory model
    pub fn new(model: TrainedModel, triage: Triage) -> Self {
        Self {
            classifier: Arc::new(model.pipeline),
            metadata: model.metadata,
            triage,
        }
    }

    /// Load the model from a store
    pub async fn load(store: &ModelStore, triage: Triage) -> Result<Self> {
        let model = store.load().await?;
        Ok(Self::new(model, triage))
    }

    /// Most likely category
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        Ok(self.classifier.predict(text)?)
    }

    /// Category, department, urgency and the `top_k` best scores
    pub fn classify(&self, text: &str, top_k: Option<usize>) -> Result<Classification> {
        let mut scores = self.classifier.predict_proba(text)?;
        let prediction = self.classifier.predict(text)?;
        if let Some(k) = top_k {
            scores.truncate(k);
        }

        tracing::debug!(
            category = %prediction.category,
            confidence = prediction.confidence,
            "Classified complaint"
        );

        Ok(Classification {
            department: self.triage.department_for(&prediction.category).to_string(),
            urgency: self.triage.detect_urgency(text),
            category: prediction.category,
            confidence: prediction.confidence,
            scores,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }
}
