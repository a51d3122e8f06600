use axum::{Json, Router, extract::State, routing::get};
use plaint::ModelMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::AppState;

/// API representation of the loaded model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfoDto {
    pub id: String,
    pub trained_at: String,
    pub dataset_hash: String,
    pub sample_count: usize,
    pub vocabulary_size: usize,
    pub classes: Vec<String>,
    pub class_counts: BTreeMap<String, usize>,
    pub alpha: f64,
    pub stop_words: bool,
}

impl From<&ModelMetadata> for ModelInfoDto {
    fn from(metadata: &ModelMetadata) -> Self {
        Self {
            id: metadata.id.to_string(),
            trained_at: metadata.trained_at.clone(),
            dataset_hash: metadata.dataset_hash.clone(),
            sample_count: metadata.sample_count,
            vocabulary_size: metadata.vocabulary_size,
            classes: metadata.classes.clone(),
            class_counts: metadata.class_counts.clone(),
            alpha: metadata.options.alpha,
            stop_words: metadata.options.tfidf.stop_words,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/model", get(model_info))
}

/// Describe the model being served
#[utoipa::path(
    get,
    path = "/api/v1/model",
    responses(
        (status = 200, description = "Model details", body = ModelInfoDto)
    ),
    tag = "model"
)]
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoDto> {
    Json(ModelInfoDto::from(state.classifier.metadata()))
}
