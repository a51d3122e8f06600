use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use plaint::{ClassScore, Classification};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

/// Request to classify a complaint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    pub text: String,
    /// Limit the number of returned scores
    pub top_k: Option<usize>,
}

/// Probability of one category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassScoreDto {
    pub category: String,
    pub probability: f64,
}

impl From<ClassScore> for ClassScoreDto {
    fn from(score: ClassScore) -> Self {
        Self {
            category: score.category,
            probability: score.probability,
        }
    }
}

/// API representation of a classification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassificationDto {
    pub category: String,
    pub confidence: f64,
    pub department: String,
    /// "High", "Medium" or null
    pub urgency: Option<String>,
    pub scores: Vec<ClassScoreDto>,
}

impl From<Classification> for ClassificationDto {
    fn from(classification: Classification) -> Self {
        Self {
            category: classification.category,
            confidence: classification.confidence,
            department: classification.department,
            urgency: classification.urgency.map(|u| u.to_string()),
            scores: classification
                .scores
                .into_iter()
                .map(ClassScoreDto::from)
                .collect(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/classify", post(classify))
}

/// Classify a complaint with department routing and urgency
#[utoipa::path(
    post,
    path = "/api/v1/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Classification", body = ClassificationDto),
        (status = 400, description = "Invalid top_k")
    ),
    tag = "predict"
)]
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassificationDto>, (StatusCode, &'static str)> {
    if request.top_k == Some(0) {
        return Err((StatusCode::BAD_REQUEST, "top_k must be at least 1"));
    }

    match state.classifier.classify(&request.text, request.top_k) {
        Ok(classification) => Ok(Json(ClassificationDto::from(classification))),
        Err(e) => {
            tracing::error!("Classification failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to classify complaint",
            ))
        }
    }
}
