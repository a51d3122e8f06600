//! The `/predict` endpoint consumed by the complaint dashboard

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

/// Complaint text to classify
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictRequest {
    pub text: String,
}

/// Predicted category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    pub category: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}

/// Predict the category of a complaint
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Predicted category", body = PredictResponse),
        (status = 422, description = "Request body is missing the text field")
    ),
    tag = "predict"
)]
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    match state.classifier.predict(&request.text) {
        Ok(prediction) => Ok(Json(PredictResponse {
            category: prediction.category,
        })),
        Err(e) => {
            tracing::error!("Prediction failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to predict category".to_string(),
            ))
        }
    }
}
