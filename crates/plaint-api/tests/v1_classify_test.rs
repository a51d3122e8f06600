use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use plaint::config::DatasetConfig;
use plaint::{ClassifierService, Dataset, PipelineOptions, Triage, train};
use plaint_api::{ApiConfig, AppState, build_app};
use serde_json::{Value, json};
use tower::util::ServiceExt;

const TRAINING_CSV: &str = "text,category\n\
    water pipe burst near the school,Water\n\
    no water supply since morning,Water\n\
    sewage water leaking on road,Water\n\
    power outage in the whole block,Electricity\n\
    street light not working,Electricity\n\
    transformer sparks and power cut,Electricity\n\
    garbage not collected for days,Sanitation\n\
    trash dump smells terrible,Sanitation\n";

/// Create a test application backed by a model trained in memory
fn create_test_app() -> axum::Router {
    let dataset = Dataset::from_csv(TRAINING_CSV.as_bytes(), &DatasetConfig::default()).unwrap();
    let model = train(&dataset, &PipelineOptions::default()).unwrap();
    let classifier = ClassifierService::new(model, Triage::default());
    let state = AppState::new(classifier, &ApiConfig::default());
    build_app(state)
}

/// Helper function to make JSON requests
async fn json_request(
    app: &mut axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request_builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    let request = if let Some(body) = body {
        request_builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body: Value = if body_bytes.is_empty() {
        json!(null)
    } else {
        // Try to parse as JSON, if it fails, treat as string
        serde_json::from_slice(&body_bytes)
            .unwrap_or_else(|_| json!(String::from_utf8_lossy(&body_bytes).to_string()))
    };

    (status, body)
}

#[tokio::test]
async fn test_classify_full_response() {
    let mut app = create_test_app();

    let (status, body) = json_request(
        &mut app,
        "POST",
        "/api/v1/classify",
        Some(json!({ "text": "Water pipe burst, flooding the road" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "Water");
    assert_eq!(body["department"], "Water Authority");
    assert_eq!(body["urgency"], "High");

    let scores = body["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 3);
    assert_eq!(scores[0]["category"], "Water");
    assert_eq!(scores[0]["probability"], body["confidence"]);

    let total: f64 = scores
        .iter()
        .map(|s| s["probability"].as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_classify_top_k_and_medium_urgency() {
    let mut app = create_test_app();

    let (status, body) = json_request(
        &mut app,
        "POST",
        "/api/v1/classify",
        Some(json!({ "text": "garbage pile with a bad smell", "top_k": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "Sanitation");
    assert_eq!(body["department"], "Health Dept");
    assert_eq!(body["urgency"], "Medium");
    assert_eq!(body["scores"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_classify_without_urgency_keywords() {
    let mut app = create_test_app();

    let (status, body) = json_request(
        &mut app,
        "POST",
        "/api/v1/classify",
        Some(json!({ "text": "street light not working" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "Electricity");
    assert_eq!(body["department"], "Power Dept");
    assert!(body["urgency"].is_null());
}

#[tokio::test]
async fn test_classify_zero_top_k_is_bad_request() {
    let mut app = create_test_app();

    let (status, body) = json_request(
        &mut app,
        "POST",
        "/api/v1/classify",
        Some(json!({ "text": "water leak", "top_k": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "top_k must be at least 1");
}

#[tokio::test]
async fn test_model_info() {
    let mut app = create_test_app();

    let (status, body) = json_request(&mut app, "GET", "/api/v1/model", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sample_count"], 8);
    assert_eq!(body["vocabulary_size"], 26);
    assert_eq!(
        body["classes"],
        json!(["Electricity", "Sanitation", "Water"])
    );
    assert_eq!(body["class_counts"]["Water"], 3);
    assert_eq!(body["alpha"], 1.0);
    assert_eq!(body["stop_words"], true);
    assert!(body["id"].is_string());
    assert_eq!(body["dataset_hash"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let mut app = create_test_app();

    let (status, body) = json_request(&mut app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/predict"].is_object());
    assert!(body["paths"]["/api/v1/classify"].is_object());
    assert!(body["paths"]["/api/v1/model"].is_object());
}
