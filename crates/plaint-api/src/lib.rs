use axum::Router;
use axum::http::HeaderValue;
use plaint::ClassifierService;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod routes;

pub use config::{ApiConfig, ConfigOverrides, CorsConfig};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<ClassifierService>,
    pub cors: CorsConfig,
    pub enable_swagger: bool,
}

impl AppState {
    pub fn new(classifier: ClassifierService, config: &ApiConfig) -> Self {
        Self {
            classifier: Arc::new(classifier),
            cors: config.cors.clone(),
            enable_swagger: config.enable_swagger,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::predict::predict,
        crate::routes::v1::classify::classify,
        crate::routes::v1::model::model_info,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::predict::PredictRequest,
            crate::routes::predict::PredictResponse,
            crate::routes::v1::classify::ClassifyRequest,
            crate::routes::v1::classify::ClassificationDto,
            crate::routes::v1::classify::ClassScoreDto,
            crate::routes::v1::model::ModelInfoDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "predict", description = "Complaint classification endpoints"),
        (name = "model", description = "Loaded model information")
    )
)]
pub struct ApiDoc;

/// Credentialed CORS; the browser's requested methods and headers are echoed
/// since wildcards cannot be combined with credentials
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    if config.allow_any_origin {
        return layer.allow_origin(AllowOrigin::mirror_request());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Build API application
pub fn build_app(state: AppState) -> Router {
    let mut router = Router::new().merge(routes::routes());
    if state.enable_swagger {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(cors_layer(&state.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
