use crate::AppState;
use axum::Router;

pub mod classify;
pub mod model;

/// API v1 routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(classify::routes())
        .merge(model::routes())
}
