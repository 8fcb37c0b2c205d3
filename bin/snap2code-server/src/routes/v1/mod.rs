pub mod generate;

use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;

use crate::routes::health;
use crate::state::AppState;

/// Routes nested under `/api/v1`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(generate::router())
}

pub fn api_docs() -> utoipa::openapi::OpenApi {
    generate::GenerateApi::openapi()
}
