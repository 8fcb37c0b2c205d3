//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (trace-ID span, CORS, panic catcher, body limit)
//! - `/api/v1` routes (health, generate)
//! - Optional OpenAPI document (disable with `SNAP2CODE_ENABLE_DOCS=false`)

pub mod doc;
mod health;
mod v1;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Uri;
use axum::routing::get;
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::{self, ServerError};
use crate::middleware::{cors, trace};
use crate::state::AppState;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new().nest("/api/v1", v1::router());

    if state.config.enable_docs {
        app = app.route("/api-docs/openapi.json", get(doc::openapi_json));
    }

    with_middleware(app, state)
}

/// Attach the fallback, the middleware stack and the shared state to `app`.
fn with_middleware(app: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    app.fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.body_limit))
        // Outermost layers execute first on the way in.
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(trace::trace_middleware))
                .layer(cors::cors_layer(&state.config))
                .layer(CatchPanicLayer::custom(error::panic_response)),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_owned())
}
