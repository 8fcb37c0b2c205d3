//! Screenshot-to-code route.
//!
//! Validates the data URI, resolves the technology label and forwards both to
//! the configured [`snap2code_core::CodeGenerator`]. The generated text is
//! relayed unmodified.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use snap2code_core::GenerationRequest;
use snap2code_core::stack;
use snap2code_types::{ErrorBody, GenerateBody, GenerateResponse};
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::{ApiJson, ServerError};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(generate))]
pub struct GenerateApi;

/// Register the generate route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(generate))
}

/// Generate code from a screenshot (`POST /api/v1/generate`).
///
/// `language` may be a catalog id (`"vue"`) or a free-form label; it defaults
/// to React + Tailwind CSS.
#[utoipa::path(
    post,
    path = "/api/v1/generate",
    tag = "generate",
    request_body = GenerateBody,
    responses(
        (status = 200, description = "Code generated", body = GenerateResponse),
        (status = 400, description = "Missing or malformed base64Buffer", body = ErrorBody),
        (status = 500, description = "Generation service error", body = ErrorBody),
    )
)]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GenerateBody>,
) -> Result<Json<GenerateResponse>, ServerError> {
    let data_uri = body
        .base64_buffer
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("base64Buffer is required".into()))?;

    let technology = stack::resolve(body.language.as_deref());
    let request = GenerationRequest::from_data_uri(data_uri, technology)?;

    debug!(
        mime_type = %request.mime_type,
        payload_len = request.image_data.len(),
        technology = %request.technology,
        "generate request"
    );

    let result = state.generator.generate(&request).await?;
    let code = result.into_text();

    info!(technology = %request.technology, output_len = code.len(), "generate done");

    Ok(Json(GenerateResponse::ok(code)))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
