//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON
//! `{"success": false, "message": ...}` body with the matching status.
//!
//! Generation failures pass the upstream message through to the client.
//! Internal errors and panics are logged in full and answered with a generic
//! message.

use std::any::Any;

use axum::Json;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snap2code_core::{CodecError, GenerationError};
use snap2code_types::ErrorBody;
use thiserror::Error;
use tracing::error;

pub const GENERIC_MESSAGE: &str = "Something went wrong!";

/// All errors that can occur in the snap2code-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or incomplete request.
    #[error("{0}")]
    BadRequest(String),

    /// The screenshot data URI could not be used.
    #[error("invalid base64Buffer: {0}")]
    Codec(#[from] CodecError),

    /// The request body was rejected before reaching the handler.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The generation service failed.
    #[error("{0}")]
    Generation(#[from] GenerationError),

    /// No route matched.
    #[error("not found: {0}")]
    NotFound(String),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        // Oversized bodies keep their 413; every other rejection is a 400.
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ServerError::Rejected { status, message: rejection.body_text() }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Codec(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Rejected { status, message } => (*status, message.clone()),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            ServerError::Generation(e) => {
                error!(error = %e, retryable = e.is_retryable(), "generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_owned())
            }
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

/// `axum::Json` whose rejections render as [`ServerError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// Response for a handler that panicked; used by the catch-panic layer.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    ServerError::Internal(format!("handler panicked: {detail}")).into_response()
}
