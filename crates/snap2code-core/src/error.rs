use std::time::Duration;

use thiserror::Error;

/// Errors produced while parsing or building data URIs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The input is not of the form `data:<mime>;base64,<payload>`.
    #[error("malformed data URI: {0}")]
    MalformedInput(String),

    /// The payload is not valid standard base64.
    #[error("invalid base64 payload: {0}")]
    Base64(String),

    /// The MIME type is not an image type the generation service accepts.
    #[error("unsupported image type: {0}")]
    UnsupportedMimeType(String),

    /// The raw bytes do not start with any known image signature.
    #[error("could not detect image format")]
    UnknownFormat,
}

/// Errors that can occur while asking the generation service for code.
///
/// The HTTP layer reports every variant the same way ("generation failed" with
/// the message attached); the split exists so callers can decide what is worth
/// retrying.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Quota or rate limit exceeded.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The service answered with a non-success status.
    #[error("generation service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The service did not answer within the configured timeout.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered 2xx with a body we could not interpret.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl GenerationError {
    /// Returns `true` if the failure is likely transient.
    ///
    /// Authentication and malformed-response failures are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::Timeout(_) | Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Auth(_) | Self::UnexpectedResponse(_) => false,
        }
    }
}
