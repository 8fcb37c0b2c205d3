//! Generation gateway.
//!
//! [`CodeGenerator`] is the seam between the HTTP layer and the hosted model.
//! [`GeminiGateway`] is the production implementation; tests substitute their
//! own. [`Retrying`] optionally wraps any generator with one bounded retry.

mod gemini;
mod retry;

use std::time::Duration;

use async_trait::async_trait;

use crate::codec::{self, DataUri};
use crate::error::{CodecError, GenerationError};

pub use gemini::GeminiGateway;
pub use retry::Retrying;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default upper bound on a single generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// One screenshot-to-code request. Lives for a single HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub mime_type: String,
    /// Base64 image payload, forwarded as-is.
    pub image_data: String,
    /// Technology label substituted into the prompt.
    pub technology: String,
}

impl GenerationRequest {
    /// Build a request from a client-supplied data URI.
    ///
    /// Fails unless the URI is well formed, names a supported image type and
    /// carries a valid base64 payload.
    pub fn from_data_uri(data_uri: &str, technology: impl Into<String>) -> Result<Self, CodecError> {
        let uri: DataUri = codec::decode(data_uri)?;
        uri.ensure_image()?;
        uri.validate()?;

        Ok(Self {
            mime_type: uri.mime_type,
            image_data: uri.payload,
            technology: technology.into(),
        })
    }
}

/// What the model answered. `text` is `None` when the response carried no
/// text part (for example a blocked prompt).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: Option<String>,
}

impl GenerationResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }
}

/// Anything that can turn a [`GenerationRequest`] into code.
#[async_trait]
pub trait CodeGenerator: Send + Sync + 'static {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError>;
}

/// Settings for [`GeminiGateway`], built once at process start.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// `None` is allowed; every call then fails with [`GenerationError::Auth`].
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_valid_data_uri() {
        let req = GenerationRequest::from_data_uri("data:image/png;base64,aGk=", "Vue").unwrap();
        assert_eq!(req.mime_type, "image/png");
        assert_eq!(req.image_data, "aGk=");
        assert_eq!(req.technology, "Vue");
    }

    #[test]
    fn request_rejects_non_image() {
        let err = GenerationRequest::from_data_uri("data:text/html;base64,aGk=", "Vue").unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedMimeType(_)));
    }

    #[test]
    fn request_rejects_bad_payload() {
        let err = GenerationRequest::from_data_uri("data:image/png;base64,%%%", "Vue").unwrap_err();
        assert!(matches!(err, CodecError::Base64(_)));
    }

    #[test]
    fn absent_text_becomes_empty_code() {
        assert_eq!(GenerationResult::default().into_text(), "");
        assert_eq!(GenerationResult::text("<div/>").into_text(), "<div/>");
    }
}
