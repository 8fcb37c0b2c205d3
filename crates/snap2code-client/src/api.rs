//! HTTP client for `POST /api/v1/generate`.

use std::time::Duration;

use async_trait::async_trait;
use snap2code_types::{ErrorBody, GenerateBody, GenerateResponse};
use tracing::debug;

use crate::error::ClientError;

/// Something that can turn a generate body into code.
#[async_trait]
pub trait GenerateApi: Send + Sync {
    async fn generate(&self, body: &GenerateBody) -> Result<String, ClientError>;
}

/// [`GenerateApi`] backed by a snap2code server.
#[derive(Debug, Clone)]
pub struct HttpGenerateApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerateApi {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/v1/generate", self.base_url)
    }
}

#[async_trait]
impl GenerateApi for HttpGenerateApi {
    async fn generate(&self, body: &GenerateBody) -> Result<String, ClientError> {
        let response = self.client.post(self.endpoint()).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), body_len = bytes.len(), "generate response");

        if status.is_success() {
            let parsed: GenerateResponse = serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            return Ok(parsed.code);
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|e| e.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).trim().to_owned());
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
