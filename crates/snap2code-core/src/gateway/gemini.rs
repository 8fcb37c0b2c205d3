//! Gemini `generateContent` client.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{CodeGenerator, GatewayConfig, GenerationRequest, GenerationResult};
use crate::error::GenerationError;
use crate::prompt;

/// Production [`CodeGenerator`] backed by the Gemini REST API.
#[derive(Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GeminiGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.filter(|k| !k.is_empty()),
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            timeout: config.timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn map_transport(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Network(e)
        }
    }

    fn parse_error(status: u16, body: &str) -> GenerationError {
        let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_owned());

        match status {
            401 | 403 => GenerationError::Auth(message),
            429 => GenerationError::RateLimited(message),
            400 if message.contains("API key") => GenerationError::Auth(message),
            _ => GenerationError::Api { status, message },
        }
    }
}

#[async_trait]
impl CodeGenerator for GeminiGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Auth("GEMINI_API_KEY is not set".into()))?;

        let start = Instant::now();
        debug!(
            model = %self.model,
            mime_type = %request.mime_type,
            payload_len = request.image_data.len(),
            technology = %request.technology,
            "sending generateContent request"
        );

        let body = GeminiRequest::from_generation_request(request);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = Self::parse_error(status.as_u16(), &text);
            warn!(status = status.as_u16(), error = %err, "generation service rejected request");
            return Err(err);
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                GenerationError::UnexpectedResponse(e.to_string())
            } else {
                self.map_transport(e)
            }
        })?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            warn!(block_reason = %reason, "prompt blocked by generation service");
        }

        let text = parsed.text();
        info!(
            model = %self.model,
            latency_ms = start.elapsed().as_millis() as u64,
            output_len = text.as_ref().map_or(0, String::len),
            "generation done"
        );

        Ok(GenerationResult { text })
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

/// A request part: inline image data or text.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

impl GeminiRequest {
    fn from_generation_request(req: &GenerationRequest) -> Self {
        let parts = vec![
            GeminiRequestPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: req.mime_type.clone(),
                    data: req.image_data.clone(),
                },
            },
            GeminiRequestPart::Text {
                text: prompt::render(&req.technology),
            },
        ];

        Self {
            contents: vec![GeminiContent { parts }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    #[derive(Default)]
    struct Captured {
        action: Option<String>,
        api_key: Option<String>,
        body: Option<Value>,
    }

    type Shared = Arc<Mutex<Captured>>;

    /// Serve `reply` for every generateContent call and record what arrived.
    async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Shared) {
        let captured: Shared = Arc::default();

        let app = Router::new()
            .route(
                "/models/{action}",
                post(
                    move |State(shared): State<Shared>,
                          Path(action): Path<String>,
                          headers: HeaderMap,
                          Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            {
                                let mut c = shared.lock().unwrap();
                                c.action = Some(action);
                                c.api_key = headers
                                    .get("x-goog-api-key")
                                    .and_then(|v| v.to_str().ok())
                                    .map(str::to_owned);
                                c.body = Some(body);
                            }
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), captured)
    }

    fn gateway(base_url: &str, api_key: Option<&str>) -> GeminiGateway {
        GeminiGateway::new(
            GatewayConfig::new(api_key.map(str::to_owned)).with_base_url(base_url),
        )
        .unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            mime_type: "image/png".into(),
            image_data: "aGk=".into(),
            technology: "Vue".into(),
        }
    }

    fn text_reply(parts: Value) -> Value {
        json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] })
    }

    #[tokio::test]
    async fn sends_image_and_prompt_parts() {
        let (url, captured) =
            spawn_stub(StatusCode::OK, text_reply(json!([{ "text": "<template>Hi</template>" }])))
                .await;

        let result = gateway(&url, Some("test-key")).generate(&request()).await.unwrap();
        assert_eq!(result.text.as_deref(), Some("<template>Hi</template>"));

        let c = captured.lock().unwrap();
        assert_eq!(c.action.as_deref(), Some("gemini-2.5-flash:generateContent"));
        assert_eq!(c.api_key.as_deref(), Some("test-key"));

        let parts = &c.body.as_ref().unwrap()["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "aGk=");
        assert_eq!(parts[1]["text"], prompt::render("Vue"));
    }

    #[tokio::test]
    async fn concatenates_text_parts() {
        let (url, _) = spawn_stub(
            StatusCode::OK,
            text_reply(json!([{ "text": "<div>" }, { "text": "</div>" }])),
        )
        .await;

        let result = gateway(&url, Some("k")).generate(&request()).await.unwrap();
        assert_eq!(result.text.as_deref(), Some("<div></div>"));
    }

    #[tokio::test]
    async fn blocked_prompt_yields_no_text() {
        let (url, _) = spawn_stub(
            StatusCode::OK,
            json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
        )
        .await;

        let result = gateway(&url, Some("k")).generate(&request()).await.unwrap();
        assert_eq!(result.text, None);
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_service() {
        let (url, captured) = spawn_stub(StatusCode::OK, text_reply(json!([]))).await;

        let err = gateway(&url, None).generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Auth(_)));
        assert!(captured.lock().unwrap().body.is_none());
    }

    #[tokio::test]
    async fn service_errors_carry_message() {
        let (url, _) = spawn_stub(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED" } }),
        )
        .await;

        let err = gateway(&url, Some("k")).generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::RateLimited(ref m) if m == "Resource exhausted"));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn invalid_key_is_an_auth_error() {
        let (url, _) = spawn_stub(
            StatusCode::BAD_REQUEST,
            json!({ "error": { "code": 400, "message": "API key not valid. Please pass a valid API key." } }),
        )
        .await;

        let err = gateway(&url, Some("bogus")).generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Auth(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        // Port 9 (discard) on localhost is not served by anything in tests.
        let err = gateway("http://127.0.0.1:9", Some("k"))
            .generate(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Network(_)));
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let app = Router::new().route(
            "/models/{action}",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(text_reply(json!([{ "text": "too late" }])))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let gateway = GeminiGateway::new(
            GatewayConfig::new(Some("k".into()))
                .with_base_url(format!("http://{addr}"))
                .with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = gateway.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(d) if d == Duration::from_millis(200)));
        assert!(err.is_retryable());
    }

    #[test]
    fn non_json_error_body_is_kept_verbatim() {
        let err = GeminiGateway::parse_error(502, " bad gateway \n");
        assert!(matches!(err, GenerationError::Api { status: 502, ref message } if message == "bad gateway"));
    }
}
