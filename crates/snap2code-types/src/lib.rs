//! Request / response types of the snap2code HTTP API.
//!
//! Field names follow the JSON contract the browser clients already speak
//! (`base64Buffer`, `language`), so both the server and the Rust client share
//! one definition.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ── Generate ─────────────────────────────────────────────────────────────────

/// Request body for `POST /api/v1/generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    /// The screenshot as a data URI (`data:image/png;base64,...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_buffer: Option<String>,
    /// Target technology label or catalog id, e.g. `"Vue"` or `"react-tailwind"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Success body for `POST /api/v1/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    /// Always `true`.
    pub success: bool,
    pub message: String,
    /// Generated source, relayed as returned by the model.
    pub code: String,
}

impl GenerateResponse {
    pub fn ok(code: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Code generated successfully".to_owned(),
            code: code.into(),
        }
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable reason.
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ── Health ───────────────────────────────────────────────────────────────────

/// Body of `GET /api/v1/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub const HEALTHY: &'static str = "API is healthy";

    pub fn healthy() -> Self {
        Self {
            status: Self::HEALTHY.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_body_uses_camel_case_keys() {
        let body = GenerateBody {
            base64_buffer: Some("data:image/png;base64,AAAA".into()),
            language: Some("Vue".into()),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["base64Buffer"], "data:image/png;base64,AAAA");
        assert_eq!(value["language"], "Vue");
    }

    #[test]
    fn generate_body_fields_are_optional() {
        let body: GenerateBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.base64_buffer.is_none());
        assert!(body.language.is_none());
    }

    #[test]
    fn error_body_is_unsuccessful() {
        let value = serde_json::to_value(ErrorBody::new("boom")).unwrap();
        assert_eq!(value, json!({ "success": false, "message": "boom" }));
    }
}
