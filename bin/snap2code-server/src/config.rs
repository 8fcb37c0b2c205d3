//! Server configuration, loaded from environment variables at startup.

use std::fmt;
use std::time::Duration;

use snap2code_core::GatewayConfig;
use snap2code_core::gateway::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Default request body limit: screenshots arrive base64-encoded inside JSON.
pub const DEFAULT_BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Runtime configuration for snap2code-server.
///
/// Every field except the API key has a default, so the server starts without
/// any environment set; generate calls then fail until `GEMINI_API_KEY` is
/// provided.
#[derive(Clone)]
pub struct Config {
    /// Host part of the listen address (default: `"0.0.0.0"`).
    pub host: String,

    /// Listen port (default: `3000`).
    pub port: u16,

    /// Gemini API credential.
    pub api_key: Option<String>,

    /// Gemini model identifier.
    pub model: String,

    /// Gemini REST base URL; overridden in tests and behind proxies.
    pub gemini_base_url: String,

    /// Upper bound on one generation call.
    pub timeout: Duration,

    /// Retry a transient generation failure once.
    pub retry_transient: bool,

    /// Maximum accepted request body in bytes.
    pub body_limit: usize,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS allow-list; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    pub enable_docs: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        Self {
            host: or("SNAP2CODE_HOST", "0.0.0.0"),
            port: parse(get("PORT"), 3000),
            api_key: get("GEMINI_API_KEY"),
            model: or("SNAP2CODE_MODEL", DEFAULT_MODEL),
            gemini_base_url: or("SNAP2CODE_GEMINI_BASE_URL", DEFAULT_BASE_URL),
            timeout: Duration::from_secs(parse(get("SNAP2CODE_TIMEOUT_SECS"), 120)),
            retry_transient: flag(get("SNAP2CODE_RETRY_TRANSIENT"), false),
            body_limit: parse(get("SNAP2CODE_BODY_LIMIT"), DEFAULT_BODY_LIMIT),
            log_level: or("SNAP2CODE_LOG", "info"),
            log_json: flag(get("SNAP2CODE_LOG_JSON"), false),
            cors_allowed_origins: get("SNAP2CODE_CORS_ORIGINS"),
            enable_docs: flag(get("SNAP2CODE_ENABLE_DOCS"), true),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings handed to the Gemini gateway.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(self.api_key.clone())
            .with_model(self.model.clone())
            .with_base_url(self.gemini_base_url.clone())
            .with_timeout(self.timeout)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("timeout", &self.timeout)
            .field("retry_transient", &self.retry_transient)
            .field("body_limit", &self.body_limit)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("enable_docs", &self.enable_docs)
            .finish()
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn flag(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => default,
    }
}
