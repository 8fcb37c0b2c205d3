use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(config.cors_allowed_origins.as_deref()))
        .allow_headers(Any)
        .allow_methods(Any)
}

/// Origins from the comma-separated allow-list. Wildcard when the list is unset
/// or has no usable entry, since the browser extension calls from its own origin.
fn allowed_origins(list: Option<&str>) -> AllowOrigin {
    let origins: Vec<HeaderValue> = list
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}
