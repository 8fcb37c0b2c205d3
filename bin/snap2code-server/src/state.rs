//! Shared application state injected into every Axum handler.

use std::fmt;
use std::sync::Arc;

use snap2code_core::CodeGenerator;

use crate::config::Config;

/// State shared across all HTTP handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Gateway to the generation service.
    pub generator: Arc<dyn CodeGenerator>,
}

impl AppState {
    pub fn new(config: Config, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            generator,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::MockGenerator;

    #[test]
    fn debug_redacts_the_configured_key() {
        let config = Config::from_lookup(|k| (k == "GEMINI_API_KEY").then(|| "AIza-secret".to_owned()));
        let state = AppState::new(config, MockGenerator::ok(""));
        assert!(!format!("{state:?}").contains("AIza-secret"));
    }
}
