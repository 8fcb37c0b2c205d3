use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{CodeGenerator, GenerationRequest, GenerationResult};
use crate::error::GenerationError;

/// Wraps a generator with a single extra attempt on transient failures.
///
/// Only errors for which [`GenerationError::is_retryable`] holds are retried;
/// authentication failures surface immediately.
pub struct Retrying<G> {
    inner: G,
    delay: Duration,
}

impl<G: CodeGenerator> Retrying<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            delay: Duration::from_secs(1),
        }
    }

    /// Pause before the second attempt (default 1s).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl<G: CodeGenerator> CodeGenerator for Retrying<G> {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        match self.inner.generate(request).await {
            Err(e) if e.is_retryable() => {
                warn!(error = %e, delay_ms = self.delay.as_millis() as u64, "transient generation failure; retrying once");
                tokio::time::sleep(self.delay).await;
                self.inner.generate(request).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Fails with the produced error for the first `failures` calls.
    struct Flaky {
        calls: AtomicUsize,
        failures: usize,
        error: fn() -> GenerationError,
    }

    #[async_trait]
    impl CodeGenerator for Flaky {
        async fn generate(&self, _: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err((self.error)())
            } else {
                Ok(GenerationResult::text("<div>ok</div>"))
            }
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            mime_type: "image/png".into(),
            image_data: "aGk=".into(),
            technology: "HTML".into(),
        }
    }

    fn retrying(failures: usize, error: fn() -> GenerationError) -> Retrying<Flaky> {
        Retrying::new(Flaky { calls: AtomicUsize::new(0), failures, error }).with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn retries_transient_failure_once() {
        let g = retrying(1, || GenerationError::RateLimited("quota".into()));
        let result = g.generate(&request()).await.unwrap();
        assert_eq!(result.text.as_deref(), Some("<div>ok</div>"));
        assert_eq!(g.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_second_failure() {
        let g = retrying(5, || GenerationError::Timeout(Duration::from_secs(1)));
        assert!(g.generate(&request()).await.is_err());
        assert_eq!(g.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn auth_failure_is_not_retried() {
        let g = retrying(1, || GenerationError::Auth("bad key".into()));
        assert!(matches!(g.generate(&request()).await, Err(GenerationError::Auth(_))));
        assert_eq!(g.inner.calls.load(Ordering::SeqCst), 1);
    }
}
