//! Client shell state machine.
//!
//! ```text
//! Input --attach/capture--> Input
//! Input --generate (image present)--> Loading
//! Loading --success--> Output
//! Loading --failure--> Input (error set)
//! Output --back--> Input (code and error cleared)
//! ```
//!
//! Only one generation can be outstanding: `begin_generate` refuses to leave
//! any state other than `Input`.

use snap2code_core::stack;
use snap2code_types::GenerateBody;
use tracing::{debug, warn};

use crate::api::GenerateApi;
use crate::capture::ScreenCapture;
use crate::error::{CaptureError, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Input,
    Loading,
    Output,
}

#[derive(Debug, Clone)]
pub struct Shell {
    state: ShellState,
    image_data_url: Option<String>,
    technology: String,
    generated_code: Option<String>,
    error: Option<String>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self {
            state: ShellState::Input,
            image_data_url: None,
            technology: stack::DEFAULT_TECHNOLOGY.to_owned(),
            generated_code: None,
            error: None,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn image_data_url(&self) -> Option<&str> {
        self.image_data_url.as_deref()
    }

    pub fn technology(&self) -> &str {
        &self.technology
    }

    pub fn generated_code(&self) -> Option<&str> {
        self.generated_code.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Attach an uploaded image. Only honoured in `Input`.
    pub fn attach_image(&mut self, data_url: impl Into<String>) -> bool {
        if self.state != ShellState::Input {
            return false;
        }
        self.image_data_url = Some(data_url.into());
        self.error = None;
        true
    }

    /// Capture a screenshot through `capture` and attach it.
    ///
    /// A failed capture leaves the shell in `Input` with the error recorded.
    pub async fn capture<C>(&mut self, capture: &C) -> Result<(), CaptureError>
    where
        C: ScreenCapture + ?Sized,
    {
        if self.state != ShellState::Input {
            return Ok(());
        }
        match capture.capture_visible_tab().await {
            Ok(data_url) => {
                self.attach_image(data_url);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "screenshot capture failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Change the target technology. Only honoured in `Input`.
    pub fn select_technology(&mut self, technology: &str) -> bool {
        if self.state != ShellState::Input {
            return false;
        }
        self.technology = stack::resolve(Some(technology));
        true
    }

    /// Enter `Loading` and return the body to post.
    ///
    /// Returns `None` without changing anything when no image is attached or a
    /// generation is already outstanding.
    pub fn begin_generate(&mut self) -> Option<GenerateBody> {
        if self.state != ShellState::Input {
            return None;
        }
        let image = self.image_data_url.clone()?;

        self.state = ShellState::Loading;
        self.error = None;
        debug!(technology = %self.technology, "generation started");

        Some(GenerateBody {
            base64_buffer: Some(image),
            language: Some(self.technology.clone()),
        })
    }

    /// Leave `Loading` with the server's answer.
    pub fn complete(&mut self, result: Result<String, ClientError>) {
        if self.state != ShellState::Loading {
            return;
        }
        match result {
            Ok(code) => {
                self.generated_code = Some(code);
                self.state = ShellState::Output;
            }
            Err(e) => {
                warn!(error = %e, "generation failed");
                self.error = Some(e.to_string());
                self.state = ShellState::Input;
            }
        }
    }

    /// Run one full generation against `api`. Returns `false` if nothing was
    /// sent.
    pub async fn generate<A>(&mut self, api: &A) -> bool
    where
        A: GenerateApi + ?Sized,
    {
        let Some(body) = self.begin_generate() else {
            return false;
        };
        let result = api.generate(&body).await;
        self.complete(result);
        true
    }

    /// Return from `Output` to `Input`, dropping the generated code and error.
    pub fn back(&mut self) {
        if self.state != ShellState::Output {
            return;
        }
        self.generated_code = None;
        self.error = None;
        self.state = ShellState::Input;
    }
}
