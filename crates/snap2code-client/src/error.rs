use snap2code_core::CodecError;
use thiserror::Error;

/// Errors from talking to the snap2code server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, ...).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a failure body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The server answered with something that is not the expected JSON.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),
}

/// Errors from obtaining a screenshot.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The host capability reported a failure.
    #[error("capture failed: {0}")]
    Host(String),

    /// The host never answered.
    #[error("capture unavailable: {0}")]
    Unavailable(String),
}
