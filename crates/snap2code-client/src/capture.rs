//! Where screenshots come from.
//!
//! Hosts expose capture through callbacks or events; [`ScreenCapture`] hides
//! that behind a single async call returning a data URI.

use std::path::PathBuf;

use async_trait::async_trait;
use snap2code_core::codec;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::CaptureError;

#[async_trait]
pub trait ScreenCapture: Send + Sync {
    /// Capture the visible area and return it as a data URI.
    async fn capture_visible_tab(&self) -> Result<String, CaptureError>;
}

/// Reads an image file from disk; the MIME type is sniffed from its bytes.
#[derive(Debug, Clone)]
pub struct FileCapture {
    path: PathBuf,
}

impl FileCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ScreenCapture for FileCapture {
    async fn capture_visible_tab(&self) -> Result<String, CaptureError> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), len = bytes.len(), "image loaded");
        Ok(codec::encode_sniffed(&bytes)?)
    }
}

/// Completion handed to a callback-style host.
pub type CaptureCallback = Box<dyn FnOnce(Result<String, String>) + Send + 'static>;

/// Adapts a callback-based host capture API (`captureVisibleTab(cb)`) into a
/// future.
pub struct CallbackCapture<F> {
    host: F,
}

impl<F> CallbackCapture<F>
where
    F: Fn(CaptureCallback) + Send + Sync,
{
    pub fn new(host: F) -> Self {
        Self { host }
    }
}

#[async_trait]
impl<F> ScreenCapture for CallbackCapture<F>
where
    F: Fn(CaptureCallback) + Send + Sync,
{
    async fn capture_visible_tab(&self) -> Result<String, CaptureError> {
        let (tx, rx) = oneshot::channel();
        (self.host)(Box::new(move |result| {
            let _ = tx.send(result);
        }));

        rx.await
            .map_err(|_| CaptureError::Unavailable("host dropped the capture callback".into()))?
            .map_err(CaptureError::Host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEAD: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R',
    ];

    #[tokio::test]
    async fn file_capture_encodes_png() {
        let path = std::env::temp_dir().join(format!("snap2code-capture-{}.png", std::process::id()));
        tokio::fs::write(&path, PNG_HEAD).await.unwrap();

        let uri = FileCapture::new(&path).capture_visible_tab().await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        let parsed = codec::decode(&uri).unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.bytes().unwrap(), PNG_HEAD);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = FileCapture::new("/definitely/not/here.png")
            .capture_visible_tab()
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::Io(_)));
    }

    #[tokio::test]
    async fn callback_host_is_awaited() {
        let capture = CallbackCapture::new(|done: CaptureCallback| {
            std::thread::spawn(move || done(Ok("data:image/png;base64,aGk=".into())));
        });
        assert_eq!(
            capture.capture_visible_tab().await.unwrap(),
            "data:image/png;base64,aGk="
        );
    }

    #[tokio::test]
    async fn callback_host_errors_are_surfaced() {
        let capture = CallbackCapture::new(|done: CaptureCallback| {
            done(Err("Cannot access contents of the page".into()))
        });
        let err = capture.capture_visible_tab().await.unwrap_err();
        assert!(matches!(err, CaptureError::Host(ref m) if m.contains("Cannot access")));
    }

    #[tokio::test]
    async fn dropped_callback_is_unavailable() {
        let capture = CallbackCapture::new(|done: CaptureCallback| drop(done));
        assert!(matches!(
            capture.capture_visible_tab().await,
            Err(CaptureError::Unavailable(_))
        ));
    }
}
