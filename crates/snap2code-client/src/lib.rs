//! snap2code-client: the capture/upload → generate → display flow.
//!
//! [`shell::Shell`] is the three-state machine every front end drives.
//! [`api`] posts to the snap2code server and [`capture`] abstracts where the
//! screenshot comes from.

pub mod api;
pub mod capture;
pub mod error;
pub mod shell;

pub use api::{GenerateApi, HttpGenerateApi};
pub use capture::{CallbackCapture, FileCapture, ScreenCapture};
pub use error::{CaptureError, ClientError};
pub use shell::{Shell, ShellState};
