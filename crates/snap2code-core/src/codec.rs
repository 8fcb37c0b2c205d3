//! Data URI codec.
//!
//! Clients ship screenshots as `data:<mime>;base64,<payload>` strings. The
//! gateway forwards the payload to the model still base64-encoded, so
//! [`decode`] only splits the URI; [`DataUri::bytes`] is there for callers that
//! need the raw image.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeSliceError, Engine as _};

use crate::error::CodecError;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Base64 characters checked per step by [`DataUri::validate`]. Multiple of 4.
const VALIDATE_CHUNK: usize = 4096;

/// Image MIME types accepted by the generation service.
pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/heic",
    "image/heif",
];

/// A parsed data URI. `payload` is still base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub payload: String,
}

impl DataUri {
    /// Decode the payload into raw bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, CodecError> {
        STANDARD
            .decode(self.payload.as_bytes())
            .map_err(|e| CodecError::Base64(e.to_string()))
    }

    /// Check that the payload is valid base64 without keeping the decoded image.
    pub fn validate(&self) -> Result<(), CodecError> {
        let mut scratch = [0u8; VALIDATE_CHUNK / 4 * 3];
        for chunk in self.payload.as_bytes().chunks(VALIDATE_CHUNK) {
            STANDARD
                .decode_slice(chunk, &mut scratch)
                .map_err(|e| match e {
                    DecodeSliceError::DecodeError(e) => CodecError::Base64(e.to_string()),
                    DecodeSliceError::OutputSliceTooSmall => {
                        CodecError::Base64("payload chunk overflowed".into())
                    }
                })?;
        }
        Ok(())
    }

    /// Fail unless the MIME type is one of [`SUPPORTED_MIME_TYPES`].
    pub fn ensure_image(&self) -> Result<(), CodecError> {
        if is_supported_image(&self.mime_type) {
            Ok(())
        } else {
            Err(CodecError::UnsupportedMimeType(self.mime_type.clone()))
        }
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}{BASE64_MARKER},{}", self.mime_type, self.payload)
    }
}

/// Encode raw bytes as `data:<mime_type>;base64,<payload>`.
pub fn encode(raw: &[u8], mime_type: &str) -> String {
    format!("{SCHEME}{mime_type}{BASE64_MARKER},{}", STANDARD.encode(raw))
}

/// Like [`encode`], but detects the MIME type from the image's magic bytes.
pub fn encode_sniffed(raw: &[u8]) -> Result<String, CodecError> {
    let mime_type = sniff_mime_type(raw)?;
    Ok(encode(raw, mime_type))
}

/// Detect the MIME type of an encoded image.
pub fn sniff_mime_type(raw: &[u8]) -> Result<&'static str, CodecError> {
    image::guess_format(raw)
        .map(|format| format.to_mime_type())
        .map_err(|_| CodecError::UnknownFormat)
}

/// Split a data URI into its MIME type and (still encoded) payload.
///
/// Splits on the first comma; the MIME type is the text between `data:` and
/// `;base64`.
pub fn decode(input: &str) -> Result<DataUri, CodecError> {
    let (header, payload) = input
        .split_once(',')
        .ok_or_else(|| CodecError::MalformedInput("missing ',' separator".into()))?;

    let header = header
        .strip_prefix(SCHEME)
        .ok_or_else(|| CodecError::MalformedInput("missing 'data:' prefix".into()))?;

    let end = header
        .find(BASE64_MARKER)
        .ok_or_else(|| CodecError::MalformedInput("missing ';base64' marker".into()))?;

    let mime_type = &header[..end];
    if mime_type.is_empty() {
        return Err(CodecError::MalformedInput("empty MIME type".into()));
    }

    Ok(DataUri {
        mime_type: mime_type.to_owned(),
        payload: payload.to_owned(),
    })
}

/// Whether `mime_type` is in [`SUPPORTED_MIME_TYPES`], ignoring ASCII case.
pub fn is_supported_image(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES
        .iter()
        .any(|m| m.eq_ignore_ascii_case(mime_type))
}
