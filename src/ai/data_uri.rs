//! Inline images as `data:<mime>;base64,<payload>` strings.
//!
//! Journal entries embed their photo this way, identification backends
//! receive it this way, and generation backends are normalized to it.

use crate::errors::{AppResult, DataUriError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A validated base64 data URI.
///
/// # Examples
///
/// ```
/// use sprout::ai::DataUri;
///
/// let uri: DataUri = "data:image/png;base64,iVBORw0KGgo=".parse().unwrap();
/// assert_eq!(uri.mime_type(), "image/png");
/// assert_eq!(uri.payload(), "iVBORw0KGgo=");
/// assert_eq!(uri.to_string(), "data:image/png;base64,iVBORw0KGgo=");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    payload: String,
}

impl DataUri {
    /// Wraps an already base64-encoded payload, checking that it decodes.
    pub fn from_base64(
        mime_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> Result<Self, DataUriError> {
        let mime_type = mime_type.into();
        let payload = payload.into();

        if mime_type.trim().is_empty() {
            return Err(DataUriError::EmptyMimeType);
        }
        if payload.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }
        BASE64
            .decode(payload.as_bytes())
            .map_err(DataUriError::InvalidPayload)?;

        Ok(Self { mime_type, payload })
    }

    /// Encodes raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Result<Self, DataUriError> {
        Self::from_base64(mime_type, BASE64.encode(bytes))
    }

    /// Reads an image file, taking the mime type from its extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mime_type = image_mime_for_extension(&extension)
            .ok_or(DataUriError::UnsupportedExtension(extension))?;

        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(mime_type, &bytes)?)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload without the prefix.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Decodes the payload back into bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        BASE64
            .decode(self.payload.as_bytes())
            .map_err(DataUriError::InvalidPayload)
    }

    /// File extension matching the mime type, for writing decoded images.
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/heic" => "heic",
            _ => "png",
        }
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix(SCHEME).ok_or(DataUriError::MissingPrefix)?;
        let (mime_type, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or(DataUriError::MissingBase64Marker)?;
        Self::from_base64(mime_type, payload)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", SCHEME, self.mime_type, BASE64_MARKER, self.payload)
    }
}

// Payloads run to megabytes; keep them out of logs.
impl fmt::Debug for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUri")
            .field("mime_type", &self.mime_type)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

fn image_mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_rejects_missing_scheme() {
        let result = "image/png;base64,AAAA".parse::<DataUri>();
        assert!(matches!(result, Err(DataUriError::MissingPrefix)));
    }

    #[test]
    fn test_parse_rejects_non_base64_uri() {
        let result = "data:text/plain,hello".parse::<DataUri>();
        assert!(matches!(result, Err(DataUriError::MissingBase64Marker)));
    }

    #[test]
    fn test_parse_rejects_bad_payload() {
        let result = "data:image/png;base64,not base64!".parse::<DataUri>();
        assert!(matches!(result, Err(DataUriError::InvalidPayload(_))));
    }

    #[test]
    fn test_parse_rejects_empty_mime_and_payload() {
        assert!(matches!(
            "data:;base64,AAAA".parse::<DataUri>(),
            Err(DataUriError::EmptyMimeType)
        ));
        assert!(matches!(
            "data:image/png;base64,".parse::<DataUri>(),
            Err(DataUriError::EmptyPayload)
        ));
    }

    #[test]
    fn test_from_bytes_decodes_back() {
        let uri = DataUri::from_bytes("image/jpeg", b"\xff\xd8\xff").unwrap();
        assert!(uri.to_string().starts_with("data:image/jpeg;base64,"));
        assert_eq!(uri.decode().unwrap(), b"\xff\xd8\xff");
        assert_eq!(uri.file_extension(), "jpg");
    }

    #[test]
    fn test_from_path_uses_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fern.JPG");
        fs::write(&path, b"fake jpeg bytes").unwrap();

        let uri = DataUri::from_path(&path).unwrap();
        assert_eq!(uri.mime_type(), "image/jpeg");
        assert_eq!(uri.decode().unwrap(), b"fake jpeg bytes");
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let result = DataUri::from_path(&path);
        assert!(matches!(
            result,
            Err(crate::errors::AppError::DataUri(
                DataUriError::UnsupportedExtension(_)
            ))
        ));
    }

    #[test]
    fn test_debug_hides_payload() {
        let uri = DataUri::from_bytes("image/png", &[0u8; 64]).unwrap();
        let debug = format!("{:?}", uri);
        assert!(debug.contains("payload_len"));
        assert!(!debug.contains(uri.payload()));
    }
}
