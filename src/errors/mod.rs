//! Error handling utilities for the sprout application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Read failures of the journal store are intentionally absent here: the store
//! degrades them to an empty collection. Store mutations return `Option::None`
//! for unmatched ids; only the command layer turns that into `NotFound`.

use crate::ai::Backend;
use std::io;
use thiserror::Error;

/// Represents errors that can occur while persisting the journal.
///
/// # Examples
///
/// ```
/// use sprout::errors::StoreError;
/// use std::io::{self, ErrorKind};
///
/// let error = StoreError::Write {
///     key: "plant-journal-entries".to_string(),
///     source: io::Error::new(ErrorKind::Other, "no space left on device"),
/// };
///
/// assert!(format!("{}", error).contains("plant-journal-entries"));
/// assert!(format!("{}", error).contains("no space left"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection could not be encoded as JSON.
    #[error("Failed to serialize journal entries: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The underlying storage rejected the write.
    #[error("Failed to write journal storage key '{key}': {source}. Please check disk space and permissions of the data directory.")]
    Write {
        /// The storage key being written
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents errors when parsing or building data URIs.
///
/// ```
/// use sprout::errors::DataUriError;
///
/// let error = DataUriError::MissingPrefix;
/// assert!(format!("{}", error).contains("data:"));
/// ```
#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("Data URI must start with 'data:'")]
    MissingPrefix,

    #[error("Data URI must use base64 encoding (';base64,' marker not found)")]
    MissingBase64Marker,

    #[error("Data URI has an empty mime type")]
    EmptyMimeType,

    #[error("Data URI payload is empty")]
    EmptyPayload,

    #[error("Data URI payload is not valid base64: {0}")]
    InvalidPayload(#[source] base64::DecodeError),

    #[error("Unsupported image file extension: '{0}'. Supported: png, jpg, jpeg, webp, gif, heic")]
    UnsupportedExtension(String),
}

/// Represents specific error cases that can occur during AI operations.
///
/// This enum provides detailed, contextual error information for different failure modes
/// when interacting with either identification/generation backend.
///
/// # Examples
///
/// ```
/// use sprout::errors::AIError;
///
/// let error = AIError::NotAPlant;
/// assert!(format!("{}", error).contains("No plant detected"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// The credential required by the selected backend is not set.
    #[error("{backend} backend is not configured: set {variable}")]
    Configuration {
        /// The backend that was selected
        backend: Backend,
        /// Environment variable that must hold the credential
        variable: &'static str,
    },

    /// The backend answered but reported the "Unknown" sentinel.
    #[error("No plant detected in the image. Try a closer, well-lit photo of a single plant.")]
    NotAPlant,

    /// The backend returned a non-success status.
    #[error("{backend} API error (HTTP {status}): {message}")]
    Upstream {
        /// The backend that failed
        backend: Backend,
        /// HTTP status code
        status: u16,
        /// Message reported by the backend
        message: String,
    },

    /// The backend could not be reached.
    #[error("{backend} API request failed: {source}")]
    Transport {
        /// The backend that could not be reached
        backend: Backend,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Invalid or unexpected response payload.
    #[error("Invalid response from {backend}: {message}")]
    InvalidResponse {
        /// The backend that produced the payload
        backend: Backend,
        /// What was wrong with it
        message: String,
    },

    /// Generation succeeded at transport level but carried no image.
    #[error("Image generation produced no image. Try rephrasing the description.")]
    NoImageProduced,
}

/// Represents all possible errors that can occur in the sprout application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use sprout::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use sprout::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input rejected before any work is done.
    #[error("Invalid input: {0}")]
    Input(String),

    /// No journal entry has the requested id.
    #[error("No journal entry with id {0}")]
    NotFound(String),

    /// Errors persisting the journal.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Malformed image data URIs.
    #[error("Image error: {0}")]
    DataUri(#[from] DataUriError),

    /// Errors related to AI operations.
    ///
    /// This variant uses a dedicated AIError type to provide detailed
    /// information about what went wrong with backend interactions.
    #[error("AI error: {0}")]
    AI(#[from] AIError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use sprout::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Input("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let input_error = AppError::Input("Note text is empty".to_string());
        assert_eq!(format!("{}", input_error), "Invalid input: Note text is empty");

        let not_found = AppError::NotFound("1705329000000".to_string());
        assert_eq!(
            format!("{}", not_found),
            "No journal entry with id 1705329000000"
        );
    }

    #[test]
    fn test_ai_error_converts_to_app_error() {
        let app_error: AppError = AIError::NoImageProduced.into();
        match app_error {
            AppError::AI(AIError::NoImageProduced) => {}
            _ => panic!("Expected AppError::AI(NoImageProduced)"),
        }
    }

    #[test]
    fn test_upstream_error_preserves_backend_message() {
        let error = AIError::Upstream {
            backend: Backend::OpenAi,
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        let message = format!("{}", error);
        assert!(message.contains("OpenAI"));
        assert!(message.contains("401"));
        assert!(message.contains("Incorrect API key provided"));
    }

    #[test]
    fn test_configuration_error_names_variable() {
        let error = AIError::Configuration {
            backend: Backend::Gemini,
            variable: "GEMINI_API_KEY",
        };
        assert!(format!("{}", error).contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_store_write_error_keeps_source() {
        use std::error::Error as _;

        let error = StoreError::Write {
            key: "k".to_string(),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert!(error.source().is_some());
    }
}
