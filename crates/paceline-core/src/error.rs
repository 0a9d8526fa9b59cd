//! Error types for paceline.
//!
//! One error type covers every failure a call can surface, with explicit
//! variants for transport, HTTP status, authorization, decoding, input
//! validation and local storage problems.

use std::fmt;
use thiserror::Error;

/// Message shown when the server rejects the session.
pub const SESSION_EXPIRED: &str = "session expired, please log in again";

/// The unified error type for paceline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    ///
    /// The underlying client error is kept as-is.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status other than 401.
    #[error(transparent)]
    Http(#[from] HttpStatusError),

    /// The server answered 401. The session has already been cleared.
    #[error("{}{}", SESSION_EXPIRED, detail_suffix(.message))]
    Unauthorized {
        /// Server-supplied detail, if any.
        message: Option<String>,
    },

    /// A success response did not carry the expected JSON.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Input validation errors (URL format, registration fields, video file).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Local key-value storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            Error::Unauthorized { .. } => Some(401),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error ended the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }
}

/// The server's reason, in parentheses, or nothing.
fn detail_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({})", message),
        None => String::new(),
    }
}

/// A non-success HTTP status with the server's message when it sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatusError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the server's `detail` field.
    pub message: Option<String>,
}

impl HttpStatusError {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: ", self.status)?;
        match self.message {
            Some(ref message) => write!(f, "{}", message),
            None => write!(f, "request failed"),
        }
    }
}

impl std::error::Error for HttpStatusError {}

/// Response bodies that could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A JSON endpoint returned something that is not the expected JSON.
    #[error("invalid JSON response: {source}")]
    Response {
        #[source]
        source: serde_json::Error,
    },

    /// The upload endpoint returned a body that is not JSON.
    #[error("upload failed: server returned malformed JSON: {source}")]
    Upload {
        #[source]
        source: serde_json::Error,
    },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A request field failed validation.
    #[error("{field}: {reason}")]
    Field { field: &'static str, reason: String },

    /// The file offered for upload cannot be sent.
    #[error("video '{path}': {reason}")]
    Video { path: String, reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

impl InvalidInputError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        InvalidInputError::Field {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures of the persisted key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("corrupt store {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_server_message() {
        let err = HttpStatusError::new(400, Some("phone already registered".to_string()));
        assert_eq!(err.to_string(), "HTTP 400: phone already registered");
    }

    #[test]
    fn http_error_falls_back_to_generic_message() {
        let err = Error::from(HttpStatusError::new(500, None));
        assert_eq!(err.to_string(), "HTTP 500: request failed");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn unauthorized_reports_401() {
        let err = Error::Unauthorized { message: None };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), SESSION_EXPIRED);
    }

    #[test]
    fn unauthorized_keeps_server_reason() {
        let err = Error::Unauthorized {
            message: Some("Incorrect phone or password".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "session expired, please log in again (Incorrect phone or password)"
        );
    }

    #[test]
    fn upload_decode_error_is_distinct_from_http() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = Error::from(DecodeError::Upload { source });
        assert!(matches!(err, Error::Decode(DecodeError::Upload { .. })));
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("upload failed"));
    }
}
