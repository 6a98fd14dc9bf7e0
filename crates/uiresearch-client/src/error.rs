//! Error types for the UIResearch client.
//!
//! Two classes of failure matter to the presentation layer: the server answered
//! with a structured error (shown verbatim), or no usable answer arrived at all
//! (always shown as one generic connectivity message).

use crate::messages;

/// Errors from the API client and the controllers built on it.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, truncated body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from an `{error: {message}}` or `{detail}` envelope
        message: Option<String>,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Form encoding error
    #[error("Failed to encode form: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// URL construction error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Token storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Client-side form validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Localized validation message
        message: String,
    },
}

impl ClientError {
    /// Create an API error.
    #[must_use]
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api { status, message }
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Returns true if no response from the server was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Returns true if the server answered and refused the request.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns true if the server refused the credentials (401/403).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }

    /// HTTP status of a rejected request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message, if the server sent one.
    #[must_use]
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            Self::Validation { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Convert to the message shown inline to the user.
    ///
    /// Transport failures always map to the generic connectivity message;
    /// everything else shows the server's message or `fallback`.
    #[must_use]
    pub fn to_user_message(&self, fallback: &str) -> String {
        if self.is_transport() {
            return messages::CONNECTION_ERROR.to_string();
        }
        self.api_message().unwrap_or(fallback).to_string()
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
