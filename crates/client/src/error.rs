//! Error types for the Beanstream client
//!
//! [`Error`] is the only error the crate returns. Every variant exposes a
//! non-empty [`Error::message`]; only [`Error::Api`] carries an HTTP status,
//! because it is the only case in which the service actually answered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, Error>;

/// Fallback message for transport failures whose source renders empty
const CONNECTION_ERROR: &str = "Connection error";

/// Structured error body returned by the service on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Service error code
    pub code: i32,
    /// Error category (1 = declined, 2 = business rule, 3 = integration, 4 = system)
    pub category: i32,
    /// Human-readable message
    pub message: String,
    /// Reference for support requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Field-level details, when the service sends them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

/// One field-level entry of an [`ApiErrorBody`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Field the message applies to
    #[serde(default)]
    pub field: String,
    /// Message for that field
    #[serde(default)]
    pub message: String,
}

/// Beanstream client errors
#[derive(Error, Debug)]
pub enum Error {
    /// No response was obtained from the service
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure
        message: String,
        /// Underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The payload could not be serialized before sending
    #[error("Payload encoding failed: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The service answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message, from the parsed body when available
        message: String,
        /// Parsed error body, when the response carried one
        body: Option<ApiErrorBody>,
    },

    /// A successful response body did not match the expected shape
    #[error("Response decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request failed client-side validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a transport error from the underlying cause
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        let rendered = source.to_string();
        let message = if rendered.is_empty() {
            CONNECTION_ERROR.to_string()
        } else {
            format!("{CONNECTION_ERROR}: {rendered}")
        };
        Self::Transport {
            message,
            source: Box::new(source),
        }
    }

    /// Create an API error from a non-2xx status and its raw body
    ///
    /// The body is parsed as an [`ApiErrorBody`]; when that fails the raw text
    /// becomes the message, and an absent body falls back to the status line.
    pub fn api_response(status: u16, body: Option<&str>) -> Self {
        let parsed = body.and_then(|text| serde_json::from_str::<ApiErrorBody>(text).ok());

        let message = match (&parsed, body) {
            (Some(parsed), _) if !parsed.message.is_empty() => parsed.message.clone(),
            (_, Some(text)) if !text.trim().is_empty() => text.to_string(),
            _ => format!("HTTP status {status}"),
        };

        Self::Api {
            status,
            message,
            body: parsed,
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status, present only when the service responded
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message, never empty
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Transport { message, .. } | Self::Api { message, .. } => message.clone(),
            Self::Validation(message) | Self::Config(message) => message.clone(),
            Self::Encoding(e) | Self::Decode(e) => e.to_string(),
        }
    }

    /// Parsed service error body, if any
    #[must_use]
    pub fn api_body(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Service error category from the parsed body
    #[must_use]
    pub fn category(&self) -> Option<i32> {
        self.api_body().map(|b| b.category)
    }

    /// Service error code from the parsed body
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.api_body().map(|b| b.code)
    }

    /// Check if no response was received
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Encoding(_))
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_api_response_parses_error_body() {
        let err = Error::api_response(
            400,
            Some(r#"{"code":17,"category":1,"message":"Invalid card"}"#),
        );

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Invalid card");
        assert_eq!(err.code(), Some(17));
        assert_eq!(err.category(), Some(1));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_api_response_keeps_raw_text() {
        let err = Error::api_response(502, Some("<html>Bad Gateway</html>"));

        assert_eq!(err.status(), Some(502));
        assert_eq!(err.message(), "<html>Bad Gateway</html>");
        assert!(err.api_body().is_none());
        assert!(err.is_server_error());
    }

    #[test]
    fn test_api_response_without_body() {
        let err = Error::api_response(404, None);

        assert_eq!(err.status(), Some(404));
        assert!(!err.message().is_empty());
        assert!(err.api_body().is_none());
    }

    #[test]
    fn test_error_body_with_details() {
        let json = r#"{
            "code": 52,
            "category": 3,
            "message": "Invalid request",
            "reference": "ref-1",
            "details": [{"field": "card.number", "message": "missing"}]
        }"#;
        let err = Error::api_response(422, Some(json));
        let body = err.api_body().unwrap();

        assert_eq!(body.reference.as_deref(), Some("ref-1"));
        assert_eq!(body.details.len(), 1);
        assert_eq!(body.details[0].field, "card.number");
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::transport(io);

        assert_eq!(err.status(), None);
        assert!(err.is_transport());
        assert!(err.message().starts_with("Connection error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = Error::api_response(401, Some(r#"{"code":21,"category":3,"message":"Authentication failed"}"#));
        assert_eq!(err.to_string(), "API error (401): Authentication failed");

        let err = Error::validation("profile id is empty");
        assert_eq!(err.to_string(), "Validation error: profile id is empty");
    }
}
