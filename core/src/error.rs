//! Error types for the Pinot controller client.
//!
//! # Design
//! The three ways a controller call can fail are kept apart so callers can
//! branch on them: `Transport` (no response at all), `Status` (the controller
//! answered with a non-2xx code) and `Decode` (a 2xx body that does not match
//! the expected model). Error bodies are never parsed; the controller mixes
//! plain text and JSON there, so `Status` keeps the raw text. A response
//! whose body breaks off after the status line is `Body`, not `Transport`.

use thiserror::Error;

/// Errors returned by `PinotClient` operations.
#[derive(Debug, Error)]
pub enum PinotError {
    /// The request could not be sent or no response was received.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The controller answered, but its body could not be read in full.
    #[error("failed to read response body (status {status}): {source}")]
    Body {
        status: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The controller returned a non-2xx status; `body` is the raw text,
    /// with invalid UTF-8 replaced.
    #[error("request failed: status {status}\n{body}")]
    Status { status: u16, body: String },

    /// A 2xx response body could not be deserialized into the expected type.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized, or caller-supplied JSON
    /// was not valid.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The body decoded, but did not contain what the operation looks for.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// `create_schema` refused to upload a schema the controller rejected
    /// during validation.
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),
}

impl PinotError {
    /// HTTP status carried by the error, if the controller answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            PinotError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PinotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_code_and_raw_body() {
        let err = PinotError::Status {
            status: 400,
            body: r#"{"code": 400,"error": "Name is null"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request failed: status 400\n{\"code\": 400,\"error\": \"Name is null\"}"
        );
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
    }

    #[test]
    fn non_status_errors_have_no_status() {
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = PinotError::Decode(decode);
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("failed to decode response"));
    }

    #[test]
    fn body_errors_are_not_transport_errors() {
        let failure = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = PinotError::Body {
            status: 200,
            source: Box::new(failure),
        };
        assert!(!matches!(err, PinotError::Transport(_)));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "failed to read response body (status 200): eof");
    }
}
