//! Error types for the paw-client crate.

use thiserror::Error;

/// Errors that can occur while talking to the fusioncat API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected locally, before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Host or settings file could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// Request could not be built or delivered.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status.
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx response did not have the expected shape.
    #[error("decoding error: {0}")]
    Decode(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Whether the backend rejected the request.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// HTTP status code for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_carries_status_and_body() {
        let err = ClientError::Api {
            status: 422,
            body: r#"{"error":"invalid type"}"#.into(),
        };
        assert_eq!(
            err.to_string(),
            r#"API error (status 422): {"error":"invalid type"}"#
        );
    }

    #[test]
    fn status_only_for_api_errors() {
        let api = ClientError::Api {
            status: 401,
            body: String::new(),
        };
        assert!(api.is_api());
        assert_eq!(api.status(), Some(401));

        let config = ClientError::Config("no host".into());
        assert!(!config.is_api());
        assert_eq!(config.status(), None);
    }

    #[test]
    fn validation_error_display() {
        let err = ClientError::Validation("project ID is required".into());
        assert_eq!(err.to_string(), "validation error: project ID is required");
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::Io(_)));
        assert!(err.to_string().contains("io error"));
    }
}
