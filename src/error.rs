//! Error types for the Secure Forms SDK.
//!
//! Every failed call surfaces as an [`Error`]. The [`Error::message`] text is
//! meant to be shown to end users directly, so it never carries the shared
//! secret or raw response bodies.

use thiserror::Error;

/// Result type for Secure Forms operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback message when an error response has no usable `error` field.
pub(crate) const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Errors that can occur when using the Secure Forms SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// The client is not configured for the requested operation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never produced a response (network, DNS, refused connection, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("API error ({status_code}): {message}")]
    Api {
        /// Message taken from the response's `error` field.
        message: String,
        /// HTTP status code.
        status_code: u16,
    },

    /// The response body was not valid JSON.
    #[error("Response parse error: {0}")]
    ResponseParse(String),

    /// The payload could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// User-facing message, without the error-kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Configuration(msg)
            | Error::Transport(msg)
            | Error::ResponseParse(msg)
            | Error::Serialization(msg) => msg,
            Error::Api { message, .. } => message,
        }
    }

    /// Returns the HTTP status code if a response was received and understood.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if a later attempt might succeed.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Api { status_code, .. } => *status_code >= 500 || *status_code == 429,
            _ => false,
        }
    }

    /// Returns true if the server rejected the key or signature.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Api {
                status_code: 401 | 403,
                ..
            }
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Error::Configuration(err.to_string());
        }
        Error::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            message: "name required, email required".to_string(),
            status_code: 400,
        };
        assert_eq!(
            err.to_string(),
            "API error (400): name required, email required"
        );
        assert_eq!(err.message(), "name required, email required");
    }

    #[test]
    fn test_status_code() {
        let err = Error::Api {
            message: "Invalid API signature".to_string(),
            status_code: 401,
        };
        assert_eq!(err.status_code(), Some(401));

        assert_eq!(Error::Transport("connection refused".into()).status_code(), None);
        assert_eq!(Error::ResponseParse("bad json".into()).status_code(), None);
        assert_eq!(Error::Configuration("no key".into()).status_code(), None);
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Transport("dns failure".into()).is_retryable());

        let rate_limited = Error::Api {
            message: "Rate limit exceeded. Please try again later.".to_string(),
            status_code: 429,
        };
        assert!(rate_limited.is_retryable());

        let server_error = Error::Api {
            message: "Internal server error".to_string(),
            status_code: 500,
        };
        assert!(server_error.is_retryable());

        let bad_request = Error::Api {
            message: "No data provided".to_string(),
            status_code: 400,
        };
        assert!(!bad_request.is_retryable());
        assert!(!Error::Configuration("missing key".into()).is_retryable());
    }

    #[test]
    fn test_is_auth_error() {
        let unauthorized = Error::Api {
            message: "Invalid API signature".to_string(),
            status_code: 401,
        };
        assert!(unauthorized.is_auth_error());

        let not_found = Error::Api {
            message: "Endpoint not found".to_string(),
            status_code: 404,
        };
        assert!(!not_found.is_auth_error());
    }
}
