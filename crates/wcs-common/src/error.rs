//! Error types for the WCS client.

use thiserror::Error;

use crate::bbox::BboxParseError;

/// Result type alias using WcsError.
pub type WcsResult<T> = Result<T, WcsError>;

/// Boxed error produced by an HTTP transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Primary error type for WCS client operations.
#[derive(Debug, Error)]
pub enum WcsError {
    // === Capabilities Errors ===
    #[error("Missing required element: {0}")]
    MissingElement(String),

    #[error("XML parse error: {0}")]
    XmlParse(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    // === Lookup Errors ===
    #[error("No operation named {0}")]
    OperationNotFound(String),

    #[error("Operation {operation} has no {method} binding")]
    MethodNotFound { operation: String, method: String },

    #[error("Coverage not found: {0}")]
    CoverageNotFound(String),

    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // === Remote Errors ===
    #[error("Service exception: {message}")]
    ServiceException {
        code: Option<String>,
        message: String,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),
}

impl WcsError {
    /// Server-supplied message for a service exception.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            WcsError::ServiceException { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// True for errors raised because something requested is not advertised.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WcsError::OperationNotFound(_)
                | WcsError::MethodNotFound { .. }
                | WcsError::CoverageNotFound(_)
        )
    }

    /// Wrap any transport error without altering it.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        WcsError::Transport(Box::new(err))
    }
}

impl From<BboxParseError> for WcsError {
    fn from(err: BboxParseError) -> Self {
        WcsError::InvalidNumber(err.to_string())
    }
}

impl From<std::str::Utf8Error> for WcsError {
    fn from(err: std::str::Utf8Error) -> Self {
        WcsError::XmlParse(format!("document is not valid UTF-8: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message() {
        let err = WcsError::ServiceException {
            code: Some("InvalidParameterValue".to_string()),
            message: "Invalid identifier".to_string(),
        };
        assert_eq!(err.service_message(), Some("Invalid identifier"));
        assert_eq!(err.to_string(), "Service exception: Invalid identifier");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(WcsError::OperationNotFound("GetCoverage".into()).is_not_found());
        assert!(WcsError::MethodNotFound {
            operation: "GetCoverage".into(),
            method: "Post".into()
        }
        .is_not_found());
        assert!(!WcsError::MissingParameter("identifier".into()).is_not_found());
    }

    #[test]
    fn test_transport_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = WcsError::transport(io);
        match err {
            WcsError::Transport(inner) => {
                let io = inner.downcast_ref::<std::io::Error>().unwrap();
                assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
