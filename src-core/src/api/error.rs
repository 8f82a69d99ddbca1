//! Client Errors

use thiserror::Error;

use super::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response reached us
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    /// Non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// 2xx envelope with `success: false`
    #[error("{0}")]
    Unsuccessful(String),
    #[error("invalid response: {0}")]
    Decode(String),
    /// Authenticated call with no stored token; nothing was sent
    #[error("authentication token not found")]
    MissingCredentials,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Worth another attempt: no response, or the server failed
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => ApiError::Timeout,
            TransportError::Network(message) => ApiError::Network(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Timeout.is_transient());
        assert!(ApiError::Network("refused".into()).is_transient());
        assert!(ApiError::Http { status: 503, message: String::new() }.is_transient());
        assert!(!ApiError::Http { status: 404, message: String::new() }.is_transient());
        assert!(!ApiError::Decode("x".into()).is_transient());
        assert!(!ApiError::MissingCredentials.is_transient());
    }
}
