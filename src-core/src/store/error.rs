//! View-Facing Errors
//!
//! Every failure a store operation can report, each with a message fit
//! for an inline banner.

use thiserror::Error;

use crate::api::ApiError;
use crate::domain::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Bad local input; nothing was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// 401, or no token stored before a mutating call
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Server error. Please try again later.")]
    Server { status: u16 },
    #[error("Network error. Please check your connection and try again.")]
    Network,
    #[error("Request timed out. Please try again.")]
    Timeout,
    /// Other 4xx, or an envelope with `success: false`
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Unknown(String),
}

impl StoreError {
    /// Map a client error; `label` names the record kind in 404 messages
    pub fn from_api(err: ApiError, label: &str) -> Self {
        match err {
            ApiError::Network(_) => StoreError::Network,
            ApiError::Timeout => StoreError::Timeout,
            ApiError::MissingCredentials => {
                StoreError::Auth("Authentication token not found. Please login again.".to_string())
            }
            ApiError::Http { status: 401, .. } => {
                StoreError::Auth("Authentication failed. Please login again.".to_string())
            }
            ApiError::Http { status: 404, .. } => StoreError::NotFound(format!("{} not found", label)),
            ApiError::Http { status, .. } if status >= 500 => StoreError::Server { status },
            ApiError::Http { message, .. } => StoreError::Rejected(message),
            ApiError::Unsuccessful(message) => StoreError::Rejected(message),
            ApiError::Decode(message) => StoreError::Unknown(format!("Unexpected response from server: {}", message)),
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, StoreError::Auth(_))
    }
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        StoreError::from_api(err, "Record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert!(StoreError::from_api(http(401, "x"), "Project").is_auth());
        assert_eq!(
            StoreError::from_api(http(404, "x"), "Gallery item"),
            StoreError::NotFound("Gallery item not found".into())
        );
        assert_eq!(StoreError::from(http(503, "x")), StoreError::Server { status: 503 });
        assert_eq!(
            StoreError::from(http(400, "Invalid section")),
            StoreError::Rejected("Invalid section".into())
        );
    }

    #[test]
    fn test_transport_mapping() {
        assert_eq!(StoreError::from(ApiError::Timeout), StoreError::Timeout);
        assert_eq!(StoreError::from(ApiError::Network("x".into())), StoreError::Network);
        assert_eq!(
            StoreError::from(ApiError::MissingCredentials).user_message(),
            "Authentication token not found. Please login again."
        );
        assert!(matches!(StoreError::from(ApiError::Decode("eof".into())), StoreError::Unknown(_)));
    }
}
