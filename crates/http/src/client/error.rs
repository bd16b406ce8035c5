//! Client error types

use thiserror::Error;

/// Errors raised while resolving the API base URL
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No base URL was configured and the policy does not allow a fallback
    #[error("API base URL is not configured (set NEXT_PUBLIC_API_URL)")]
    MissingBaseUrl,

    /// The configured base URL is not an absolute http(s) URL
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The configuration source could not be read
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server rejected the credential (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The credential store failed to read or write
    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the server rejected the session credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status carried by this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_maps_known_codes() {
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, "bad".into()),
            ClientError::BadRequest(_)
        ));
        assert!(ClientError::from_status(StatusCode::UNAUTHORIZED, "no".into()).is_unauthorized());
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "gone".into()),
            ClientError::NotFound(_)
        ));
    }

    #[test]
    fn test_from_status_falls_back_to_server_error() {
        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Server error 500: boom");
    }
}
