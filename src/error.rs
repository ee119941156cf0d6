//! Error Types
//!
//! Failures of the remote API, the collection caches, the auth boundary and
//! the widget bindings.
//! None of these are fatal: caches log them and keep their last good snapshot.

use thiserror::Error;

/// Transport-level failure talking to the REST API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// Server answered with a non-2xx status
    #[error("server responded with status {status} for {url}")]
    Status { status: u16, url: String },
    /// Response body was not what we expected
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// Request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(String),
    /// HTTP is only wired up for the browser build
    #[error("http transport unavailable on this target")]
    Unsupported,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a collection cache operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// `edit`/`delete` called without an identifier
    #[error("{resource} identifier is missing")]
    MissingId { resource: &'static str },
    /// Server returned an item we cannot key into the snapshot
    #[error("server returned a {resource} without an identifier")]
    Unidentified { resource: &'static str },
}

/// Failure at the auth provider boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Provider refused the credentials or the sign-up
    #[error("auth provider rejected the request: {0}")]
    Rejected(String),
    /// Form input failed local validation
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failure setting up one of the JavaScript widgets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// A script tag or browser API the widget needs is absent
    #[error("{0} is not available")]
    Unavailable(&'static str),
    /// User or browser refused to share the position
    #[error("geolocation failed: {0}")]
    Geolocation(String),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = ApiError::Status {
            status: 404,
            url: "http://localhost:3000/events/1".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!ApiError::Network("offline".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 500,
            url: "/users/".to_string(),
        };
        assert_eq!(err.to_string(), "server responded with status 500 for /users/");

        let err = CacheError::MissingId { resource: "location" };
        assert_eq!(err.to_string(), "location identifier is missing");
    }

    #[test]
    fn test_api_error_converts_into_cache_error() {
        let err: CacheError = ApiError::Decode("bad json".to_string()).into();
        assert_eq!(err.to_string(), "failed to decode response: bad json");
    }
}
