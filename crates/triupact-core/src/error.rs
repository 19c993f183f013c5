//! Error types for API, session, and storage operations.

use thiserror::Error;

/// Result alias for API calls.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Failures raised while talking to the remote API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Body `error` field, or `HTTP <status>` when absent.
        message: String,
    },
    /// The request never produced a response.
    #[error("network request failed: {0}")]
    Transport(String),
    /// The request was aborted because its owner went away.
    #[error("request aborted")]
    Aborted,
    /// The response body had an unexpected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for server-side failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Inline text shown to users.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Transport(_) => {
                "Could not reach the server. Check your connection and retry.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// `true` when the owner cancelled the request.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Failures raised by the login flow and session bookkeeping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Input was rejected before any request was made.
    #[error("{0}")]
    Validation(String),
    /// The server refused the credentials.
    #[error("{0}")]
    Rejected(String),
    /// The login response carried no session.
    #[error("login response did not include a session")]
    MissingSession,
    /// The session expiry could not be parsed.
    #[error("session expiry '{0}' is not a valid timestamp")]
    InvalidExpiry(String),
}

/// Failure writing to a key/value backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("storage write for '{key}' failed: {detail}")]
pub struct StorageError {
    /// Key being written.
    pub key: String,
    /// Backend-specific detail.
    pub detail: String,
}

impl StorageError {
    /// Build a storage error for the given key.
    #[must_use]
    pub fn new(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_server_message() {
        let err = ApiError::Http {
            status: 401,
            message: "unauthorized".into(),
        };
        assert_eq!(err.to_string(), "unauthorized");
        assert_eq!(err.status(), Some(401));
        assert_eq!(ApiError::Aborted.status(), None);
        assert_eq!(err.display_message(), "unauthorized");
        assert!(ApiError::Aborted.is_aborted());
        assert!(
            ApiError::Transport("dns".into())
                .display_message()
                .starts_with("Could not reach")
        );
    }

    #[test]
    fn storage_error_names_key() {
        let err = StorageError::new("token", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "storage write for 'token' failed: quota exceeded"
        );
    }
}
