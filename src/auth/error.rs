//! Auth-specific error types for the commerce SDK.
//!
//! # Error Types
//!
//! - [`AuthError::AuthenticationFailure`]: An auth route answered with a non-2xx status
//! - [`AuthError::InvalidResponse`]: A 2xx answer carried neither a token nor a redirect
//! - [`AuthError::Transport`]: The request could not be completed
//!
//! # Example
//!
//! ```rust
//! use commerce_sdk::auth::AuthError;
//!
//! let error = AuthError::AuthenticationFailure {
//!     status: 401,
//!     message: "Invalid email or password".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! assert_eq!(error.status(), Some(401));
//! ```

use thiserror::Error;

use crate::clients::{HttpError, InvalidHttpRequestError};

/// Errors returned by [`Auth`](crate::auth::Auth) operations.
///
/// Failures are passed through untouched: the auth service never retries
/// and never reinterprets a server answer beyond this classification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the request, or there was no credential to use.
    #[error("Authentication failed with status {status}: {message}")]
    AuthenticationFailure {
        /// The HTTP status code returned (401 when no request was sent).
        status: u16,
        /// The server-provided message.
        message: String,
    },

    /// A successful response did not have the expected shape.
    #[error("Invalid auth response: {reason}")]
    InvalidResponse {
        /// What was missing or malformed.
        reason: String,
    },

    /// The request could not be completed (network, validation, encoding).
    #[error(transparent)]
    Transport(HttpError),
}

impl AuthError {
    /// Returns the HTTP status for authentication failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailure { status, .. } => Some(*status),
            Self::InvalidResponse { .. } | Self::Transport(_) => None,
        }
    }
}

impl From<HttpError> for AuthError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Response(e) => Self::AuthenticationFailure {
                status: e.code,
                message: e.message,
            },
            HttpError::MaxRetries(e) => Self::AuthenticationFailure {
                status: e.code,
                message: e.message,
            },
            other => Self::Transport(other),
        }
    }
}

impl From<InvalidHttpRequestError> for AuthError {
    fn from(err: InvalidHttpRequestError) -> Self {
        Self::Transport(HttpError::InvalidRequest(err))
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(HttpError::Json(err))
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
