//! Error types for the network layer.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while submitting a request to the server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the request as malformed (HTTP 400).
    #[error("bad request: {message}")]
    BadRequest {
        /// Server-provided description.
        message: String,
    },

    /// The request conflicts with server state (HTTP 409/410).
    #[error("conflict: {message}")]
    Conflict {
        /// Server-provided description.
        message: String,
    },

    /// The target of the request does not exist (HTTP 404).
    #[error("not found: {message}")]
    NotFound {
        /// Server-provided description.
        message: String,
    },

    /// The session is missing or no longer valid (HTTP 401/403).
    #[error("authorization rejected: {message}")]
    Unauthorized {
        /// Server-provided description.
        message: String,
    },

    /// The server failed to process the request (HTTP 5xx and friends).
    #[error("server error (status {status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided description.
        message: String,
    },

    /// The request never reached the server.
    #[error("network failure: {message}")]
    Network {
        /// Transport-level description.
        message: String,
    },

    /// The request body could not be encoded.
    #[error("request encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The transport is known to be offline.
    #[error("not connected")]
    NotConnected,
}

impl ClientError {
    /// Maps a non-success HTTP status to an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => ClientError::BadRequest { message },
            401 | 403 => ClientError::Unauthorized { message },
            404 => ClientError::NotFound { message },
            409 | 410 => ClientError::Conflict { message },
            _ => ClientError::Server { status, message },
        }
    }

    /// Returns true if the server permanently refused the request.
    ///
    /// A rejected request will never succeed by resubmitting it unchanged,
    /// so callers should drop or rewrite the underlying action rather than
    /// keep it queued.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::BadRequest { .. } | ClientError::Conflict { .. } | ClientError::Encode(_)
        )
    }

    /// Returns true if resubmitting the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Network { .. }
                | ClientError::Server { .. }
                | ClientError::Unauthorized { .. }
                | ClientError::NotFound { .. }
                | ClientError::NotConnected
        )
    }
}
