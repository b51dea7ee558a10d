//! Error types for synchronization.

use plaza_client::ClientError;
use thiserror::Error;

/// Result type for synchronization operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised while synchronizing a single pending action.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The server permanently refused the action.
    ///
    /// The action will never succeed as queued; its owner should drop it
    /// instead of offering it again on the next pass.
    #[error("operation rejected: {0}")]
    Rejected(String),

    /// The action could not be delivered.
    ///
    /// The action stays queued and is offered again on a later pass.
    #[error("synchronization failed: {0}")]
    Network(String),

    /// The owning cache failed to load or update its pending actions.
    #[error("cache error: {0}")]
    Store(#[from] plaza_store::StoreError),
}

impl SyncError {
    /// Returns true if the server permanently refused the action.
    pub fn is_rejection(&self) -> bool {
        matches!(self, SyncError::Rejected(_))
    }
}

impl From<ClientError> for SyncError {
    /// Folds the network-layer taxonomy into rejected-vs-transient.
    fn from(err: ClientError) -> Self {
        if err.is_rejection() {
            SyncError::Rejected(err.to_string())
        } else {
            SyncError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_becomes_rejection() {
        let err: SyncError = ClientError::from_status(400, "malformed handle").into();
        assert!(err.is_rejection());
        assert!(err.to_string().contains("malformed handle"));
    }

    #[test]
    fn server_error_stays_transient() {
        let err: SyncError = ClientError::from_status(503, "overloaded").into();
        assert!(!err.is_rejection());
        assert!(matches!(err, SyncError::Network(_)));
    }

    #[test]
    fn not_connected_stays_transient() {
        let err: SyncError = ClientError::NotConnected.into();
        assert!(matches!(err, SyncError::Network(_)));
    }
}
