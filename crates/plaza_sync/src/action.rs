//! Traits implemented by caches that take part in synchronization.

use crate::error::SyncResult;

/// One locally-queued operation awaiting server confirmation.
///
/// Actions are created by the local caches when the user performs an
/// offline-tolerant operation (like, pin, post, follow, ...). Each action is
/// offered at most once per pass; an action that fails stays in its owning
/// cache and is offered again on a later pass.
pub trait SyncAction: Send + Sync {
    /// Sends the action to the server.
    ///
    /// # Errors
    ///
    /// [`SyncError::Rejected`](crate::SyncError::Rejected) if the server
    /// permanently refused the action, [`SyncError::Network`](crate::SyncError::Network)
    /// if delivery failed and the action should stay queued.
    fn synchronize(&self) -> SyncResult<()>;

    /// Called after `synchronize` succeeded.
    ///
    /// The owning cache discards the action here so it is not offered again.
    fn on_success(&self);
}

/// A source of pending actions.
///
/// Producers are registered with the synchronizer under a label used for
/// logging. On every pass each producer is asked for its current pending
/// actions; the order in which it yields them is preserved.
pub trait SyncProducer: Send + Sync {
    /// Returns the actions currently awaiting synchronization.
    fn pending_actions(&self) -> SyncResult<Vec<Box<dyn SyncAction>>>;
}
