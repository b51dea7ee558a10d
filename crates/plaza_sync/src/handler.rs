//! Process-wide serialization of synchronization passes.

use crate::state::SyncStats;
use crate::synchronizer::Synchronizer;
use parking_lot::Mutex;
use tracing::info;

/// Runs synchronization passes one at a time.
///
/// The caches are mutated by the application thread (enqueue) and by the
/// pass (remove-on-success); the handler's lock is the mutual exclusion
/// that keeps at most one pass running process-wide. Every trigger source
/// (background scheduler, connectivity callback, manual refresh) must go
/// through the same handler instance.
pub struct SyncHandler {
    synchronizer: Mutex<Synchronizer>,
}

impl SyncHandler {
    /// Creates a handler around a fully-registered synchronizer.
    pub fn new(synchronizer: Synchronizer) -> Self {
        Self {
            synchronizer: Mutex::new(synchronizer),
        }
    }

    /// Runs one pass, blocking until any in-flight pass finishes first.
    ///
    /// Returns true if every pending action was confirmed.
    pub fn run(&self) -> bool {
        let synchronizer = self.synchronizer.lock();
        let result = synchronizer.synchronize();
        if result.success {
            info!(synced = result.synced, "sync succeeded");
        } else {
            info!(
                synced = result.synced,
                rejected = result.rejected,
                failed = result.failed,
                producer_errors = result.producer_errors,
                "sync failed"
            );
        }
        result.success
    }

    /// Returns a snapshot of the aggregate statistics.
    pub fn stats(&self) -> SyncStats {
        self.synchronizer.lock().stats()
    }
}
