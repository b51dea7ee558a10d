//! Synchronizer state and pass bookkeeping.

use std::time::{Duration, Instant};

/// The current state of the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No pass is running.
    Idle,
    /// A pass is running.
    Running,
}

impl SyncState {
    /// Returns true if a pass is currently running.
    pub fn is_running(&self) -> bool {
        matches!(self, SyncState::Running)
    }
}

/// Aggregate statistics across all passes.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Passes that finished with every action confirmed.
    pub passes_completed: u64,
    /// Passes that finished with at least one failure.
    pub passes_failed: u64,
    /// Actions confirmed by the server.
    pub actions_synced: u64,
    /// Actions the server permanently refused.
    pub actions_rejected: u64,
    /// Actions that failed transiently and stayed queued.
    pub actions_failed: u64,
    /// When the last pass finished.
    pub last_pass_time: Option<Instant>,
    /// The last error seen, if the most recent pass failed.
    pub last_error: Option<String>,
}

/// Outcome of a single pass.
///
/// The `success` flag is the coarse-grained signal callers act on; the
/// counters are aggregates for logging and diagnostics, not a per-action
/// report.
#[derive(Debug, Clone)]
pub struct PassResult {
    /// True only if every producer fetch and every action succeeded.
    pub success: bool,
    /// Actions offered to the network.
    pub attempted: u64,
    /// Actions confirmed and discarded from their caches.
    pub synced: u64,
    /// Actions permanently refused by the server.
    pub rejected: u64,
    /// Actions that failed transiently and stayed queued.
    pub failed: u64,
    /// Producers whose pending actions could not be loaded.
    pub producer_errors: u64,
    /// Wall-clock duration of the pass.
    pub duration: Duration,
}

impl PassResult {
    pub(crate) fn new() -> Self {
        Self {
            success: false,
            attempted: 0,
            synced: 0,
            rejected: 0,
            failed: 0,
            producer_errors: 0,
            duration: Duration::ZERO,
        }
    }

    /// A result for a pass that was refused because one was already running.
    pub(crate) fn refused() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_checks() {
        assert!(!SyncState::Idle.is_running());
        assert!(SyncState::Running.is_running());
    }

    #[test]
    fn default_stats_are_zero() {
        let stats = SyncStats::default();
        assert_eq!(stats.passes_completed, 0);
        assert_eq!(stats.actions_synced, 0);
        assert!(stats.last_pass_time.is_none());
        assert!(stats.last_error.is_none());
    }
}
