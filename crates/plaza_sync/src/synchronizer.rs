//! The synchronization pass over registered producers.

use crate::action::SyncProducer;
use crate::state::{PassResult, SyncState, SyncStats};
use parking_lot::RwLock;
use std::time::Instant;
use tracing::{debug, warn};

struct RegisteredProducer {
    label: String,
    producer: Box<dyn SyncProducer>,
}

/// Replays locally-queued actions against the server.
///
/// Producers are visited in registration order; within a producer, actions
/// are attempted in the order the producer yields them. A failing action is
/// logged and skipped without aborting the pass, and stays in its owning
/// cache until a later pass confirms it.
///
/// The synchronizer performs no retry or backoff of its own: a new pass is
/// triggered externally (periodic job, connectivity change) and simply picks
/// up whatever is still pending.
///
/// # Hazard
///
/// Passes must be serialized by the caller (see
/// [`SyncHandler`](crate::SyncHandler)). Overlapping calls to
/// [`synchronize`](Synchronizer::synchronize) are out of contract; the
/// Running-state check below refuses the second pass as a best effort, not
/// as a guarantee.
pub struct Synchronizer {
    producers: Vec<RegisteredProducer>,
    state: RwLock<SyncState>,
    stats: RwLock<SyncStats>,
}

impl Synchronizer {
    /// Creates a synchronizer with no producers.
    pub fn new() -> Self {
        Self {
            producers: Vec::new(),
            state: RwLock::new(SyncState::Idle),
            stats: RwLock::new(SyncStats::default()),
        }
    }

    /// Appends a producer under the given logging label.
    ///
    /// Registration order is preserved and determines the order producers
    /// are visited on every pass. Duplicates are not detected; registering a
    /// producer twice means its actions are offered twice per pass.
    pub fn register_producer(
        &mut self,
        producer: impl SyncProducer + 'static,
        label: impl Into<String>,
    ) {
        self.producers.push(RegisteredProducer {
            label: label.into(),
            producer: Box::new(producer),
        });
    }

    /// Returns the registered labels in visit order.
    pub fn producer_labels(&self) -> Vec<&str> {
        self.producers
            .iter()
            .map(|entry| entry.label.as_str())
            .collect()
    }

    /// Returns the current state.
    pub fn state(&self) -> SyncState {
        *self.state.read()
    }

    /// Returns a snapshot of the aggregate statistics.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Runs one pass over all registered producers.
    ///
    /// Returns a [`PassResult`] whose `success` flag is true only if every
    /// producer fetch and every action succeeded.
    pub fn synchronize(&self) -> PassResult {
        {
            let mut state = self.state.write();
            if state.is_running() {
                warn!("a synchronization pass is already running, refusing overlap");
                return PassResult::refused();
            }
            *state = SyncState::Running;
        }

        let start = Instant::now();
        let mut result = PassResult::new();
        let mut last_error = None;

        for entry in &self.producers {
            let actions = match entry.producer.pending_actions() {
                Ok(actions) => actions,
                Err(err) => {
                    warn!(producer = %entry.label, error = %err, "failed to load pending actions");
                    last_error = Some(err.to_string());
                    result.producer_errors += 1;
                    continue;
                }
            };

            if actions.is_empty() {
                continue;
            }
            debug!(producer = %entry.label, pending = actions.len(), "synchronizing");

            for action in actions {
                result.attempted += 1;
                match action.synchronize() {
                    Ok(()) => {
                        action.on_success();
                        result.synced += 1;
                    }
                    Err(err) if err.is_rejection() => {
                        warn!(producer = %entry.label, error = %err, "action rejected by server");
                        last_error = Some(err.to_string());
                        result.rejected += 1;
                    }
                    Err(err) => {
                        warn!(producer = %entry.label, error = %err, "action failed, will retry on a later pass");
                        last_error = Some(err.to_string());
                        result.failed += 1;
                    }
                }
            }
        }

        result.success =
            result.rejected == 0 && result.failed == 0 && result.producer_errors == 0;
        result.duration = start.elapsed();

        {
            let mut stats = self.stats.write();
            if result.success {
                stats.passes_completed += 1;
                stats.last_error = None;
            } else {
                stats.passes_failed += 1;
                stats.last_error = last_error;
            }
            stats.actions_synced += result.synced;
            stats.actions_rejected += result.rejected;
            stats.actions_failed += result.failed;
            stats.last_pass_time = Some(Instant::now());
        }

        *self.state.write() = SyncState::Idle;
        result
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}
