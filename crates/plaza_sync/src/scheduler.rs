//! Background trigger for synchronization passes.

use crate::handler::SyncHandler;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

enum Command {
    Trigger,
    Shutdown,
}

/// Drives a [`SyncHandler`] from a dedicated worker thread.
///
/// Triggers arrive over an explicit command channel: call
/// [`trigger`](SyncScheduler::trigger) when connectivity returns or the user
/// pulls to refresh. With an interval configured, the worker also starts a
/// pass whenever the interval elapses without a command.
///
/// The scheduler only ever calls [`SyncHandler::run`]; pass serialization
/// still comes from the handler's lock, so external triggers may share the
/// handler with a scheduler freely.
pub struct SyncScheduler {
    sender: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl SyncScheduler {
    /// Starts the worker thread.
    ///
    /// With `interval = None` the worker only reacts to explicit triggers.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn start(handler: Arc<SyncHandler>, interval: Option<Duration>) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();

        let worker = std::thread::Builder::new()
            .name("plaza-sync".into())
            .spawn(move || loop {
                let command = match interval {
                    Some(period) => match receiver.recv_timeout(period) {
                        Ok(command) => command,
                        Err(RecvTimeoutError::Timeout) => Command::Trigger,
                        Err(RecvTimeoutError::Disconnected) => break,
                    },
                    None => match receiver.recv() {
                        Ok(command) => command,
                        Err(_) => break,
                    },
                };

                match command {
                    Command::Trigger => {
                        let _ = handler.run();
                    }
                    Command::Shutdown => break,
                }
            })?;

        Ok(Self {
            sender,
            worker: Some(worker),
        })
    }

    /// Requests a pass. Returns immediately; the pass runs on the worker.
    pub fn trigger(&self) {
        let _ = self.sender.send(Command::Trigger);
    }

    /// Stops the worker after any in-flight pass finishes.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.sender.send(Command::Shutdown);
            let _ = worker.join();
        }
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{SyncAction, SyncProducer};
    use crate::error::SyncResult;
    use crate::synchronizer::Synchronizer;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Instant;

    struct CountingAction {
        synced: Arc<AtomicU64>,
    }

    impl SyncAction for CountingAction {
        fn synchronize(&self) -> SyncResult<()> {
            Ok(())
        }

        fn on_success(&self) {
            self.synced.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct CountingProducer {
        synced: Arc<AtomicU64>,
    }

    impl SyncProducer for CountingProducer {
        fn pending_actions(&self) -> SyncResult<Vec<Box<dyn SyncAction>>> {
            Ok(vec![Box::new(CountingAction {
                synced: Arc::clone(&self.synced),
            })])
        }
    }

    fn counting_handler() -> (Arc<SyncHandler>, Arc<AtomicU64>) {
        let synced = Arc::new(AtomicU64::new(0));
        let mut synchronizer = Synchronizer::new();
        synchronizer.register_producer(
            CountingProducer {
                synced: Arc::clone(&synced),
            },
            "likes",
        );
        (Arc::new(SyncHandler::new(synchronizer)), synced)
    }

    fn wait_until(synced: &AtomicU64, expected: u64) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while synced.load(Ordering::SeqCst) < expected {
            assert!(Instant::now() < deadline, "timed out waiting for passes");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn trigger_runs_a_pass() {
        let (handler, synced) = counting_handler();
        let scheduler = SyncScheduler::start(Arc::clone(&handler), None).unwrap();

        scheduler.trigger();
        wait_until(&synced, 1);

        scheduler.shutdown();
        assert_eq!(handler.stats().passes_completed, 1);
    }

    #[test]
    fn interval_runs_passes_without_triggers() {
        let (handler, synced) = counting_handler();
        let scheduler =
            SyncScheduler::start(Arc::clone(&handler), Some(Duration::from_millis(10))).unwrap();

        wait_until(&synced, 2);
        scheduler.shutdown();

        assert!(handler.stats().passes_completed >= 2);
    }

    #[test]
    fn shutdown_stops_the_worker() {
        let (handler, synced) = counting_handler();
        let scheduler = SyncScheduler::start(Arc::clone(&handler), None).unwrap();

        scheduler.trigger();
        wait_until(&synced, 1);
        scheduler.shutdown();

        let after = synced.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(synced.load(Ordering::SeqCst), after);
    }
}
