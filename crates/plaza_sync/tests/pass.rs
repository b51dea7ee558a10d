//! Pass-level behavior across multiple producers.

use parking_lot::Mutex;
use plaza_sync::{SyncAction, SyncError, SyncProducer, SyncResult, Synchronizer};
use proptest::prelude::*;
use std::sync::{mpsc, Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Confirmed,
    Rejected,
    NetworkFailure,
}

/// Appends `sync:<name>` when attempted and `done:<name>` when confirmed.
struct ScriptedAction {
    name: String,
    outcome: Outcome,
    log: Arc<Mutex<Vec<String>>>,
}

impl SyncAction for ScriptedAction {
    fn synchronize(&self) -> SyncResult<()> {
        self.log.lock().push(format!("sync:{}", self.name));
        match self.outcome {
            Outcome::Confirmed => Ok(()),
            Outcome::Rejected => Err(SyncError::Rejected("bad request".into())),
            Outcome::NetworkFailure => Err(SyncError::Network("timeout".into())),
        }
    }

    fn on_success(&self) {
        self.log.lock().push(format!("done:{}", self.name));
    }
}

struct ScriptedProducer {
    actions: Vec<(String, Outcome)>,
    log: Arc<Mutex<Vec<String>>>,
}

impl SyncProducer for ScriptedProducer {
    fn pending_actions(&self) -> SyncResult<Vec<Box<dyn SyncAction>>> {
        Ok(self
            .actions
            .iter()
            .map(|(name, outcome)| {
                Box::new(ScriptedAction {
                    name: name.clone(),
                    outcome: *outcome,
                    log: Arc::clone(&self.log),
                }) as Box<dyn SyncAction>
            })
            .collect())
    }
}

fn producer(
    log: &Arc<Mutex<Vec<String>>>,
    actions: &[(&str, Outcome)],
) -> ScriptedProducer {
    ScriptedProducer {
        actions: actions
            .iter()
            .map(|(name, outcome)| ((*name).to_string(), *outcome))
            .collect(),
        log: Arc::clone(log),
    }
}

#[test]
fn producers_visited_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut synchronizer = Synchronizer::new();
    synchronizer.register_producer(
        producer(&log, &[("a1", Outcome::Confirmed), ("a2", Outcome::Confirmed)]),
        "first",
    );
    synchronizer.register_producer(producer(&log, &[("b1", Outcome::Confirmed)]), "second");

    let result = synchronizer.synchronize();
    assert!(result.success);
    assert_eq!(
        log.lock().as_slice(),
        ["sync:a1", "done:a1", "sync:a2", "done:a2", "sync:b1", "done:b1"]
    );
}

#[test]
fn empty_producer_does_not_affect_outcome() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut synchronizer = Synchronizer::new();
    synchronizer.register_producer(producer(&log, &[]), "empty");
    synchronizer.register_producer(producer(&log, &[("b1", Outcome::Confirmed)]), "likes");

    let result = synchronizer.synchronize();
    assert!(result.success);
    assert_eq!(result.attempted, 1);
    assert_eq!(log.lock().as_slice(), ["sync:b1", "done:b1"]);
}

#[test]
fn rejection_does_not_block_later_actions() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut synchronizer = Synchronizer::new();
    synchronizer.register_producer(
        producer(
            &log,
            &[("a1", Outcome::Rejected), ("a2", Outcome::Confirmed)],
        ),
        "first",
    );
    synchronizer.register_producer(producer(&log, &[("b1", Outcome::Confirmed)]), "second");

    let result = synchronizer.synchronize();
    assert!(!result.success);
    assert_eq!(result.rejected, 1);
    // Every action after the rejection was still attempted.
    assert_eq!(
        log.lock().as_slice(),
        ["sync:a1", "sync:a2", "done:a2", "sync:b1", "done:b1"]
    );
}

#[test]
fn on_success_runs_iff_synchronize_succeeded() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut synchronizer = Synchronizer::new();
    synchronizer.register_producer(
        producer(
            &log,
            &[
                ("ok", Outcome::Confirmed),
                ("rejected", Outcome::Rejected),
                ("flaky", Outcome::NetworkFailure),
            ],
        ),
        "mixed",
    );

    let _ = synchronizer.synchronize();

    let log = log.lock();
    assert!(log.contains(&"done:ok".to_string()));
    assert!(!log.contains(&"done:rejected".to_string()));
    assert!(!log.contains(&"done:flaky".to_string()));
}

/// The worked example: P1=[a1 ok, a2 rejected], P2=[b1 ok].
#[test]
fn mixed_pass_confirms_survivors_and_reports_failure() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut synchronizer = Synchronizer::new();
    synchronizer.register_producer(
        producer(
            &log,
            &[("a1", Outcome::Confirmed), ("a2", Outcome::Rejected)],
        ),
        "p1",
    );
    synchronizer.register_producer(producer(&log, &[("b1", Outcome::Confirmed)]), "p2");

    let result = synchronizer.synchronize();

    assert!(!result.success);
    assert_eq!(result.attempted, 3);
    assert_eq!(result.synced, 2);
    assert_eq!(result.rejected, 1);

    let log = log.lock();
    assert!(log.contains(&"done:a1".to_string()));
    assert!(log.contains(&"done:b1".to_string()));
    assert!(!log.contains(&"done:a2".to_string()));
}

#[test]
fn transient_failures_leave_later_producers_untouched_by_the_error() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut synchronizer = Synchronizer::new();
    synchronizer.register_producer(producer(&log, &[("a1", Outcome::NetworkFailure)]), "p1");
    synchronizer.register_producer(producer(&log, &[("b1", Outcome::Confirmed)]), "p2");

    let result = synchronizer.synchronize();
    assert!(!result.success);
    assert_eq!(result.failed, 1);
    assert_eq!(result.synced, 1);
}

/// Blocks inside `synchronize` until released, so a second pass can be
/// attempted while the first is mid-flight.
struct BlockingAction {
    started: mpsc::Sender<()>,
    release: Mutex<Option<mpsc::Receiver<()>>>,
}

impl SyncAction for BlockingAction {
    fn synchronize(&self) -> SyncResult<()> {
        self.started.send(()).expect("observer gone");
        if let Some(release) = self.release.lock().take() {
            release.recv().expect("release sender gone");
        }
        Ok(())
    }

    fn on_success(&self) {}
}

struct BlockingProducer {
    action: Mutex<Option<BlockingAction>>,
}

impl SyncProducer for BlockingProducer {
    fn pending_actions(&self) -> SyncResult<Vec<Box<dyn SyncAction>>> {
        Ok(self
            .action
            .lock()
            .take()
            .map(|action| Box::new(action) as Box<dyn SyncAction>)
            .into_iter()
            .collect())
    }
}

/// Overlapping passes are out of contract; the synchronizer refuses the
/// second one as a best effort instead of interleaving.
#[test]
fn overlapping_pass_is_refused() {
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();

    let mut synchronizer = Synchronizer::new();
    synchronizer.register_producer(
        BlockingProducer {
            action: Mutex::new(Some(BlockingAction {
                started: started_tx,
                release: Mutex::new(Some(release_rx)),
            })),
        },
        "slow",
    );
    let synchronizer = Arc::new(synchronizer);

    let background = {
        let synchronizer = Arc::clone(&synchronizer);
        std::thread::spawn(move || synchronizer.synchronize())
    };

    // Wait until the first pass is inside an action, then try to overlap.
    started_rx.recv().unwrap();
    let refused = synchronizer.synchronize();
    assert!(!refused.success);
    assert_eq!(refused.attempted, 0);

    release_tx.send(()).unwrap();
    let first = background.join().unwrap();
    assert!(first.success);
    assert_eq!(first.synced, 1);
}

proptest! {
    /// Producers are visited in registration order for any registration
    /// sequence, and actions in the order their producer yields them.
    #[test]
    fn any_registration_sequence_preserves_order(
        counts in proptest::collection::vec(0usize..4, 0..8)
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut synchronizer = Synchronizer::new();
        let mut expected = Vec::new();

        for (index, count) in counts.iter().enumerate() {
            let actions: Vec<(String, Outcome)> = (0..*count)
                .map(|i| (format!("p{index}-a{i}"), Outcome::Confirmed))
                .collect();
            for (name, _) in &actions {
                expected.push(format!("sync:{name}"));
                expected.push(format!("done:{name}"));
            }
            synchronizer.register_producer(
                ScriptedProducer { actions, log: Arc::clone(&log) },
                format!("p{index}"),
            );
        }

        let result = synchronizer.synchronize();
        prop_assert!(result.success);
        prop_assert_eq!(log.lock().clone(), expected);
    }
}
