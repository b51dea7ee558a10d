//! Generic adaptation of queued records into sync actions.

use plaza_client::{ClientResult, SocialTransport};
use plaza_store::{PendingQueue, Record};
use plaza_sync::{SyncAction, SyncProducer, SyncResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// A queued record that knows how to submit itself to the server.
///
/// Records are serializable so their queues can be file-backed.
pub trait Syncable: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Submits this record's operation through the transport.
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()>;
}

/// Bridges one queued record into the synchronization pass.
///
/// `synchronize` submits the record and folds network errors into the
/// rejected-vs-transient taxonomy; `on_success` discards the record from
/// its owning queue so it is never offered again.
pub struct QueueSyncAdapter<T: Syncable> {
    record: Record<T>,
    queue: Arc<PendingQueue<T>>,
    transport: Arc<dyn SocialTransport>,
}

impl<T: Syncable> SyncAction for QueueSyncAdapter<T> {
    fn synchronize(&self) -> SyncResult<()> {
        self.record.item.submit(self.transport.as_ref())?;
        Ok(())
    }

    fn on_success(&self) {
        match self.queue.remove(self.record.id) {
            Ok(_) => {}
            Err(err) => {
                // The action was confirmed; losing the removal means it may
                // be submitted again on the next pass.
                warn!(record = %self.record.id, error = %err, "failed to discard confirmed action");
            }
        }
    }
}

/// Yields one [`QueueSyncAdapter`] per pending record of a queue.
pub struct QueueProducer<T: Syncable> {
    queue: Arc<PendingQueue<T>>,
    transport: Arc<dyn SocialTransport>,
}

impl<T: Syncable> QueueProducer<T> {
    /// Creates a producer over the given queue.
    pub fn new(queue: Arc<PendingQueue<T>>, transport: Arc<dyn SocialTransport>) -> Self {
        Self { queue, transport }
    }
}

impl<T: Syncable> SyncProducer for QueueProducer<T> {
    fn pending_actions(&self) -> SyncResult<Vec<Box<dyn SyncAction>>> {
        Ok(self
            .queue
            .pending()?
            .into_iter()
            .map(|record| {
                Box::new(QueueSyncAdapter {
                    record,
                    queue: Arc::clone(&self.queue),
                    transport: Arc::clone(&self.transport),
                }) as Box<dyn SyncAction>
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_client::{ClientError, MockTransport};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        handle: String,
    }

    impl Syncable for TestRecord {
        fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
            transport.submit(&plaza_protocol::ActionRequest::AddLike {
                content_handle: self.handle.clone(),
            })
        }
    }

    fn setup() -> (Arc<PendingQueue<TestRecord>>, Arc<MockTransport>) {
        (
            Arc::new(PendingQueue::in_memory()),
            Arc::new(MockTransport::new()),
        )
    }

    #[test]
    fn produces_one_action_per_record() {
        let (queue, transport) = setup();
        queue.append(TestRecord { handle: "a".into() }).unwrap();
        queue.append(TestRecord { handle: "b".into() }).unwrap();

        let producer = QueueProducer::new(Arc::clone(&queue), transport.clone());
        let actions = producer.pending_actions().unwrap();
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn success_removes_record_from_queue() {
        let (queue, transport) = setup();
        queue.append(TestRecord { handle: "a".into() }).unwrap();

        let producer = QueueProducer::new(Arc::clone(&queue), transport.clone());
        let actions = producer.pending_actions().unwrap();

        actions[0].synchronize().unwrap();
        actions[0].on_success();

        assert!(queue.is_empty());
        assert_eq!(transport.submissions().len(), 1);
    }

    #[test]
    fn failure_keeps_record_queued() {
        let (queue, transport) = setup();
        queue.append(TestRecord { handle: "a".into() }).unwrap();
        transport.push_result(Err(ClientError::Network {
            message: "timeout".into(),
        }));

        let producer = QueueProducer::new(Arc::clone(&queue), transport.clone());
        let actions = producer.pending_actions().unwrap();

        let err = actions[0].synchronize().unwrap_err();
        assert!(!err.is_rejection());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn bad_request_maps_to_rejection() {
        let (queue, transport) = setup();
        queue.append(TestRecord { handle: "a".into() }).unwrap();
        transport.push_result(Err(ClientError::from_status(400, "bad handle")));

        let producer = QueueProducer::new(Arc::clone(&queue), transport.clone());
        let actions = producer.pending_actions().unwrap();

        let err = actions[0].synchronize().unwrap_err();
        assert!(err.is_rejection());
    }
}
