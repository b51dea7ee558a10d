//! Activity-feed read markers awaiting upload.

use crate::adapter::Syncable;
use plaza_client::{ClientResult, SocialTransport};
use plaza_protocol::ActionRequest;
use plaza_store::{PendingQueue, RecordId, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Advances the server-side read marker of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReadAction {
    /// Most recent activity the user has seen.
    pub activity_handle: String,
}

impl Syncable for ActivityReadAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        transport.submit(&ActionRequest::MarkActivityRead {
            activity_handle: self.activity_handle.clone(),
        })
    }
}

/// Local storage for activity read markers awaiting upload.
pub struct ActivityCache {
    pub(crate) read_markers: Arc<PendingQueue<ActivityReadAction>>,
}

impl ActivityCache {
    /// Creates an in-memory cache.
    pub fn in_memory() -> Self {
        Self {
            read_markers: Arc::new(PendingQueue::in_memory()),
        }
    }

    /// Opens a file-backed cache under the given directory.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            read_markers: Arc::new(PendingQueue::open(dir.join("pending_read_markers.jsonl"))?),
        })
    }

    /// Queues a read-marker update.
    pub fn mark_read(&self, activity_handle: impl Into<String>) -> StoreResult<RecordId> {
        self.read_markers.append(ActivityReadAction {
            activity_handle: activity_handle.into(),
        })
    }

    /// Returns the number of updates awaiting upload.
    pub fn pending_count(&self) -> usize {
        self.read_markers.len()
    }
}
