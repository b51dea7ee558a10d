//! Lightweight per-content user actions: likes, pins, hides, reports,
//! removals.

use crate::adapter::Syncable;
use plaza_client::{ClientResult, SocialTransport};
use plaza_protocol::{ActionRequest, ContentType, ReportReason};
use plaza_store::{PendingQueue, Record, RecordId, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A like or unlike of a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeAction {
    /// Content being (un)liked.
    pub content_handle: String,
    /// Target state: true to like, false to remove a like.
    pub liked: bool,
}

impl Syncable for LikeAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        let request = if self.liked {
            ActionRequest::AddLike {
                content_handle: self.content_handle.clone(),
            }
        } else {
            ActionRequest::RemoveLike {
                content_handle: self.content_handle.clone(),
            }
        };
        transport.submit(&request)
    }
}

/// A pin or unpin of a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinAction {
    /// Topic being (un)pinned.
    pub topic_handle: String,
    /// Target state: true to pin, false to remove a pin.
    pub pinned: bool,
}

impl Syncable for PinAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        let request = if self.pinned {
            ActionRequest::AddPin {
                topic_handle: self.topic_handle.clone(),
            }
        } else {
            ActionRequest::RemovePin {
                topic_handle: self.topic_handle.clone(),
            }
        };
        transport.submit(&request)
    }
}

/// Hides a topic from the following feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideTopicAction {
    /// Topic being hidden.
    pub topic_handle: String,
}

impl Syncable for HideTopicAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        transport.submit(&ActionRequest::HideTopic {
            topic_handle: self.topic_handle.clone(),
        })
    }
}

/// Reports content to the moderators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContentAction {
    /// Content being reported.
    pub content_handle: String,
    /// Reason for the report.
    pub reason: ReportReason,
}

impl Syncable for ReportContentAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        transport.submit(&ActionRequest::ReportContent {
            content_handle: self.content_handle.clone(),
            reason: self.reason,
        })
    }
}

/// Deletes owned content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRemovalAction {
    /// Content being removed.
    pub content_handle: String,
    /// Kind of content the handle refers to.
    pub content_type: ContentType,
}

impl Syncable for ContentRemovalAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        transport.submit(&ActionRequest::RemoveContent {
            content_handle: self.content_handle.clone(),
            content_type: self.content_type,
        })
    }
}

/// Local storage for lightweight user actions awaiting upload.
pub struct UserActionCache {
    pub(crate) likes: Arc<PendingQueue<LikeAction>>,
    pub(crate) pins: Arc<PendingQueue<PinAction>>,
    pub(crate) hides: Arc<PendingQueue<HideTopicAction>>,
    pub(crate) reports: Arc<PendingQueue<ReportContentAction>>,
    pub(crate) removals: Arc<PendingQueue<ContentRemovalAction>>,
}

impl UserActionCache {
    /// Creates an in-memory cache.
    pub fn in_memory() -> Self {
        Self {
            likes: Arc::new(PendingQueue::in_memory()),
            pins: Arc::new(PendingQueue::in_memory()),
            hides: Arc::new(PendingQueue::in_memory()),
            reports: Arc::new(PendingQueue::in_memory()),
            removals: Arc::new(PendingQueue::in_memory()),
        }
    }

    /// Opens a file-backed cache under the given directory.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            likes: Arc::new(PendingQueue::open(dir.join("pending_likes.jsonl"))?),
            pins: Arc::new(PendingQueue::open(dir.join("pending_pins.jsonl"))?),
            hides: Arc::new(PendingQueue::open(dir.join("pending_hides.jsonl"))?),
            reports: Arc::new(PendingQueue::open(dir.join("pending_reports.jsonl"))?),
            removals: Arc::new(PendingQueue::open(dir.join("pending_removals.jsonl"))?),
        })
    }

    /// Queues a like-state change for a piece of content.
    pub fn set_like(&self, content_handle: impl Into<String>, liked: bool) -> StoreResult<RecordId> {
        self.likes.append(LikeAction {
            content_handle: content_handle.into(),
            liked,
        })
    }

    /// Queues a pin-state change for a topic.
    pub fn set_pin(&self, topic_handle: impl Into<String>, pinned: bool) -> StoreResult<RecordId> {
        self.pins.append(PinAction {
            topic_handle: topic_handle.into(),
            pinned,
        })
    }

    /// Queues hiding a topic from the following feed.
    pub fn hide_topic(&self, topic_handle: impl Into<String>) -> StoreResult<RecordId> {
        self.hides.append(HideTopicAction {
            topic_handle: topic_handle.into(),
        })
    }

    /// Queues a content report.
    pub fn report_content(
        &self,
        content_handle: impl Into<String>,
        reason: ReportReason,
    ) -> StoreResult<RecordId> {
        self.reports.append(ReportContentAction {
            content_handle: content_handle.into(),
            reason,
        })
    }

    /// Queues deletion of owned content.
    pub fn remove_content(
        &self,
        content_handle: impl Into<String>,
        content_type: ContentType,
    ) -> StoreResult<RecordId> {
        self.removals.append(ContentRemovalAction {
            content_handle: content_handle.into(),
            content_type,
        })
    }

    /// Returns the like actions awaiting upload.
    pub fn pending_likes(&self) -> StoreResult<Vec<Record<LikeAction>>> {
        self.likes.pending()
    }

    /// Returns the number of actions awaiting upload across all queues.
    pub fn pending_count(&self) -> usize {
        self.likes.len()
            + self.pins.len()
            + self.hides.len()
            + self.reports.len()
            + self.removals.len()
    }
}
