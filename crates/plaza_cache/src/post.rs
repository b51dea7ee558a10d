//! Pending posts, comments, replies and topic edits.

use crate::adapter::Syncable;
use plaza_client::{ClientResult, SocialTransport};
use plaza_protocol::ActionRequest;
use plaza_store::{PendingQueue, Record, RecordId, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A topic composed offline, awaiting publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPost {
    /// Topic title.
    pub title: String,
    /// Topic body text.
    pub text: String,
    /// Handle of an already-uploaded image blob, if any.
    pub blob_handle: Option<String>,
}

impl Syncable for PendingPost {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        transport.submit(&ActionRequest::AddTopic {
            title: self.title.clone(),
            text: self.text.clone(),
            blob_handle: self.blob_handle.clone(),
        })
    }
}

/// A comment or reply composed offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingDiscussionItem {
    /// A comment on a topic.
    Comment {
        /// Topic being commented on.
        topic_handle: String,
        /// Comment text.
        text: String,
    },
    /// A reply to a comment.
    Reply {
        /// Comment being replied to.
        comment_handle: String,
        /// Reply text.
        text: String,
    },
}

impl Syncable for PendingDiscussionItem {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        let request = match self {
            PendingDiscussionItem::Comment { topic_handle, text } => ActionRequest::AddComment {
                topic_handle: topic_handle.clone(),
                text: text.clone(),
            },
            PendingDiscussionItem::Reply {
                comment_handle,
                text,
            } => ActionRequest::AddReply {
                comment_handle: comment_handle.clone(),
                text: text.clone(),
            },
        };
        transport.submit(&request)
    }
}

/// An edit to an owned topic, awaiting upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTopicEdit {
    /// Topic being edited.
    pub topic_handle: String,
    /// New title.
    pub title: String,
    /// New body text.
    pub text: String,
}

impl Syncable for PendingTopicEdit {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        transport.submit(&ActionRequest::UpdateTopic {
            topic_handle: self.topic_handle.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
        })
    }
}

/// Local storage for authored content awaiting upload.
pub struct PostStore {
    pub(crate) posts: Arc<PendingQueue<PendingPost>>,
    pub(crate) discussion: Arc<PendingQueue<PendingDiscussionItem>>,
    pub(crate) edits: Arc<PendingQueue<PendingTopicEdit>>,
}

impl PostStore {
    /// Creates an in-memory store.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(PendingQueue::in_memory()),
            discussion: Arc::new(PendingQueue::in_memory()),
            edits: Arc::new(PendingQueue::in_memory()),
        }
    }

    /// Opens a file-backed store under the given directory.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            posts: Arc::new(PendingQueue::open(dir.join("pending_posts.jsonl"))?),
            discussion: Arc::new(PendingQueue::open(dir.join("pending_discussion.jsonl"))?),
            edits: Arc::new(PendingQueue::open(dir.join("pending_topic_edits.jsonl"))?),
        })
    }

    /// Queues a new topic for publication.
    pub fn enqueue_post(
        &self,
        title: impl Into<String>,
        text: impl Into<String>,
        blob_handle: Option<String>,
    ) -> StoreResult<RecordId> {
        self.posts.append(PendingPost {
            title: title.into(),
            text: text.into(),
            blob_handle,
        })
    }

    /// Queues a comment on a topic.
    pub fn enqueue_comment(
        &self,
        topic_handle: impl Into<String>,
        text: impl Into<String>,
    ) -> StoreResult<RecordId> {
        self.discussion.append(PendingDiscussionItem::Comment {
            topic_handle: topic_handle.into(),
            text: text.into(),
        })
    }

    /// Queues a reply to a comment.
    pub fn enqueue_reply(
        &self,
        comment_handle: impl Into<String>,
        text: impl Into<String>,
    ) -> StoreResult<RecordId> {
        self.discussion.append(PendingDiscussionItem::Reply {
            comment_handle: comment_handle.into(),
            text: text.into(),
        })
    }

    /// Queues an edit of an owned topic.
    pub fn enqueue_topic_edit(
        &self,
        topic_handle: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> StoreResult<RecordId> {
        self.edits.append(PendingTopicEdit {
            topic_handle: topic_handle.into(),
            title: title.into(),
            text: text.into(),
        })
    }

    /// Returns the posts awaiting publication.
    pub fn pending_posts(&self) -> StoreResult<Vec<Record<PendingPost>>> {
        self.posts.pending()
    }

    /// Returns the number of items awaiting upload across all queues.
    pub fn pending_count(&self) -> usize {
        self.posts.len() + self.discussion.len() + self.edits.len()
    }
}
