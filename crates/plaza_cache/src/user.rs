//! Pending relationship changes with other users.

use crate::adapter::Syncable;
use plaza_client::{ClientResult, SocialTransport};
use plaza_protocol::{ActionRequest, RelationshipOperation};
use plaza_store::{PendingQueue, Record, RecordId, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A relationship change awaiting upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipAction {
    /// The other user.
    pub user_handle: String,
    /// The relationship change.
    pub operation: RelationshipOperation,
}

impl Syncable for RelationshipAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        transport.submit(&ActionRequest::Relationship {
            user_handle: self.user_handle.clone(),
            operation: self.operation,
        })
    }
}

/// Local storage for relationship changes awaiting upload.
pub struct UserCache {
    pub(crate) relationships: Arc<PendingQueue<RelationshipAction>>,
}

impl UserCache {
    /// Creates an in-memory cache.
    pub fn in_memory() -> Self {
        Self {
            relationships: Arc::new(PendingQueue::in_memory()),
        }
    }

    /// Opens a file-backed cache under the given directory.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            relationships: Arc::new(PendingQueue::open(dir.join("pending_relationships.jsonl"))?),
        })
    }

    /// Queues a relationship change.
    pub fn enqueue_relationship(
        &self,
        user_handle: impl Into<String>,
        operation: RelationshipOperation,
    ) -> StoreResult<RecordId> {
        self.relationships.append(RelationshipAction {
            user_handle: user_handle.into(),
            operation,
        })
    }

    /// Returns the relationship changes awaiting upload.
    pub fn pending_relationships(&self) -> StoreResult<Vec<Record<RelationshipAction>>> {
        self.relationships.pending()
    }

    /// Returns the number of changes awaiting upload.
    pub fn pending_count(&self) -> usize {
        self.relationships.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_client::MockTransport;

    #[test]
    fn submits_relationship_request() {
        let transport = MockTransport::new();
        RelationshipAction {
            user_handle: "u-1".into(),
            operation: RelationshipOperation::Block,
        }
        .submit(&transport)
        .unwrap();

        assert_eq!(
            transport.submissions()[0],
            ActionRequest::Relationship {
                user_handle: "u-1".into(),
                operation: RelationshipOperation::Block,
            }
        );
    }

    #[test]
    fn queues_in_order() {
        let cache = UserCache::in_memory();
        cache
            .enqueue_relationship("u-1", RelationshipOperation::Follow)
            .unwrap();
        cache
            .enqueue_relationship("u-2", RelationshipOperation::Unfollow)
            .unwrap();

        let pending = cache.pending_relationships().unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].item.user_handle, "u-1");
        assert_eq!(pending[1].item.user_handle, "u-2");
    }
}
