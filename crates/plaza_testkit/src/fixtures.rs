//! Ready-made environments for synchronization tests.

use crate::fake_server::FakeSocialServer;
use plaza_cache::{standard_sync_handler, CacheSet};
use plaza_protocol::{ContentType, RelationshipOperation, ReportReason};
use plaza_store::StoreResult;
use plaza_sync::SyncHandler;
use std::sync::Arc;

/// A cache set wired to a fake server through the standard producers.
pub struct SyncFixture {
    /// The local caches.
    pub caches: CacheSet,
    /// The fake backend.
    pub server: Arc<FakeSocialServer>,
    /// Handler running passes against the fake backend.
    pub handler: SyncHandler,
}

impl SyncFixture {
    /// Creates a fixture with empty in-memory caches.
    pub fn new() -> Self {
        let caches = CacheSet::in_memory();
        let server = Arc::new(FakeSocialServer::new());
        let handler = standard_sync_handler(&caches, server.clone());
        Self {
            caches,
            server,
            handler,
        }
    }
}

impl Default for SyncFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Enqueues one representative action into every cache.
///
/// Returns the number of actions enqueued.
pub fn populate_caches(caches: &CacheSet) -> StoreResult<usize> {
    caches.posts.enqueue_post("First post", "written offline", None)?;
    caches.posts.enqueue_comment("topic-1", "nice one")?;
    caches.posts.enqueue_reply("comment-1", "agreed")?;
    caches
        .posts
        .enqueue_topic_edit("topic-1", "First post", "edited offline")?;
    caches.user_actions.set_like("topic-1", true)?;
    caches.user_actions.set_pin("topic-1", true)?;
    caches.user_actions.hide_topic("topic-2")?;
    caches
        .user_actions
        .report_content("comment-9", ReportReason::Spam)?;
    caches
        .user_actions
        .remove_content("reply-4", ContentType::Reply)?;
    caches
        .users
        .enqueue_relationship("user-2", RelationshipOperation::Follow)?;
    caches.activities.mark_read("activity-7")?;
    caches.push.register("push-token-1")?;

    Ok(caches.pending_count())
}
