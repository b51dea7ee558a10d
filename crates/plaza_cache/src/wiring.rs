//! Canonical producer registration.

use crate::adapter::QueueProducer;
use crate::activity::ActivityCache;
use crate::post::PostStore;
use crate::push::PushRegistrationStore;
use crate::user::UserCache;
use crate::user_action::UserActionCache;
use plaza_client::SocialTransport;
use plaza_store::StoreResult;
use plaza_sync::{SyncHandler, Synchronizer};
use std::path::Path;
use std::sync::Arc;

/// Producer labels, used for logging.
pub mod labels {
    /// New topics.
    pub const POSTS: &str = "posts";
    /// Comments and replies.
    pub const DISCUSSION: &str = "comments/replies";
    /// Edits to owned topics.
    pub const TOPIC_EDITS: &str = "topic edits";
    /// Like-state changes.
    pub const LIKES: &str = "likes";
    /// Pin-state changes.
    pub const PINS: &str = "pins";
    /// Hidden topics.
    pub const HIDDEN_TOPICS: &str = "hidden topics";
    /// Content reports.
    pub const REPORTED_CONTENT: &str = "reported content";
    /// Activity read markers.
    pub const NOTIFICATION_UPDATES: &str = "notification updates";
    /// Relationship changes.
    pub const USER_RELATIONS: &str = "user relations";
    /// Content removals.
    pub const REMOVALS: &str = "removals";
    /// Push-registration changes.
    pub const PUSH_REGISTRATIONS: &str = "push registrations";
}

/// Every local cache the SDK writes through.
pub struct CacheSet {
    /// Authored content awaiting upload.
    pub posts: PostStore,
    /// Lightweight per-content actions.
    pub user_actions: UserActionCache,
    /// Relationship changes.
    pub users: UserCache,
    /// Activity read markers.
    pub activities: ActivityCache,
    /// Push-registration changes.
    pub push: PushRegistrationStore,
}

impl CacheSet {
    /// Creates an in-memory cache set.
    pub fn in_memory() -> Self {
        Self {
            posts: PostStore::in_memory(),
            user_actions: UserActionCache::in_memory(),
            users: UserCache::in_memory(),
            activities: ActivityCache::in_memory(),
            push: PushRegistrationStore::in_memory(),
        }
    }

    /// Opens file-backed caches under the given directory.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            posts: PostStore::open(dir)?,
            user_actions: UserActionCache::open(dir)?,
            users: UserCache::open(dir)?,
            activities: ActivityCache::open(dir)?,
            push: PushRegistrationStore::open(dir)?,
        })
    }

    /// Returns the number of actions awaiting upload across all caches.
    pub fn pending_count(&self) -> usize {
        self.posts.pending_count()
            + self.user_actions.pending_count()
            + self.users.pending_count()
            + self.activities.pending_count()
            + self.push.pending_count()
    }
}

/// Registers a producer for every cache queue, in the canonical order.
///
/// Authored content uploads first so that follow-up actions referring to it
/// (likes on a fresh topic, for instance) find it on the server; the order
/// is otherwise observable through logs and nothing else should depend
/// on it.
pub fn register_standard_producers(
    synchronizer: &mut Synchronizer,
    caches: &CacheSet,
    transport: &Arc<dyn SocialTransport>,
) {
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.posts.posts), Arc::clone(transport)),
        labels::POSTS,
    );
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.posts.discussion), Arc::clone(transport)),
        labels::DISCUSSION,
    );
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.posts.edits), Arc::clone(transport)),
        labels::TOPIC_EDITS,
    );
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.user_actions.likes), Arc::clone(transport)),
        labels::LIKES,
    );
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.user_actions.pins), Arc::clone(transport)),
        labels::PINS,
    );
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.user_actions.hides), Arc::clone(transport)),
        labels::HIDDEN_TOPICS,
    );
    synchronizer.register_producer(
        QueueProducer::new(
            Arc::clone(&caches.user_actions.reports),
            Arc::clone(transport),
        ),
        labels::REPORTED_CONTENT,
    );
    synchronizer.register_producer(
        QueueProducer::new(
            Arc::clone(&caches.activities.read_markers),
            Arc::clone(transport),
        ),
        labels::NOTIFICATION_UPDATES,
    );
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.users.relationships), Arc::clone(transport)),
        labels::USER_RELATIONS,
    );
    synchronizer.register_producer(
        QueueProducer::new(
            Arc::clone(&caches.user_actions.removals),
            Arc::clone(transport),
        ),
        labels::REMOVALS,
    );
    synchronizer.register_producer(
        QueueProducer::new(Arc::clone(&caches.push.registrations), Arc::clone(transport)),
        labels::PUSH_REGISTRATIONS,
    );
}

/// Builds the handler an application hands to its background scheduler.
pub fn standard_sync_handler(
    caches: &CacheSet,
    transport: Arc<dyn SocialTransport>,
) -> SyncHandler {
    let mut synchronizer = Synchronizer::new();
    register_standard_producers(&mut synchronizer, caches, &transport);
    SyncHandler::new(synchronizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_client::MockTransport;

    #[test]
    fn registers_all_producers_in_canonical_order() {
        let caches = CacheSet::in_memory();
        let transport: Arc<dyn SocialTransport> = Arc::new(MockTransport::new());

        let mut synchronizer = Synchronizer::new();
        register_standard_producers(&mut synchronizer, &caches, &transport);

        assert_eq!(
            synchronizer.producer_labels(),
            [
                labels::POSTS,
                labels::DISCUSSION,
                labels::TOPIC_EDITS,
                labels::LIKES,
                labels::PINS,
                labels::HIDDEN_TOPICS,
                labels::REPORTED_CONTENT,
                labels::NOTIFICATION_UPDATES,
                labels::USER_RELATIONS,
                labels::REMOVALS,
                labels::PUSH_REGISTRATIONS,
            ]
        );
    }

    #[test]
    fn empty_caches_sync_successfully() {
        let caches = CacheSet::in_memory();
        let handler =
            standard_sync_handler(&caches, Arc::new(MockTransport::new()));
        assert!(handler.run());
    }
}
