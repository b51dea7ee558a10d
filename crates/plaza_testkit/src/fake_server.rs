//! An in-memory stand-in for the social backend.

use parking_lot::Mutex;
use plaza_client::{ClientError, ClientResult, SocialTransport};
use plaza_protocol::{ActionRequest, RelationshipOperation, ReportReason};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Default)]
struct ServerState {
    topics: HashMap<String, (String, String)>,
    next_topic: u64,
    comment_count: u64,
    reply_count: u64,
    likes: HashSet<String>,
    pins: HashSet<String>,
    hidden: HashSet<String>,
    reports: Vec<(String, ReportReason)>,
    removed: HashSet<String>,
    following: HashSet<String>,
    blocked: HashSet<String>,
    read_marker: Option<String>,
    push_tokens: HashSet<String>,
}

/// An in-memory social backend behind [`SocialTransport`].
///
/// Applies submitted actions to a small state model so tests can assert on
/// outcomes instead of raw requests. Failure injection:
///
/// - [`set_online`](FakeSocialServer::set_online) simulates lost
///   connectivity (every submission fails transiently)
/// - [`fail_next`](FakeSocialServer::fail_next) fails the next N
///   submissions transiently, then recovers
/// - [`reject_handle`](FakeSocialServer::reject_handle) permanently rejects
///   any submission targeting the handle
#[derive(Default)]
pub struct FakeSocialServer {
    state: Mutex<ServerState>,
    offline: AtomicBool,
    fail_remaining: AtomicU32,
    rejected_handles: Mutex<HashSet<String>>,
    submissions: Mutex<Vec<ActionRequest>>,
}

impl FakeSocialServer {
    /// Creates an online server with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates connectivity: `false` makes every submission fail.
    pub fn set_online(&self, online: bool) {
        self.offline.store(!online, Ordering::SeqCst);
    }

    /// Fails the next `count` submissions with a transient error.
    pub fn fail_next(&self, count: u32) {
        self.fail_remaining.store(count, Ordering::SeqCst);
    }

    /// Permanently rejects submissions targeting the given handle.
    pub fn reject_handle(&self, handle: impl Into<String>) {
        self.rejected_handles.lock().insert(handle.into());
    }

    /// Returns every accepted submission, in arrival order.
    pub fn submissions(&self) -> Vec<ActionRequest> {
        self.submissions.lock().clone()
    }

    /// Number of published topics.
    pub fn topic_count(&self) -> usize {
        self.state.lock().topics.len()
    }

    /// Number of accepted comments.
    pub fn comment_count(&self) -> u64 {
        self.state.lock().comment_count
    }

    /// Number of accepted replies.
    pub fn reply_count(&self) -> u64 {
        self.state.lock().reply_count
    }

    /// Whether the signed-in user currently likes the content.
    pub fn has_like(&self, content_handle: &str) -> bool {
        self.state.lock().likes.contains(content_handle)
    }

    /// Whether the topic is currently pinned.
    pub fn has_pin(&self, topic_handle: &str) -> bool {
        self.state.lock().pins.contains(topic_handle)
    }

    /// Whether the topic is hidden from the following feed.
    pub fn is_hidden(&self, topic_handle: &str) -> bool {
        self.state.lock().hidden.contains(topic_handle)
    }

    /// Number of accepted content reports.
    pub fn report_count(&self) -> usize {
        self.state.lock().reports.len()
    }

    /// Whether the content has been removed.
    pub fn has_removed(&self, content_handle: &str) -> bool {
        self.state.lock().removed.contains(content_handle)
    }

    /// Whether the signed-in user follows the given user.
    pub fn is_following(&self, user_handle: &str) -> bool {
        self.state.lock().following.contains(user_handle)
    }

    /// Whether the given user is blocked.
    pub fn is_blocked(&self, user_handle: &str) -> bool {
        self.state.lock().blocked.contains(user_handle)
    }

    /// The current activity-feed read marker.
    pub fn read_marker(&self) -> Option<String> {
        self.state.lock().read_marker.clone()
    }

    /// Whether the push token is registered.
    pub fn has_push_token(&self, registration_id: &str) -> bool {
        self.state.lock().push_tokens.contains(registration_id)
    }

    fn apply(&self, action: &ActionRequest) {
        let mut state = self.state.lock();
        match action {
            ActionRequest::AddTopic { title, text, .. } => {
                state.next_topic += 1;
                let handle = format!("topic-{}", state.next_topic);
                state.topics.insert(handle, (title.clone(), text.clone()));
            }
            ActionRequest::AddComment { .. } => state.comment_count += 1,
            ActionRequest::AddReply { .. } => state.reply_count += 1,
            ActionRequest::UpdateTopic {
                topic_handle,
                title,
                text,
            } => {
                state
                    .topics
                    .insert(topic_handle.clone(), (title.clone(), text.clone()));
            }
            ActionRequest::AddLike { content_handle } => {
                state.likes.insert(content_handle.clone());
            }
            ActionRequest::RemoveLike { content_handle } => {
                state.likes.remove(content_handle);
            }
            ActionRequest::AddPin { topic_handle } => {
                state.pins.insert(topic_handle.clone());
            }
            ActionRequest::RemovePin { topic_handle } => {
                state.pins.remove(topic_handle);
            }
            ActionRequest::HideTopic { topic_handle } => {
                state.hidden.insert(topic_handle.clone());
            }
            ActionRequest::ReportContent {
                content_handle,
                reason,
            } => state.reports.push((content_handle.clone(), *reason)),
            ActionRequest::RemoveContent { content_handle, .. } => {
                state.removed.insert(content_handle.clone());
            }
            ActionRequest::Relationship {
                user_handle,
                operation,
            } => match operation {
                RelationshipOperation::Follow => {
                    state.following.insert(user_handle.clone());
                }
                RelationshipOperation::Unfollow => {
                    state.following.remove(user_handle);
                }
                RelationshipOperation::Block => {
                    state.blocked.insert(user_handle.clone());
                }
                RelationshipOperation::Unblock => {
                    state.blocked.remove(user_handle);
                }
                RelationshipOperation::AcceptFollowRequest
                | RelationshipOperation::RejectFollowRequest => {}
            },
            ActionRequest::MarkActivityRead { activity_handle } => {
                state.read_marker = Some(activity_handle.clone());
            }
            ActionRequest::RegisterPush { registration_id } => {
                state.push_tokens.insert(registration_id.clone());
            }
            ActionRequest::UnregisterPush { registration_id } => {
                state.push_tokens.remove(registration_id);
            }
        }
    }
}

/// The handle a submission targets, for rejection matching.
fn target_handle(action: &ActionRequest) -> Option<&str> {
    match action {
        ActionRequest::AddTopic { .. } => None,
        ActionRequest::AddComment { topic_handle, .. }
        | ActionRequest::UpdateTopic { topic_handle, .. }
        | ActionRequest::AddPin { topic_handle }
        | ActionRequest::RemovePin { topic_handle }
        | ActionRequest::HideTopic { topic_handle } => Some(topic_handle),
        ActionRequest::AddReply { comment_handle, .. } => Some(comment_handle),
        ActionRequest::AddLike { content_handle }
        | ActionRequest::RemoveLike { content_handle }
        | ActionRequest::ReportContent { content_handle, .. }
        | ActionRequest::RemoveContent { content_handle, .. } => Some(content_handle),
        ActionRequest::Relationship { user_handle, .. } => Some(user_handle),
        ActionRequest::MarkActivityRead { activity_handle } => Some(activity_handle),
        ActionRequest::RegisterPush { registration_id }
        | ActionRequest::UnregisterPush { registration_id } => Some(registration_id),
    }
}

impl SocialTransport for FakeSocialServer {
    fn submit(&self, action: &ActionRequest) -> ClientResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::Network {
                message: "server unreachable".into(),
            });
        }

        if self.fail_remaining.load(Ordering::SeqCst) > 0 {
            self.fail_remaining.fetch_sub(1, Ordering::SeqCst);
            return Err(ClientError::Network {
                message: "injected failure".into(),
            });
        }

        if let Some(handle) = target_handle(action) {
            if self.rejected_handles.lock().contains(handle) {
                return Err(ClientError::from_status(
                    400,
                    format!("handle {handle} refused"),
                ));
            }
        }

        self.apply(action);
        self.submissions.lock().push(action.clone());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.offline.load(Ordering::SeqCst)
    }
}
