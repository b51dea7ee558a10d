//! Replayable user actions and their REST endpoints.

use crate::content::{ContentType, ReportReason};
use crate::relationship::RelationshipOperation;
use serde_json::{json, Value};

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// The HTTP method and path a request maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the API base URL.
    pub path: String,
}

impl Endpoint {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// A user operation the SDK can submit to the server.
///
/// Each variant corresponds to one REST call. Identities are opaque handle
/// strings issued by the server; the client never interprets them.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    /// Publish a new topic.
    AddTopic {
        /// Topic title.
        title: String,
        /// Topic body text.
        text: String,
        /// Handle of an uploaded image blob, if any.
        blob_handle: Option<String>,
    },
    /// Add a comment to a topic.
    AddComment {
        /// Topic being commented on.
        topic_handle: String,
        /// Comment text.
        text: String,
    },
    /// Add a reply to a comment.
    AddReply {
        /// Comment being replied to.
        comment_handle: String,
        /// Reply text.
        text: String,
    },
    /// Update the title and text of an owned topic.
    UpdateTopic {
        /// Topic to update.
        topic_handle: String,
        /// New title.
        title: String,
        /// New body text.
        text: String,
    },
    /// Like a piece of content.
    AddLike {
        /// Content being liked.
        content_handle: String,
    },
    /// Remove a previous like.
    RemoveLike {
        /// Content being unliked.
        content_handle: String,
    },
    /// Pin a topic to the user's profile.
    AddPin {
        /// Topic being pinned.
        topic_handle: String,
    },
    /// Remove a previous pin.
    RemovePin {
        /// Topic being unpinned.
        topic_handle: String,
    },
    /// Hide a topic from the user's following feed.
    HideTopic {
        /// Topic being hidden.
        topic_handle: String,
    },
    /// Report content to the moderators.
    ReportContent {
        /// Content being reported.
        content_handle: String,
        /// Reason for the report.
        reason: ReportReason,
    },
    /// Delete owned content.
    RemoveContent {
        /// Content being removed.
        content_handle: String,
        /// Kind of content the handle refers to.
        content_type: ContentType,
    },
    /// Change the relationship with another user.
    Relationship {
        /// The other user.
        user_handle: String,
        /// The relationship change.
        operation: RelationshipOperation,
    },
    /// Advance the activity-feed read marker.
    MarkActivityRead {
        /// Most recent activity the user has seen.
        activity_handle: String,
    },
    /// Register a push-notification token for this device.
    RegisterPush {
        /// Platform registration token.
        registration_id: String,
    },
    /// Unregister a previously registered push token.
    UnregisterPush {
        /// Platform registration token.
        registration_id: String,
    },
}

impl ActionRequest {
    /// Returns the REST endpoint this request is sent to.
    pub fn endpoint(&self) -> Endpoint {
        use HttpMethod::{Delete, Post, Put};

        match self {
            ActionRequest::AddTopic { .. } => Endpoint::new(Post, "/topics"),
            ActionRequest::AddComment { topic_handle, .. } => {
                Endpoint::new(Post, format!("/topics/{topic_handle}/comments"))
            }
            ActionRequest::AddReply { comment_handle, .. } => {
                Endpoint::new(Post, format!("/comments/{comment_handle}/replies"))
            }
            ActionRequest::UpdateTopic { topic_handle, .. } => {
                Endpoint::new(Put, format!("/topics/{topic_handle}"))
            }
            ActionRequest::AddLike { content_handle } => {
                Endpoint::new(Post, format!("/contents/{content_handle}/likes"))
            }
            ActionRequest::RemoveLike { content_handle } => {
                Endpoint::new(Delete, format!("/contents/{content_handle}/likes/me"))
            }
            ActionRequest::AddPin { .. } => Endpoint::new(Post, "/users/me/pins"),
            ActionRequest::RemovePin { topic_handle } => {
                Endpoint::new(Delete, format!("/users/me/pins/{topic_handle}"))
            }
            ActionRequest::HideTopic { topic_handle } => Endpoint::new(
                Delete,
                format!("/users/me/following/topics/{topic_handle}"),
            ),
            ActionRequest::ReportContent { content_handle, .. } => {
                Endpoint::new(Post, format!("/contents/{content_handle}/reports"))
            }
            ActionRequest::RemoveContent {
                content_handle,
                content_type,
            } => Endpoint::new(
                Delete,
                format!("/{}/{content_handle}", content_type.collection()),
            ),
            ActionRequest::Relationship {
                user_handle,
                operation,
            } => match operation {
                RelationshipOperation::Follow => {
                    Endpoint::new(Post, "/users/me/following/users")
                }
                RelationshipOperation::Unfollow => {
                    Endpoint::new(Delete, format!("/users/me/following/users/{user_handle}"))
                }
                RelationshipOperation::Block => Endpoint::new(Post, "/users/me/blocked_users"),
                RelationshipOperation::Unblock => {
                    Endpoint::new(Delete, format!("/users/me/blocked_users/{user_handle}"))
                }
                RelationshipOperation::AcceptFollowRequest => {
                    Endpoint::new(Post, "/users/me/followers")
                }
                RelationshipOperation::RejectFollowRequest => {
                    Endpoint::new(Delete, format!("/users/me/pending_users/{user_handle}"))
                }
            },
            ActionRequest::MarkActivityRead { .. } => {
                Endpoint::new(Put, "/users/me/notifications/status")
            }
            ActionRequest::RegisterPush { registration_id } => Endpoint::new(
                Put,
                format!("/users/me/push_registrations/{registration_id}"),
            ),
            ActionRequest::UnregisterPush { registration_id } => Endpoint::new(
                Delete,
                format!("/users/me/push_registrations/{registration_id}"),
            ),
        }
    }

    /// Returns the JSON body of the request, if the endpoint takes one.
    ///
    /// Requests whose payload is fully encoded in the path return `None`.
    pub fn body(&self) -> Option<Value> {
        match self {
            ActionRequest::AddTopic {
                title,
                text,
                blob_handle,
            } => {
                let mut body = json!({ "title": title, "text": text });
                if let Some(blob) = blob_handle {
                    body["blobHandle"] = json!(blob);
                }
                Some(body)
            }
            ActionRequest::AddComment { text, .. } | ActionRequest::AddReply { text, .. } => {
                Some(json!({ "text": text }))
            }
            ActionRequest::UpdateTopic { title, text, .. } => {
                Some(json!({ "title": title, "text": text }))
            }
            ActionRequest::AddPin { topic_handle } => {
                Some(json!({ "topicHandle": topic_handle }))
            }
            ActionRequest::ReportContent { reason, .. } => Some(json!({ "reason": reason })),
            ActionRequest::Relationship {
                user_handle,
                operation,
            } => match operation {
                RelationshipOperation::Follow
                | RelationshipOperation::Block
                | RelationshipOperation::AcceptFollowRequest => {
                    Some(json!({ "userHandle": user_handle }))
                }
                _ => None,
            },
            ActionRequest::MarkActivityRead { activity_handle } => {
                Some(json!({ "readActivityHandle": activity_handle }))
            }
            _ => None,
        }
    }
}
