//! Content vocabulary shared across requests.

use serde::{Deserialize, Serialize};

/// The kind of content a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// A top-level topic (post).
    Topic,
    /// A comment on a topic.
    Comment,
    /// A reply to a comment.
    Reply,
}

impl ContentType {
    /// Returns the REST collection segment for this content type.
    pub fn collection(&self) -> &'static str {
        match self {
            ContentType::Topic => "topics",
            ContentType::Comment => "comments",
            ContentType::Reply => "replies",
        }
    }
}

/// Reason given when reporting content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    /// Unsolicited or repeated content.
    Spam,
    /// Harassment or bullying.
    Cyberbullying,
    /// Content endangering minors.
    ChildEndangerment,
    /// Offensive content.
    OffensiveContent,
    /// Copyright or trademark infringement.
    ContentInfringement,
    /// Anything not covered by the other reasons.
    Other,
}
