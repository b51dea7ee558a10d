//! User relationship operations.

use serde::{Deserialize, Serialize};

/// A change to the relationship between the signed-in user and another user.
///
/// Relationship changes are queued locally and replayed against the server,
/// so the set of operations mirrors what the REST API accepts one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipOperation {
    /// Start following the user.
    Follow,
    /// Stop following the user.
    Unfollow,
    /// Block the user.
    Block,
    /// Unblock the user.
    Unblock,
    /// Accept the user's pending follow request.
    AcceptFollowRequest,
    /// Reject the user's pending follow request.
    RejectFollowRequest,
}

impl RelationshipOperation {
    /// Returns true if the operation creates or confirms a relationship.
    pub fn is_additive(&self) -> bool {
        matches!(
            self,
            RelationshipOperation::Follow
                | RelationshipOperation::Block
                | RelationshipOperation::AcceptFollowRequest
        )
    }
}
