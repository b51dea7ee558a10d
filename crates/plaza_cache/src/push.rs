//! Push-notification registration tokens awaiting upload.

use crate::adapter::Syncable;
use plaza_client::{ClientResult, SocialTransport};
use plaza_protocol::ActionRequest;
use plaza_store::{PendingQueue, RecordId, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A push-registration change awaiting upload.
///
/// Only the registration itself is synchronized here; delivery of push
/// notifications is handled entirely outside the SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PushRegistrationAction {
    /// Register a token for this device.
    Register {
        /// Platform registration token.
        registration_id: String,
    },
    /// Unregister a previously registered token.
    Unregister {
        /// Platform registration token.
        registration_id: String,
    },
}

impl Syncable for PushRegistrationAction {
    fn submit(&self, transport: &dyn SocialTransport) -> ClientResult<()> {
        let request = match self {
            PushRegistrationAction::Register { registration_id } => ActionRequest::RegisterPush {
                registration_id: registration_id.clone(),
            },
            PushRegistrationAction::Unregister { registration_id } => {
                ActionRequest::UnregisterPush {
                    registration_id: registration_id.clone(),
                }
            }
        };
        transport.submit(&request)
    }
}

/// Local storage for push-registration changes awaiting upload.
pub struct PushRegistrationStore {
    pub(crate) registrations: Arc<PendingQueue<PushRegistrationAction>>,
}

impl PushRegistrationStore {
    /// Creates an in-memory store.
    pub fn in_memory() -> Self {
        Self {
            registrations: Arc::new(PendingQueue::in_memory()),
        }
    }

    /// Opens a file-backed store under the given directory.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            registrations: Arc::new(PendingQueue::open(
                dir.join("pending_push_registrations.jsonl"),
            )?),
        })
    }

    /// Queues registration of a token.
    pub fn register(&self, registration_id: impl Into<String>) -> StoreResult<RecordId> {
        self.registrations.append(PushRegistrationAction::Register {
            registration_id: registration_id.into(),
        })
    }

    /// Queues removal of a token.
    pub fn unregister(&self, registration_id: impl Into<String>) -> StoreResult<RecordId> {
        self.registrations
            .append(PushRegistrationAction::Unregister {
                registration_id: registration_id.into(),
            })
    }

    /// Returns the number of changes awaiting upload.
    pub fn pending_count(&self) -> usize {
        self.registrations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_client::MockTransport;

    #[test]
    fn register_then_unregister() {
        let transport = MockTransport::new();

        PushRegistrationAction::Register {
            registration_id: "tok-1".into(),
        }
        .submit(&transport)
        .unwrap();
        PushRegistrationAction::Unregister {
            registration_id: "tok-1".into(),
        }
        .submit(&transport)
        .unwrap();

        let submissions = transport.submissions();
        assert_eq!(
            submissions[0],
            ActionRequest::RegisterPush {
                registration_id: "tok-1".into()
            }
        );
        assert_eq!(
            submissions[1],
            ActionRequest::UnregisterPush {
                registration_id: "tok-1".into()
            }
        );
    }
}
