//! Transport abstraction for submitting user actions.

use crate::error::{ClientError, ClientResult};
use parking_lot::Mutex;
use plaza_protocol::ActionRequest;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// A transport that delivers user actions to the social backend.
///
/// This trait is the seam between the offline layers of the SDK and the
/// network: the synchronization machinery only ever talks to the server
/// through it. Implementations include the REST transport and test fakes.
pub trait SocialTransport: Send + Sync {
    /// Submits one action to the server.
    fn submit(&self, action: &ActionRequest) -> ClientResult<()>;

    /// Returns the last-known connectivity state.
    fn is_connected(&self) -> bool;
}

/// A mock transport for testing.
///
/// Records every submission attempt. Results can be scripted per call with
/// [`MockTransport::push_result`]; when the script is exhausted, submissions
/// succeed.
#[derive(Default)]
pub struct MockTransport {
    connected: AtomicBool,
    script: Mutex<VecDeque<ClientResult<()>>>,
    submissions: Mutex<Vec<ActionRequest>>,
}

impl MockTransport {
    /// Creates a connected mock transport.
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            script: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Queues the result for the next unscripted submission.
    pub fn push_result(&self, result: ClientResult<()>) {
        self.script.lock().push_back(result);
    }

    /// Sets the connectivity state.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Returns all submission attempts so far, in order.
    pub fn submissions(&self) -> Vec<ActionRequest> {
        self.submissions.lock().clone()
    }
}

impl SocialTransport for MockTransport {
    fn submit(&self, action: &ActionRequest) -> ClientResult<()> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }
        self.submissions.lock().push(action.clone());
        self.script.lock().pop_front().unwrap_or(Ok(()))
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
