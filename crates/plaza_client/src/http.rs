//! HTTP transport implementation.
//!
//! The actual HTTP client is abstracted via a trait so different
//! implementations (reqwest, ureq, platform stacks, test stubs) can be
//! plugged in without this crate depending on any of them.

use crate::error::{ClientError, ClientResult};
use crate::transport::SocialTransport;
use parking_lot::RwLock;
use plaza_protocol::{ActionRequest, HttpMethod};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// A plain HTTP request, ready for a client to execute.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Value for the `Authorization` header, if a session is active.
    pub authorization: Option<String>,
    /// JSON request body, if the endpoint takes one.
    pub body: Option<Vec<u8>>,
}

/// A plain HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns the body as text for error reporting.
    pub fn message(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP stack. Errors are
/// transport-level only (connection refused, timeout); any response the
/// server produced, whatever its status, is returned as an [`HttpResponse`].
pub trait HttpClient: Send + Sync {
    /// Executes a request and returns the server's response.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// REST transport for the Plaza API.
///
/// Encodes [`ActionRequest`]s as JSON, attaches the session authorization
/// header, and maps response statuses to [`ClientError`]s.
pub struct RestTransport<C: HttpClient> {
    base_url: String,
    client: C,
    authorization: RwLock<Option<String>>,
    connected: AtomicBool,
}

impl<C: HttpClient> RestTransport<C> {
    /// Creates a transport against the given API base URL.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            authorization: RwLock::new(None),
            connected: AtomicBool::new(true),
        }
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets or clears the session authorization token.
    pub fn set_authorization(&self, token: Option<String>) {
        *self.authorization.write() = token;
    }

    fn submit_request(&self, action: &ActionRequest) -> ClientResult<()> {
        let endpoint = action.endpoint();
        let body = match action.body() {
            Some(value) => Some(serde_json::to_vec(&value)?),
            None => None,
        };

        let request = HttpRequest {
            method: endpoint.method,
            url: format!("{}{}", self.base_url, endpoint.path),
            authorization: self.authorization.read().clone(),
            body,
        };

        debug!(method = request.method.as_str(), url = %request.url, "submitting request");

        let response = self.client.execute(request).map_err(|message| {
            self.connected.store(false, Ordering::SeqCst);
            ClientError::Network { message }
        })?;

        self.connected.store(true, Ordering::SeqCst);

        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(ClientError::from_status(response.status, response.message()))
        }
    }
}

impl<C: HttpClient> SocialTransport for RestTransport<C> {
    fn submit(&self, action: &ActionRequest) -> ClientResult<()> {
        self.submit_request(action)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Records requests and replays canned responses.
    struct StubClient {
        requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<Vec<Result<HttpResponse, String>>>,
    }

    impl StubClient {
        fn new(responses: Vec<Result<HttpResponse, String>>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(responses),
            }
        }

        fn ok() -> Self {
            Self::new(vec![])
        }
    }

    impl HttpClient for StubClient {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, String> {
            self.requests.lock().push(request);
            self.responses.lock().pop().unwrap_or(Ok(HttpResponse {
                status: 204,
                body: Vec::new(),
            }))
        }
    }

    fn like(handle: &str) -> ActionRequest {
        ActionRequest::AddLike {
            content_handle: handle.into(),
        }
    }

    #[test]
    fn builds_url_from_base_and_endpoint() {
        let transport = RestTransport::new("https://api.plaza.example/v0.9", StubClient::ok());
        transport.submit(&like("c-1")).unwrap();

        let requests = transport.client.requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://api.plaza.example/v0.9/contents/c-1/likes");
        assert_eq!(requests[0].method, HttpMethod::Post);
    }

    #[test]
    fn attaches_authorization_header() {
        let transport = RestTransport::new("https://api.plaza.example", StubClient::ok());
        transport.set_authorization(Some("Bearer session-token".into()));
        transport.submit(&like("c-1")).unwrap();

        let requests = transport.client.requests.lock();
        assert_eq!(
            requests[0].authorization.as_deref(),
            Some("Bearer session-token")
        );
    }

    #[test]
    fn encodes_json_body() {
        let transport = RestTransport::new("https://api.plaza.example", StubClient::ok());
        transport
            .submit(&ActionRequest::AddPin {
                topic_handle: "t-1".into(),
            })
            .unwrap();

        let requests = transport.client.requests.lock();
        let body: serde_json::Value =
            serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["topicHandle"], "t-1");
    }

    #[test]
    fn maps_status_to_error_class() {
        let transport = RestTransport::new(
            "https://api.plaza.example",
            StubClient::new(vec![Ok(HttpResponse {
                status: 400,
                body: b"invalid handle".to_vec(),
            })]),
        );

        let err = transport.submit(&like("c-1")).unwrap_err();
        assert!(matches!(err, ClientError::BadRequest { .. }));
        assert!(err.is_rejection());
    }

    #[test]
    fn transport_failure_marks_disconnected() {
        let transport = RestTransport::new(
            "https://api.plaza.example",
            StubClient::new(vec![Err("connection refused".into())]),
        );

        let err = transport.submit(&like("c-1")).unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));
        assert!(!transport.is_connected());

        // A later success flips the flag back.
        transport.submit(&like("c-2")).unwrap();
        assert!(transport.is_connected());
    }
}
