//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use hoteldesk_transport::{ApiRequest, ApiResponse, Headers, HttpTransport, TransportError};

/// Records every request and answers from a queue of scripted responses.
/// With the queue empty it answers `200 {"success": true}`.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    on_send: Mutex<Option<Box<dyn Fn() + Send>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: serde_json::Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            headers: Headers::new(),
            body: body.as_bytes().to_vec(),
        }));
    }

    pub(crate) fn fail(&self, error: TransportError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Runs `hook` while each request is "on the wire", after it was
    /// recorded and before its reply is returned.
    pub(crate) fn on_send(&self, hook: impl Fn() + Send + 'static) {
        *self.on_send.lock().unwrap() = Some(Box::new(hook));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        if let Some(hook) = self.on_send.lock().unwrap().as_ref() {
            hook();
        }
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(ApiResponse {
                status: 200,
                headers: Headers::new(),
                body: br#"{"success": true}"#.to_vec(),
            })
        })
    }
}
