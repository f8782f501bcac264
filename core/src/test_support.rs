//! Shared fakes for unit tests: a scripted transport and a recording
//! notifier.

use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::notify::{NoticeLevel, Notifier};

#[derive(Debug)]
struct Stub {
    method: HttpMethod,
    path: String,
    status: u16,
    body: String,
}

#[derive(Debug, Default)]
struct FakeInner {
    stubs: Vec<Stub>,
    requests: Vec<HttpRequest>,
    fail_message: Option<String>,
}

/// In-memory transport scripted with canned responses. Records every
/// request it executes so tests can assert on call counts and query pairs.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stub(
        &self,
        method: HttpMethod,
        path: &str,
        status: u16,
        body: impl Into<String>,
    ) {
        self.inner.lock().unwrap().stubs.push(Stub {
            method,
            path: path.to_string(),
            status,
            body: body.into(),
        });
    }

    /// Every subsequent request fails at the transport level.
    pub(crate) fn fail_with(&self, message: &str) {
        self.inner.lock().unwrap().fail_message = Some(message.to_string());
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub(crate) fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl HttpTransport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.clone());
        if let Some(message) = &inner.fail_message {
            return Err(TransportError::new(message.clone()));
        }
        // Most recent stub wins, so tests can re-stub a route mid-flow.
        let stub = inner
            .stubs
            .iter()
            .rev()
            .find(|s| s.method == request.method && s.path == request.path)
            .unwrap_or_else(|| panic!("no stub for {:?} {}", request.method, request.path));
        Ok(HttpResponse {
            status: stub.status,
            headers: Vec::new(),
            body: stub.body.clone(),
        })
    }
}

/// Notifier that records every message for later assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> Option<(NoticeLevel, String)> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }
}

/// JSON body for a client record, matching the server's response schema.
pub(crate) fn client_body(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": null,
        "phone": null,
        "company": null,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

/// JSON body for a case record with its embedded client.
pub(crate) fn case_body(
    id: i64,
    client_id: i64,
    client_name: &str,
    invoice_number: &str,
    status: &str,
    amount: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "client_id": client_id,
        "invoice_number": invoice_number,
        "invoice_date": "2024-03-01T00:00:00Z",
        "due_date": "2024-03-31T00:00:00Z",
        "amount": amount,
        "status": status,
        "follow_up_notes": null,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-01T10:00:00Z",
        "client": client_body(client_id, client_name)
    })
}
