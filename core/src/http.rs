//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This separation keeps request construction and response
//! handling deterministic and easy to test against recorded payloads.
//!
//! Hosts that want a ready-made async pipeline implement [`HttpTransport`]
//! for whatever HTTP stack they ship with and hand it to
//! `ApiService`, which drives build → execute → parse end to end.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TrackerClient::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
///
/// `query` holds unencoded key/value pairs in the order they should appear on
/// the URL. Percent-encoding is the executor's job (every mainstream HTTP
/// client exposes a query-pair API that encodes for you); values such as the
/// `In Follow-up` status label contain characters that must not be spliced
/// into a URL raw.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `TrackerClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Failure to execute an `HttpRequest` at all: connection refused, DNS
/// failure, timeout. A response with an error status is *not* a transport
/// error — it parses into `ApiError::Http` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Executes `HttpRequest` values against a real network stack.
///
/// Implementations are expected to be cheap to clone (share their connection
/// pool) so services and controllers can each hold one.
#[allow(async_fn_in_trait)]
pub trait HttpTransport: Send + Sync + Clone {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
