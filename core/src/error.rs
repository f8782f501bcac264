//! Error types for the case tracker API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the status code
//! and the server's `{"detail": "..."}` message when the body carried one.
//! Controllers surface that detail to the user verbatim and fall back to a
//! generic message when it is absent.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `TrackerClient` parse methods and `ApiService` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested resource does not exist.
    #[error("resource not found")]
    NotFound { detail: Option<String> },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },

    /// The request never produced a response (connection refused, timeout).
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The human-readable message the server attached to a failed request,
    /// if it sent one. Used by controllers to prefer the server's wording
    /// over a generic fallback.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { detail } | ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True when the server reported the resource missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
