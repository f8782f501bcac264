//! Data and view-state layer for a collection case tracker.
//!
//! # Overview
//! Everything a UI shell needs to run the tracker's five screens against
//! its REST backend: a typed API client, per-screen controllers, form
//! validation, and date/currency formatting. Rendering, routing and the
//! HTTP stack itself stay outside; the host supplies an [`HttpTransport`]
//! and a [`Notifier`] and draws whatever state the controllers expose.
//!
//! # Design
//! - `TrackerClient` is stateless — it holds only `base_url`. Each
//!   operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `ApiService` composes build → execute → parse over an injected
//!   transport; controllers are generic over that transport and fully
//!   testable with a scripted fake.
//! - Controllers absorb every server fault into a notification and a
//!   consistent screen state. List and detail refreshes carry a generation
//!   token so a superseded response can never clobber newer state.
//! - Money is `rust_decimal::Decimal` end to end and travels as strings on
//!   the wire; timestamps are `chrono::DateTime<Utc>`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod format;
pub mod http;
pub mod notify;
pub mod service;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::TrackerClient;
pub use controller::{
    CaseCreateController, CaseDetailController, CaseListController, ClientListController,
    DashboardController, DashboardStats, EditPhase, Redirect,
};
pub use error::ApiError;
pub use form::{CaseForm, ClientForm, FieldErrors, FormField};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use notify::{LogNotifier, NoticeLevel, Notifier};
pub use service::ApiService;
pub use types::{
    Case, CaseQuery, CaseSortKey, CaseStatus, CaseUpdate, Client, ClientUpdate, NewCase,
    NewClient, SortOrder,
};
