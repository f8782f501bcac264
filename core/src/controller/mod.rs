//! View-state controllers for the five screens of the tracker UI.
//!
//! # Design
//! Each controller owns the full state of one screen and exposes the actions
//! the presentation layer can take on it. Controllers talk to the server
//! through an injected [`crate::service::ApiService`] and report outcomes
//! through an injected [`crate::notify::Notifier`]; navigation is returned
//! as a [`Redirect`] value instead of performed, so the crate stays free of
//! any UI or router dependency.
//!
//! Errors stop at this layer. Every fault ends in a user-facing notification
//! (preferring the server's own `detail` message where the screen shows it)
//! and a consistent controller state; nothing propagates to the caller.
//!
//! The list and detail screens guard against out-of-order responses with a
//! refresh token: mutating the screen's parameters invalidates in-flight
//! fetches, and applying a stale outcome is a no-op. The token dance is
//! split into `start_* / fetch / apply` so hosts with their own scheduling
//! can drive it directly; the `async` convenience methods compose the three
//! steps.

mod case_create;
mod case_detail;
mod case_list;
mod client_list;
mod dashboard;

pub use case_create::CaseCreateController;
pub use case_detail::{CaseDetailController, DetailOutcome, DetailRefresh, EditPhase};
pub use case_list::{CaseListController, ListOutcome, ListRefresh};
pub use client_list::ClientListController;
pub use dashboard::{DashboardController, DashboardStats};

/// Navigation requested by a controller action. The presentation layer is
/// expected to honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    CaseList,
}
