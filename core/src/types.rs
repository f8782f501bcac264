//! Domain DTOs for the case tracker API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently of
//! any server crate; integration tests catch schema drift. Monetary amounts
//! are `Decimal` (transmitted as decimal strings, never binary floats) and
//! timestamps are `DateTime<Utc>`. The server emits timestamps both with and
//! without a UTC offset, so deserialization goes through
//! [`crate::format::parse_timestamp`], which accepts either form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::de_timestamp;

/// Lifecycle state of a collection case. The wire labels are fixed strings
/// defined by the server; `In Follow-up` and `Partially Paid` contain spaces
/// and must never be rebuilt from variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    New,
    #[serde(rename = "In Follow-up")]
    InFollowUp,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Closed,
}

impl CaseStatus {
    /// Every status, in lifecycle order. Useful for filter dropdowns.
    pub const ALL: [CaseStatus; 4] = [
        CaseStatus::New,
        CaseStatus::InFollowUp,
        CaseStatus::PartiallyPaid,
        CaseStatus::Closed,
    ];

    /// The wire/display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::New => "New",
            CaseStatus::InFollowUp => "In Follow-up",
            CaseStatus::PartiallyPaid => "Partially Paid",
            CaseStatus::Closed => "Closed",
        }
    }

    /// Parses a wire label back into a status.
    pub fn parse(raw: &str) -> Option<CaseStatus> {
        CaseStatus::ALL.into_iter().find(|s| s.label() == raw)
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A client (debtor) as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// A collection case as returned by the API. Responses embed the owning
/// client record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub id: i64,
    pub client_id: i64,
    pub invoice_number: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub invoice_date: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub status: CaseStatus,
    pub follow_up_notes: Option<String>,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub updated_at: DateTime<Utc>,
    pub client: Client,
}

/// Request payload for creating a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Request payload for updating a client. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Request payload for creating a case. The server assigns status `New` on
/// creation regardless of input, so no status field exists here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCase {
    pub client_id: i64,
    pub invoice_number: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub invoice_date: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_notes: Option<String>,
}

/// Request payload for updating a case. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_notes: Option<String>,
}

/// Server-side sort key for case listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSortKey {
    #[default]
    CreatedAt,
    DueDate,
}

impl CaseSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseSortKey::CreatedAt => "created_at",
            CaseSortKey::DueDate => "due_date",
        }
    }
}

/// Sort direction for case listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for `GET /api/cases`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseQuery {
    pub skip: u32,
    pub limit: u32,
    pub status: Option<CaseStatus>,
    pub sort_by: CaseSortKey,
    pub order: SortOrder,
}

impl Default for CaseQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            status: None,
            sort_by: CaseSortKey::default(),
            order: SortOrder::default(),
        }
    }
}

impl CaseQuery {
    /// The query string as unencoded pairs, in the order the API documents
    /// them. `status` is appended only when a filter is active.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("skip".to_owned(), self.skip.to_string()),
            ("limit".to_owned(), self.limit.to_string()),
            ("sort_by".to_owned(), self.sort_by.as_str().to_owned()),
            ("order".to_owned(), self.order.as_str().to_owned()),
        ];
        if let Some(status) = self.status {
            pairs.push(("status".to_owned(), status.label().to_owned()));
        }
        pairs
    }
}
