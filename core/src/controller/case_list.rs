//! Controller for the case list screen: server-side filter and sort,
//! client-side search, and row deletion.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::notify::{NoticeLevel, Notifier};
use crate::service::ApiService;
use crate::types::{Case, CaseQuery, CaseSortKey, CaseStatus, Client, SortOrder};

const PAGE_LIMIT: u32 = 100;

/// Token for one refresh of the list. Captures the query as of
/// [`CaseListController::start_refresh`] together with the generation used
/// to detect staleness.
#[derive(Debug, Clone)]
pub struct ListRefresh {
    generation: u64,
    query: CaseQuery,
}

/// Fetched data for one [`ListRefresh`], to be handed back to
/// [`CaseListController::apply`].
#[derive(Debug)]
pub struct ListOutcome {
    generation: u64,
    result: Result<(Vec<Case>, Vec<Client>), ApiError>,
}

/// State of the case list screen.
///
/// Cases and clients are fetched together so every row can show its client's
/// name; the search box then narrows the fetched rows locally without
/// another round-trip.
pub struct CaseListController<T: HttpTransport> {
    api: ApiService<T>,
    notifier: Arc<dyn Notifier>,
    cases: Vec<Case>,
    clients_by_id: HashMap<i64, Client>,
    search: String,
    status_filter: Option<CaseStatus>,
    sort_by: CaseSortKey,
    order: SortOrder,
    loading: bool,
    generation: u64,
    pending_delete: Option<i64>,
}

impl<T: HttpTransport> CaseListController<T> {
    pub fn new(api: ApiService<T>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            cases: Vec::new(),
            clients_by_id: HashMap::new(),
            search: String::new(),
            status_filter: None,
            sort_by: CaseSortKey::default(),
            order: SortOrder::default(),
            loading: false,
            generation: 0,
            pending_delete: None,
        }
    }

    /// Begins a refresh: bumps the generation (invalidating any in-flight
    /// fetch) and snapshots the current query.
    pub fn start_refresh(&mut self) -> ListRefresh {
        self.generation += 1;
        self.loading = true;
        ListRefresh {
            generation: self.generation,
            query: self.current_query(),
        }
    }

    /// Fetches cases and clients concurrently. A failure of either aborts
    /// the refresh as a whole.
    pub async fn fetch(&self, refresh: &ListRefresh) -> ListOutcome {
        let result = futures::try_join!(
            self.api.list_cases(&refresh.query),
            self.api.list_clients(0, PAGE_LIMIT),
        );
        ListOutcome {
            generation: refresh.generation,
            result,
        }
    }

    /// Applies a fetch outcome. Returns `false` when the outcome belonged
    /// to a superseded refresh and was discarded; the newest refresh is
    /// still in flight in that situation, so `loading` stays set.
    pub fn apply(&mut self, outcome: ListOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding out-of-date case list response"
            );
            return false;
        }
        self.loading = false;
        match outcome.result {
            Ok((cases, clients)) => {
                debug!(cases = cases.len(), clients = clients.len(), "case list loaded");
                self.clients_by_id = clients.into_iter().map(|c| (c.id, c)).collect();
                self.cases = cases;
            }
            Err(err) => {
                warn!(error = %err, "case list refresh failed");
                self.notifier.notify(NoticeLevel::Error, "Failed to load cases");
            }
        }
        true
    }

    /// Runs a whole refresh in one call.
    pub async fn refresh(&mut self) {
        let refresh = self.start_refresh();
        let outcome = self.fetch(&refresh).await;
        self.apply(outcome);
    }

    pub async fn set_status_filter(&mut self, filter: Option<CaseStatus>) {
        self.status_filter = filter;
        self.refresh().await;
    }

    pub async fn set_sort_by(&mut self, sort_by: CaseSortKey) {
        self.sort_by = sort_by;
        self.refresh().await;
    }

    pub async fn set_order(&mut self, order: SortOrder) {
        self.order = order;
        self.refresh().await;
    }

    /// Search narrows the already-fetched rows; no request is made.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// The fetched rows that match the current search, in server order.
    /// Matching is case-insensitive over invoice number, client name and
    /// status label.
    pub fn visible_cases(&self) -> Vec<&Case> {
        let needle = self.search.to_lowercase();
        self.cases
            .iter()
            .filter(|case| self.matches(case, &needle))
            .collect()
    }

    fn matches(&self, case: &Case, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        case.invoice_number.to_lowercase().contains(needle)
            || self
                .clients_by_id
                .get(&case.client_id)
                .is_some_and(|client| client.name.to_lowercase().contains(needle))
            || case.status.label().to_lowercase().contains(needle)
    }

    /// The display name for a row's client, or `"Unknown"` when the client
    /// is not in the fetched lookup.
    pub fn client_name(&self, case: &Case) -> &str {
        self.clients_by_id
            .get(&case.client_id)
            .map(|client| client.name.as_str())
            .unwrap_or("Unknown")
    }

    /// Marks a row for deletion, pending explicit confirmation.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the marked case. On success the list is refreshed exactly
    /// once; on failure the rows are left untouched.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match self.api.delete_case(id).await {
            Ok(()) => {
                self.notifier
                    .notify(NoticeLevel::Success, "Case deleted successfully");
                self.refresh().await;
            }
            Err(err) => {
                warn!(case_id = id, error = %err, "case deletion failed");
                self.notifier.notify(NoticeLevel::Error, "Failed to delete case");
            }
        }
    }

    fn current_query(&self) -> CaseQuery {
        CaseQuery {
            skip: 0,
            limit: PAGE_LIMIT,
            status: self.status_filter,
            sort_by: self.sort_by,
            order: self.order,
        }
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status_filter(&self) -> Option<CaseStatus> {
        self.status_filter
    }

    pub fn sort_by(&self) -> CaseSortKey {
        self.sort_by
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }
}
