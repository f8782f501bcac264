//! Controller for the dashboard: status counts and revenue aggregates.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use crate::http::HttpTransport;
use crate::notify::{NoticeLevel, Notifier};
use crate::service::ApiService;
use crate::types::{Case, CaseQuery, CaseStatus};

/// The dashboard summarizes the whole book of cases, so it fetches with a
/// far larger page than the list screens.
const DASHBOARD_CASE_LIMIT: u32 = 1000;

/// Aggregates derived from one fetch of the case list. All money stays in
/// `Decimal`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub new: usize,
    pub in_follow_up: usize,
    pub partially_paid: usize,
    pub closed: usize,
    pub total_revenue: Decimal,
    /// Revenue of closed cases.
    pub collected_revenue: Decimal,
    /// `total_revenue - collected_revenue`.
    pub pending_revenue: Decimal,
}

impl DashboardStats {
    pub fn from_cases(cases: &[Case]) -> Self {
        let mut stats = DashboardStats {
            total: cases.len(),
            ..DashboardStats::default()
        };
        for case in cases {
            match case.status {
                CaseStatus::New => stats.new += 1,
                CaseStatus::InFollowUp => stats.in_follow_up += 1,
                CaseStatus::PartiallyPaid => stats.partially_paid += 1,
                CaseStatus::Closed => stats.closed += 1,
            }
            stats.total_revenue += case.amount;
            if case.status == CaseStatus::Closed {
                stats.collected_revenue += case.amount;
            }
        }
        stats.pending_revenue = stats.total_revenue - stats.collected_revenue;
        stats
    }

    pub fn count_for(&self, status: CaseStatus) -> usize {
        match status {
            CaseStatus::New => self.new,
            CaseStatus::InFollowUp => self.in_follow_up,
            CaseStatus::PartiallyPaid => self.partially_paid,
            CaseStatus::Closed => self.closed,
        }
    }

    /// Cases not yet closed.
    pub fn active_cases(&self) -> usize {
        self.total - self.closed
    }

    /// Cases still waiting on an action: new plus in follow-up.
    pub fn pending_actions(&self) -> usize {
        self.new + self.in_follow_up
    }

    /// Share of closed cases, rounded to a whole percentage.
    pub fn completion_rate_percent(&self) -> u32 {
        self.percent_of_total(CaseStatus::Closed)
    }

    /// Share of all cases in `status`, rounded to a whole percentage.
    /// Zero when there are no cases at all.
    pub fn percent_of_total(&self, status: CaseStatus) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.count_for(status) as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// State of the dashboard screen.
pub struct DashboardController<T: HttpTransport> {
    api: ApiService<T>,
    notifier: Arc<dyn Notifier>,
    stats: DashboardStats,
    loading: bool,
}

impl<T: HttpTransport> DashboardController<T> {
    pub fn new(api: ApiService<T>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            stats: DashboardStats::default(),
            loading: false,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let query = CaseQuery {
            limit: DASHBOARD_CASE_LIMIT,
            ..CaseQuery::default()
        };
        match self.api.list_cases(&query).await {
            Ok(cases) => {
                self.stats = DashboardStats::from_cases(&cases);
            }
            Err(err) => {
                warn!(error = %err, "dashboard load failed");
                self.notifier
                    .notify(NoticeLevel::Error, "Failed to load dashboard data");
            }
        }
        self.loading = false;
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
