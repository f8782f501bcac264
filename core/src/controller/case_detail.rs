//! Controller for the case detail screen: view, edit, and delete one case.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::notify::{NoticeLevel, Notifier};
use crate::service::ApiService;
use crate::types::{Case, CaseStatus, CaseUpdate, Client};

use super::Redirect;

/// Where the screen is in its edit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// Read-only display.
    Viewing,
    /// Status and notes are editable.
    Editing,
    /// A save is in flight; further submits and cancels are ignored.
    Submitting,
}

/// Token for one load of the detail screen. Captures the case id as of
/// [`CaseDetailController::start_load`].
#[derive(Debug, Clone)]
pub struct DetailRefresh {
    generation: u64,
    case_id: i64,
}

/// Fetched data for one [`DetailRefresh`].
#[derive(Debug)]
pub struct DetailOutcome {
    generation: u64,
    result: Result<(Case, Client), ApiError>,
}

/// State of the case detail screen.
///
/// The editable fields (`status`, `follow_up_notes`) live as drafts beside
/// the loaded case, so cancelling an edit is a local operation and a failed
/// save loses nothing the user typed.
pub struct CaseDetailController<T: HttpTransport> {
    api: ApiService<T>,
    notifier: Arc<dyn Notifier>,
    case_id: i64,
    case: Option<Case>,
    client: Option<Client>,
    phase: EditPhase,
    status_draft: CaseStatus,
    notes_draft: String,
    delete_dialog: bool,
    loading: bool,
    generation: u64,
}

impl<T: HttpTransport> CaseDetailController<T> {
    pub fn new(api: ApiService<T>, notifier: Arc<dyn Notifier>, case_id: i64) -> Self {
        Self {
            api,
            notifier,
            case_id,
            case: None,
            client: None,
            phase: EditPhase::Viewing,
            status_draft: CaseStatus::New,
            notes_draft: String::new(),
            delete_dialog: false,
            loading: false,
            generation: 0,
        }
    }

    /// Points the screen at a different case without fetching. The next
    /// load picks the new id up; any fetch already in flight is invalidated
    /// by the following [`Self::start_load`].
    pub fn set_case(&mut self, case_id: i64) {
        self.case_id = case_id;
    }

    /// Begins a load: bumps the generation and snapshots the case id.
    pub fn start_load(&mut self) -> DetailRefresh {
        self.generation += 1;
        self.loading = true;
        DetailRefresh {
            generation: self.generation,
            case_id: self.case_id,
        }
    }

    /// Fetches the case, then its client. The second request depends on the
    /// first response's `client_id`, so the two run sequentially.
    pub async fn fetch(&self, refresh: &DetailRefresh) -> DetailOutcome {
        let result = async {
            let case = self.api.get_case(refresh.case_id).await?;
            let client = self.api.get_client(case.client_id).await?;
            Ok::<_, ApiError>((case, client))
        }
        .await;
        DetailOutcome {
            generation: refresh.generation,
            result,
        }
    }

    /// Applies a load outcome. Stale outcomes are dropped silently; a
    /// failed current load notifies and asks for a redirect back to the
    /// list.
    pub fn apply(&mut self, outcome: DetailOutcome) -> Option<Redirect> {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding out-of-date case detail response"
            );
            return None;
        }
        self.loading = false;
        match outcome.result {
            Ok((case, client)) => {
                self.status_draft = case.status;
                self.notes_draft = case.follow_up_notes.clone().unwrap_or_default();
                self.case = Some(case);
                self.client = Some(client);
                self.phase = EditPhase::Viewing;
                None
            }
            Err(err) => {
                warn!(case_id = self.case_id, error = %err, "case detail load failed");
                self.notifier
                    .notify(NoticeLevel::Error, "Failed to load case details");
                Some(Redirect::CaseList)
            }
        }
    }

    /// Runs a whole load in one call.
    pub async fn load(&mut self) -> Option<Redirect> {
        let refresh = self.start_load();
        let outcome = self.fetch(&refresh).await;
        self.apply(outcome)
    }

    /// Navigates the screen to another case and loads it.
    pub async fn show_case(&mut self, case_id: i64) -> Option<Redirect> {
        self.set_case(case_id);
        self.load().await
    }

    /// Enters edit mode with drafts seeded from the loaded case. No-op
    /// until a case is loaded or while a save is in flight.
    pub fn begin_edit(&mut self) {
        if self.phase != EditPhase::Viewing {
            return;
        }
        let Some(case) = &self.case else {
            return;
        };
        self.status_draft = case.status;
        self.notes_draft = case.follow_up_notes.clone().unwrap_or_default();
        self.phase = EditPhase::Editing;
    }

    /// Discards the drafts and restores the loaded values. Ignored while a
    /// save is in flight.
    pub fn cancel_edit(&mut self) {
        if self.phase != EditPhase::Editing {
            return;
        }
        if let Some(case) = &self.case {
            self.status_draft = case.status;
            self.notes_draft = case.follow_up_notes.clone().unwrap_or_default();
        }
        self.phase = EditPhase::Viewing;
    }

    pub fn set_status_draft(&mut self, status: CaseStatus) {
        if self.phase == EditPhase::Editing {
            self.status_draft = status;
        }
    }

    pub fn set_notes_draft(&mut self, notes: impl Into<String>) {
        if self.phase == EditPhase::Editing {
            self.notes_draft = notes.into();
        }
    }

    /// Saves the drafts. Empty notes are omitted from the payload rather
    /// than sent as an empty string. On success the screen returns to
    /// viewing with the server's copy of the case; on failure it stays in
    /// edit mode with the drafts intact and shows the server's message when
    /// one was provided.
    pub async fn save(&mut self) {
        if self.phase != EditPhase::Editing {
            return;
        }
        self.phase = EditPhase::Submitting;
        let payload = CaseUpdate {
            status: Some(self.status_draft),
            follow_up_notes: if self.notes_draft.is_empty() {
                None
            } else {
                Some(self.notes_draft.clone())
            },
        };
        match self.api.update_case(self.case_id, &payload).await {
            Ok(updated) => {
                self.case = Some(updated);
                self.phase = EditPhase::Viewing;
                self.notifier
                    .notify(NoticeLevel::Success, "Case updated successfully");
            }
            Err(err) => {
                warn!(case_id = self.case_id, error = %err, "case update failed");
                let message = err.server_detail().unwrap_or("Failed to update case");
                self.notifier.notify(NoticeLevel::Error, message);
                self.phase = EditPhase::Editing;
            }
        }
    }

    pub fn open_delete_dialog(&mut self) {
        self.delete_dialog = true;
    }

    pub fn close_delete_dialog(&mut self) {
        self.delete_dialog = false;
    }

    /// Deletes the case. The dialog closes as soon as the user confirms;
    /// deletion works from any edit phase. Success redirects back to the
    /// list, failure stays put and surfaces the server's message when one
    /// was provided.
    pub async fn confirm_delete(&mut self) -> Option<Redirect> {
        self.delete_dialog = false;
        match self.api.delete_case(self.case_id).await {
            Ok(()) => {
                self.notifier
                    .notify(NoticeLevel::Success, "Case deleted successfully");
                Some(Redirect::CaseList)
            }
            Err(err) => {
                warn!(case_id = self.case_id, error = %err, "case deletion failed");
                let message = err.server_detail().unwrap_or("Failed to delete case");
                self.notifier.notify(NoticeLevel::Error, message);
                None
            }
        }
    }

    pub fn case(&self) -> Option<&Case> {
        self.case.as_ref()
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn status_draft(&self) -> CaseStatus {
        self.status_draft
    }

    pub fn notes_draft(&self) -> &str {
        &self.notes_draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_delete_dialog_open(&self) -> bool {
        self.delete_dialog
    }
}
