//! Controller for the client list screen and its create/edit dialog.

use std::sync::Arc;

use tracing::warn;

use crate::form::{ClientForm, FieldErrors};
use crate::http::HttpTransport;
use crate::notify::{NoticeLevel, Notifier};
use crate::service::ApiService;
use crate::types::{Client, ClientUpdate};

const PAGE_LIMIT: u32 = 100;

#[derive(Debug)]
struct DialogState {
    /// `Some(id)` when editing an existing client, `None` when creating.
    editing: Option<i64>,
    form: ClientForm,
    errors: FieldErrors,
}

/// State of the client list screen. One dialog serves both create and edit;
/// a failed save keeps it open with the user's input intact.
pub struct ClientListController<T: HttpTransport> {
    api: ApiService<T>,
    notifier: Arc<dyn Notifier>,
    clients: Vec<Client>,
    loading: bool,
    dialog: Option<DialogState>,
    submitting: bool,
    pending_delete: Option<i64>,
}

impl<T: HttpTransport> ClientListController<T> {
    pub fn new(api: ApiService<T>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            clients: Vec::new(),
            loading: false,
            dialog: None,
            submitting: false,
            pending_delete: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.api.list_clients(0, PAGE_LIMIT).await {
            Ok(clients) => {
                self.clients = clients;
            }
            Err(err) => {
                warn!(error = %err, "client list load failed");
                self.notifier
                    .notify(NoticeLevel::Error, "Failed to load clients");
            }
        }
        self.loading = false;
    }

    pub fn open_create_dialog(&mut self) {
        self.dialog = Some(DialogState {
            editing: None,
            form: ClientForm::default(),
            errors: FieldErrors::default(),
        });
    }

    /// Opens the dialog prefilled with an existing client's details. No-op
    /// when the id is not in the loaded list.
    pub fn open_edit_dialog(&mut self, id: i64) {
        let Some(client) = self.clients.iter().find(|c| c.id == id) else {
            warn!(client_id = id, "edit requested for a client not in the list");
            return;
        };
        self.dialog = Some(DialogState {
            editing: Some(id),
            form: ClientForm::from_client(client),
            errors: FieldErrors::default(),
        });
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Validates the dialog and creates or updates accordingly. Invalid
    /// input stays local; a successful save notifies, closes the dialog and
    /// refetches the list; a failed save keeps the dialog open and surfaces
    /// the server's message when one was provided.
    pub async fn submit_dialog(&mut self) {
        if self.submitting {
            return;
        }
        let Some(dialog) = &mut self.dialog else {
            return;
        };
        let payload = match dialog.form.validate() {
            Err(errors) => {
                dialog.errors = errors;
                return;
            }
            Ok(payload) => payload,
        };
        dialog.errors = FieldErrors::default();
        let editing = dialog.editing;

        self.submitting = true;
        let result = match editing {
            Some(id) => {
                let update = ClientUpdate {
                    name: Some(payload.name),
                    email: payload.email,
                    phone: payload.phone,
                    company: payload.company,
                };
                self.api.update_client(id, &update).await.map(|_| ())
            }
            None => self.api.create_client(&payload).await.map(|_| ()),
        };
        self.submitting = false;

        match result {
            Ok(()) => {
                let message = if editing.is_some() {
                    "Client updated successfully"
                } else {
                    "Client created successfully"
                };
                self.notifier.notify(NoticeLevel::Success, message);
                self.dialog = None;
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, "client save failed");
                let message = err.server_detail().unwrap_or("Failed to save client");
                self.notifier.notify(NoticeLevel::Error, message);
            }
        }
    }

    /// Marks a client for deletion, pending explicit confirmation.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the marked client; the server cascades to its cases. On
    /// failure the confirmation stays pending so the user can retry or
    /// cancel.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete else {
            return;
        };
        match self.api.delete_client(id).await {
            Ok(()) => {
                self.notifier
                    .notify(NoticeLevel::Success, "Client deleted successfully");
                self.pending_delete = None;
                self.load().await;
            }
            Err(err) => {
                warn!(client_id = id, error = %err, "client deletion failed");
                let message = err.server_detail().unwrap_or("Failed to delete client");
                self.notifier.notify(NoticeLevel::Error, message);
            }
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The id under edit, when the dialog is open in edit mode.
    pub fn dialog_editing(&self) -> Option<i64> {
        self.dialog.as_ref().and_then(|d| d.editing)
    }

    pub fn dialog_form(&self) -> Option<&ClientForm> {
        self.dialog.as_ref().map(|d| &d.form)
    }

    pub fn dialog_form_mut(&mut self) -> Option<&mut ClientForm> {
        self.dialog.as_mut().map(|d| &mut d.form)
    }

    pub fn dialog_errors(&self) -> Option<&FieldErrors> {
        self.dialog.as_ref().map(|d| &d.errors)
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }
}
