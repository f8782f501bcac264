//! Controller for the new-case form.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::form::{CaseForm, FieldErrors};
use crate::http::HttpTransport;
use crate::notify::{NoticeLevel, Notifier};
use crate::service::ApiService;
use crate::types::Client;

use super::Redirect;

const PAGE_LIMIT: u32 = 100;

/// State of the create-case screen: the client dropdown options, the raw
/// form, and its validation messages.
pub struct CaseCreateController<T: HttpTransport> {
    api: ApiService<T>,
    notifier: Arc<dyn Notifier>,
    clients: Vec<Client>,
    form: CaseForm,
    errors: FieldErrors,
    loading_clients: bool,
    submitting: bool,
}

impl<T: HttpTransport> CaseCreateController<T> {
    pub fn new(api: ApiService<T>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            clients: Vec::new(),
            form: CaseForm::default(),
            errors: FieldErrors::default(),
            loading_clients: false,
            submitting: false,
        }
    }

    /// Loads the selectable clients for the dropdown.
    pub async fn load_clients(&mut self) {
        self.loading_clients = true;
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
        self.loading_clients = false;
    }

    /// Validates the form and, when it is clean, creates the case. Invalid
    /// input populates [`Self::errors`] and never reaches the network.
    /// Success redirects back to the case list.
    pub async fn submit(&mut self) -> Option<Redirect> {
        if self.submitting {
            return None;
        }
        match self.form.validate(&self.clients) {
            Err(errors) => {
                debug!(fields = errors.len(), "case form failed validation");
                self.errors = errors;
                None
            }
            Ok(payload) => {
                self.errors = FieldErrors::default();
                self.submitting = true;
                let result = self.api.create_case(&payload).await;
                self.submitting = false;
                match result {
                    Ok(_) => {
                        self.notifier
                            .notify(NoticeLevel::Success, "Case created successfully");
                        Some(Redirect::CaseList)
                    }
                    Err(err) => {
                        warn!(error = %err, "case creation failed");
                        let message = err.server_detail().unwrap_or("Failed to create case");
                        self.notifier.notify(NoticeLevel::Error, message);
                        None
                    }
                }
            }
        }
    }

    pub fn form(&self) -> &CaseForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CaseForm {
        &mut self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn is_loading_clients(&self) -> bool {
        self.loading_clients
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}
