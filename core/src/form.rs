//! Client-side validation for the case and client entry forms.
//!
//! # Design
//! Raw form state (`CaseForm`, `ClientForm`) keeps every field as the string
//! the user typed. `validate` either produces a well-typed request payload
//! or a [`FieldErrors`] map with one message per offending field, collected
//! in a single pass so the user sees all problems at once. A payload that
//! fails validation never reaches the network.
//!
//! Optional text fields normalize the empty string to `None` before a
//! payload is built; the server stores absent values as null rather than
//! empty strings.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::format::{parse_amount, parse_timestamp};
use crate::types::{Client, NewCase, NewClient};

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    ClientId,
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    Amount,
    Name,
    Email,
}

/// Validation messages keyed by field, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<FormField, String>,
}

impl FieldErrors {
    fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.messages.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.messages.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Raw state of the create-case form. `invoice_date` defaults to today so
/// a fresh form is one field closer to valid.
#[derive(Debug, Clone)]
pub struct CaseForm {
    pub client_id: Option<i64>,
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    pub amount: String,
    pub follow_up_notes: String,
}

impl Default for CaseForm {
    fn default() -> Self {
        Self {
            client_id: None,
            invoice_number: String::new(),
            invoice_date: Utc::now().date_naive().to_string(),
            due_date: String::new(),
            amount: String::new(),
            follow_up_notes: String::new(),
        }
    }
}

impl CaseForm {
    /// Validates against the currently loaded client list. The selected
    /// client must actually exist; a stale or never-set selection fails
    /// instead of producing a doomed request.
    pub fn validate(&self, clients: &[Client]) -> Result<NewCase, FieldErrors> {
        let mut errors = FieldErrors::default();

        let client_id = match self.client_id {
            Some(id) if clients.iter().any(|c| c.id == id) => Some(id),
            _ => {
                errors.insert(FormField::ClientId, "Client is required");
                None
            }
        };

        let invoice_number = self.invoice_number.trim();
        if invoice_number.is_empty() {
            errors.insert(FormField::InvoiceNumber, "Invoice number is required");
        }

        let invoice_date = date_field(
            &self.invoice_date,
            FormField::InvoiceDate,
            "Invoice date",
            &mut errors,
        );
        let due_date = date_field(&self.due_date, FormField::DueDate, "Due date", &mut errors);

        let raw_amount = self.amount.trim();
        let amount = if raw_amount.is_empty() {
            errors.insert(FormField::Amount, "Amount is required");
            None
        } else {
            match parse_amount(raw_amount) {
                None => {
                    errors.insert(FormField::Amount, "Amount must be a number");
                    None
                }
                Some(value) if value <= Decimal::ZERO => {
                    errors.insert(FormField::Amount, "Amount must be greater than 0");
                    None
                }
                Some(value) => Some(value),
            }
        };

        match (client_id, invoice_date, due_date, amount) {
            (Some(client_id), Some(invoice_date), Some(due_date), Some(amount))
                if errors.is_empty() =>
            {
                Ok(NewCase {
                    client_id,
                    invoice_number: invoice_number.to_string(),
                    invoice_date,
                    due_date,
                    amount,
                    follow_up_notes: normalize_optional(&self.follow_up_notes),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Raw state of the client create/edit dialog.
#[derive(Debug, Clone, Default)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

impl ClientForm {
    /// Prefills the dialog for editing an existing client.
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone().unwrap_or_default(),
            phone: client.phone.clone().unwrap_or_default(),
            company: client.company.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewClient, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "Name is required");
        }

        let email = normalize_optional(&self.email);
        if let Some(value) = &email {
            if !value.validate_email() {
                errors.insert(FormField::Email, "Invalid email");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewClient {
            name: name.to_string(),
            email,
            phone: normalize_optional(&self.phone),
            company: normalize_optional(&self.company),
        })
    }
}

fn date_field(
    raw: &str,
    field: FormField,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.insert(field, format!("{label} is required"));
        return None;
    }
    match parse_timestamp(trimmed) {
        Some(value) => Some(value),
        None => {
            errors.insert(field, format!("{label} must be a valid date"));
            None
        }
    }
}

/// Empty or whitespace-only input becomes `None`.
fn normalize_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
