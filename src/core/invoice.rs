//! Invoice entity: stored record, wire representation and procedure inputs

use crate::core::amount;
use crate::core::patch::Patch;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidateEmail, ValidationErrors};

/// An invoice as returned by every procedure.
///
/// `amount_due` is a plain number here; the store keeps it as a two-place
/// decimal (see [`InvoiceRecord`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub amount_due: f64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub services_rendered: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Past its due date and still unpaid. Never stored.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.paid && self.due_date < today
    }
}

impl From<InvoiceRecord> for Invoice {
    fn from(record: InvoiceRecord) -> Self {
        Self {
            id: record.id,
            invoice_number: record.invoice_number,
            client_name: record.client_name,
            client_email: record.client_email,
            amount_due: amount::to_wire(record.amount_due),
            issue_date: record.issue_date,
            due_date: record.due_date,
            services_rendered: record.services_rendered,
            paid: record.paid,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A row of the `invoices` table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceRecord {
    pub id: i64,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub amount_due: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub services_rendered: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for an insert. The store assigns `id` and sets
/// `updated_at` equal to `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub amount_due: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub services_rendered: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

impl NewInvoice {
    /// Build the row for a create call; fails if the amount cannot be stored.
    pub fn from_input(
        input: CreateInvoiceInput,
        created_at: DateTime<Utc>,
    ) -> Result<Self, crate::core::error::ValidationError> {
        Ok(Self {
            amount_due: amount::to_stored_positive("amount_due", input.amount_due)?,
            invoice_number: input.invoice_number,
            client_name: input.client_name,
            client_email: input.client_email,
            issue_date: input.issue_date,
            due_date: input.due_date,
            services_rendered: input.services_rendered,
            paid: input.paid,
            created_at,
        })
    }

    pub fn into_record(self, id: i64) -> InvoiceRecord {
        InvoiceRecord {
            id,
            invoice_number: self.invoice_number,
            client_name: self.client_name,
            client_email: self.client_email,
            amount_due: self.amount_due,
            issue_date: self.issue_date,
            due_date: self.due_date,
            services_rendered: self.services_rendered,
            paid: self.paid,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Column changes for an update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceChanges {
    pub invoice_number: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub amount_due: Option<Decimal>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub services_rendered: Option<String>,
    pub paid: Option<bool>,
}

impl InvoiceChanges {
    /// Convert a validated patch into column changes.
    pub fn from_input(
        input: UpdateInvoiceInput,
    ) -> Result<Self, crate::core::error::ValidationError> {
        let amount_due = match input.amount_due {
            Patch::Set(value) => Some(amount::to_stored_positive("amount_due", value)?),
            Patch::Unchanged => None,
        };

        Ok(Self {
            invoice_number: input.invoice_number.into_option(),
            client_name: input.client_name.into_option(),
            client_email: input.client_email.into_option(),
            amount_due,
            issue_date: input.issue_date.into_option(),
            due_date: input.due_date.into_option(),
            services_rendered: input.services_rendered.into_option(),
            paid: input.paid.into_option(),
        })
    }

    /// Apply the changes in place and stamp `updated_at`.
    pub fn apply_to(&self, record: &mut InvoiceRecord, updated_at: DateTime<Utc>) {
        if let Some(v) = &self.invoice_number {
            record.invoice_number = v.clone();
        }
        if let Some(v) = &self.client_name {
            record.client_name = v.clone();
        }
        if let Some(v) = &self.client_email {
            record.client_email = v.clone();
        }
        if let Some(v) = self.amount_due {
            record.amount_due = v;
        }
        if let Some(v) = self.issue_date {
            record.issue_date = v;
        }
        if let Some(v) = self.due_date {
            record.due_date = v;
        }
        if let Some(v) = &self.services_rendered {
            record.services_rendered = v.clone();
        }
        if let Some(v) = self.paid {
            record.paid = v;
        }
        record.updated_at = updated_at;
    }
}

// =============================================================================
// Procedure inputs
// =============================================================================

/// Input of `createInvoice`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateInvoiceInput {
    #[validate(length(min = 1, message = "invoice number is required"))]
    pub invoice_number: String,

    #[validate(length(min = 1, message = "client name is required"))]
    pub client_name: String,

    #[validate(email(message = "client email must be a valid email address"))]
    pub client_email: String,

    #[validate(range(exclusive_min = 0.0, message = "amount due must be greater than zero"))]
    pub amount_due: f64,

    pub issue_date: NaiveDate,

    pub due_date: NaiveDate,

    #[validate(length(min = 1, message = "services rendered is required"))]
    pub services_rendered: String,

    #[serde(default)]
    pub paid: bool,
}

/// Optional fields of `updateInvoice`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateInvoiceInput {
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub invoice_number: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub client_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub client_email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub amount_due: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub issue_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub due_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub services_rendered: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub paid: Patch<bool>,
}

fn field_error(code: &'static str, message: &'static str) -> validator::ValidationError {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

// Same rules as `CreateInvoiceInput`, applied only to supplied fields.
impl Validate for UpdateInvoiceInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Patch::Set(v) = &self.invoice_number {
            if v.is_empty() {
                errors.add("invoice_number", field_error("length", "invoice number is required"));
            }
        }
        if let Patch::Set(v) = &self.client_name {
            if v.is_empty() {
                errors.add("client_name", field_error("length", "client name is required"));
            }
        }
        if let Patch::Set(v) = &self.client_email {
            if !v.validate_email() {
                errors.add(
                    "client_email",
                    field_error("email", "client email must be a valid email address"),
                );
            }
        }
        if let Patch::Set(v) = self.amount_due {
            if !(v > 0.0) {
                errors.add(
                    "amount_due",
                    field_error("range", "amount due must be greater than zero"),
                );
            }
        }
        if let Patch::Set(v) = &self.services_rendered {
            if v.is_empty() {
                errors.add(
                    "services_rendered",
                    field_error("length", "services rendered is required"),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Input of `updateInvoice`: the id plus any subset of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub id: i64,
    #[serde(flatten)]
    pub changes: UpdateInvoiceInput,
}

impl Validate for UpdateInvoiceRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.changes.validate()
    }
}

/// Input of `getInvoice` and `deleteInvoice`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceIdInput {
    pub id: i64,
}

impl Validate for InvoiceIdInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Output of `deleteInvoice`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteInvoiceOutput {
    pub success: bool,
}
