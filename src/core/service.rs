//! The five invoice operations
//!
//! Each operation is one round trip: at most one existence check, then one
//! store statement. The duplicate-number check before an insert is advisory;
//! the store's uniqueness constraint decides, and a violation it reports is
//! surfaced as the same [`InvoiceError::DuplicateNumber`].

use crate::core::error::{InvoiceError, StorageError, TrackerError, TrackerResult};
use crate::core::invoice::{
    CreateInvoiceInput, DeleteInvoiceOutput, Invoice, InvoiceChanges, NewInvoice,
    UpdateInvoiceInput,
};
use crate::core::store::InvoiceStore;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::Arc;
use validator::Validate;

/// Invoice operations over any [`InvoiceStore`]
#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn InvoiceStore>,
}

impl InvoiceService {
    pub fn new(store: impl InvoiceStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn InvoiceStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    /// Create an invoice; fails if the invoice number is taken
    #[tracing::instrument(skip_all, fields(invoice_number = %input.invoice_number))]
    pub async fn create(&self, input: CreateInvoiceInput) -> TrackerResult<Invoice> {
        input.validate()?;

        if self
            .store
            .find_by_number(&input.invoice_number)
            .await?
            .is_some()
        {
            tracing::debug!("invoice number already in use");
            return Err(InvoiceError::DuplicateNumber {
                invoice_number: input.invoice_number,
            }
            .into());
        }

        let new_invoice = NewInvoice::from_input(input, current_timestamp())?;
        let record = self
            .store
            .insert(new_invoice)
            .await
            .map_err(from_store_error)?;

        tracing::info!(id = record.id, "invoice created");
        Ok(record.into())
    }

    /// Get one invoice by id
    #[tracing::instrument(skip(self))]
    pub async fn get_one(&self, id: i64) -> TrackerResult<Invoice> {
        match self.store.find_by_id(id).await? {
            Some(record) => Ok(record.into()),
            None => {
                tracing::debug!("invoice not found");
                Err(InvoiceError::NotFound { id }.into())
            }
        }
    }

    /// Every invoice, newest first
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> TrackerResult<Vec<Invoice>> {
        let records = self.store.list().await?;
        tracing::debug!(count = records.len(), "listed invoices");
        Ok(records.into_iter().map(Invoice::from).collect())
    }

    /// Apply the supplied fields and refresh `updated_at`
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateInvoiceInput) -> TrackerResult<Invoice> {
        input.validate()?;

        let Some(existing) = self.store.find_by_id(id).await? else {
            tracing::debug!("invoice not found");
            return Err(InvoiceError::NotFound { id }.into());
        };

        let changes = InvoiceChanges::from_input(input)?;

        if let Some(number) = &changes.invoice_number {
            if *number != existing.invoice_number {
                if let Some(other) = self.store.find_by_number(number).await? {
                    if other.id != id {
                        tracing::debug!(invoice_number = %number, "invoice number already in use");
                        return Err(InvoiceError::DuplicateNumber {
                            invoice_number: number.clone(),
                        }
                        .into());
                    }
                }
            }
        }

        let updated_at = next_update_timestamp(existing.updated_at);
        match self
            .store
            .update(id, changes, updated_at)
            .await
            .map_err(from_store_error)?
        {
            Some(record) => {
                tracing::info!("invoice updated");
                Ok(record.into())
            }
            // Deleted between the existence check and the write.
            None => Err(InvoiceError::NotFound { id }.into()),
        }
    }

    /// Delete an invoice; the row cannot be recovered
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> TrackerResult<DeleteInvoiceOutput> {
        if self.store.find_by_id(id).await?.is_none() {
            tracing::debug!("invoice not found");
            return Err(InvoiceError::NotFound { id }.into());
        }

        if !self.store.delete(id).await? {
            return Err(InvoiceError::NotFound { id }.into());
        }

        tracing::info!("invoice deleted");
        Ok(DeleteInvoiceOutput { success: true })
    }
}

fn from_store_error(err: StorageError) -> TrackerError {
    match err {
        StorageError::UniqueViolation { invoice_number, .. } => {
            InvoiceError::DuplicateNumber { invoice_number }.into()
        }
        other => other.into(),
    }
}

/// Now, at the microsecond precision every backend can store.
pub(crate) fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly after `previous`, even if the clock has not moved.
pub(crate) fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = current_timestamp();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
