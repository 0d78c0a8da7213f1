//! Store trait for invoice persistence

use crate::core::error::StorageError;
use crate::core::invoice::{InvoiceChanges, InvoiceRecord, NewInvoice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence for invoice rows.
///
/// Implementations own the `invoice_number` uniqueness constraint: `insert`
/// and `update` must fail with [`StorageError::UniqueViolation`] rather than
/// write a second row with the same number, whatever checks the caller made
/// beforehand.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Name used in logs and error messages
    fn backend_name(&self) -> &'static str;

    /// Insert a new row and return it with its assigned id
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord, StorageError>;

    /// Get a row by id
    async fn find_by_id(&self, id: i64) -> Result<Option<InvoiceRecord>, StorageError>;

    /// Get a row by invoice number
    async fn find_by_number(
        &self,
        invoice_number: &str,
    ) -> Result<Option<InvoiceRecord>, StorageError>;

    /// All rows, newest `created_at` first (ties: highest id first)
    async fn list(&self) -> Result<Vec<InvoiceRecord>, StorageError>;

    /// Apply `changes` and set `updated_at`; `None` if the id is unknown
    async fn update(
        &self,
        id: i64,
        changes: InvoiceChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<InvoiceRecord>, StorageError>;

    /// Remove a row; `false` if the id is unknown
    async fn delete(&self, id: i64) -> Result<bool, StorageError>;
}
