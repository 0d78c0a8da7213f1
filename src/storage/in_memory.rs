//! In-memory implementation of InvoiceStore for testing and development

use crate::core::error::StorageError;
use crate::core::invoice::{InvoiceChanges, InvoiceRecord, NewInvoice};
use crate::core::store::InvoiceStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const BACKEND: &str = "memory";

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, InvoiceRecord>,
}

impl Table {
    fn number_taken(&self, invoice_number: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| row.invoice_number == invoice_number && Some(row.id) != except)
    }
}

/// In-memory invoice store
///
/// Uses RwLock for thread-safe access. Ids start at 1 and are never reused,
/// and the invoice number constraint is checked under the write lock.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryInvoiceStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StorageError> {
        self.table.read().map_err(|e| StorageError::Lock {
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, StorageError> {
        self.table.write().map_err(|e| StorageError::Lock {
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord, StorageError> {
        let mut table = self.write()?;

        if table.number_taken(&invoice.invoice_number, None) {
            return Err(StorageError::UniqueViolation {
                backend: BACKEND.to_string(),
                invoice_number: invoice.invoice_number,
            });
        }

        table.last_id += 1;
        let record = invoice.into_record(table.last_id);
        table.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<InvoiceRecord>, StorageError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_by_number(
        &self,
        invoice_number: &str,
    ) -> Result<Option<InvoiceRecord>, StorageError> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|row| row.invoice_number == invoice_number)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<InvoiceRecord>, StorageError> {
        let mut rows: Vec<InvoiceRecord> = self.read()?.rows.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn update(
        &self,
        id: i64,
        changes: InvoiceChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<InvoiceRecord>, StorageError> {
        let mut table = self.write()?;

        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if let Some(number) = &changes.invoice_number {
            if table.number_taken(number, Some(id)) {
                return Err(StorageError::UniqueViolation {
                    backend: BACKEND.to_string(),
                    invoice_number: number.clone(),
                });
            }
        }

        let Some(record) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(record, updated_at);

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }
}
