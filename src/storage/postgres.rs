//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresInvoiceStore`, an [`InvoiceStore`] backed by a
//! PostgreSQL database via `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! invoice-tracker = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! One `invoices` table (see `migrations/`). `amount_due` is `NUMERIC(12, 2)`
//! and maps to `rust_decimal::Decimal`; `invoice_number` carries a `UNIQUE`
//! constraint, which is what actually guarantees uniqueness under
//! concurrent creates.

use crate::core::error::StorageError;
use crate::core::invoice::{InvoiceChanges, InvoiceRecord, NewInvoice};
use crate::core::store::InvoiceStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

const BACKEND: &str = "PostgreSQL";

const INVOICE_COLUMNS: &str = "id, invoice_number, client_name, client_email, amount_due, \
     issue_date, due_date, services_rendered, paid, created_at, updated_at";

/// Invoice store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use invoice_tracker::storage::PostgresInvoiceStore;
///
/// let store = PostgresInvoiceStore::connect("postgres://localhost/invoices", 5).await?;
/// store.migrate().await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    /// Create a new `PostgresInvoiceStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await
            .map_err(|e| StorageError::Connection {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::new(pool))
    }

    /// Apply the bundled migrations (idempotent).
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn query_error(operation: &str, err: sqlx::Error) -> StorageError {
    StorageError::Query {
        backend: BACKEND.to_string(),
        message: format!("Failed to {}: {}", operation, err),
    }
}

/// Map a write error, recognising the invoice number constraint.
fn write_error(operation: &str, invoice_number: &str, err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::UniqueViolation {
            backend: BACKEND.to_string(),
            invoice_number: invoice_number.to_string(),
        },
        _ => query_error(operation, err),
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord, StorageError> {
        let sql = format!(
            "INSERT INTO invoices (invoice_number, client_name, client_email, amount_due, \
             issue_date, due_date, services_rendered, paid, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
             RETURNING {}",
            INVOICE_COLUMNS
        );

        sqlx::query_as::<_, InvoiceRecord>(&sql)
            .bind(&invoice.invoice_number)
            .bind(&invoice.client_name)
            .bind(&invoice.client_email)
            .bind(invoice.amount_due)
            .bind(invoice.issue_date)
            .bind(invoice.due_date)
            .bind(&invoice.services_rendered)
            .bind(invoice.paid)
            .bind(invoice.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error("create invoice", &invoice.invoice_number, e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<InvoiceRecord>, StorageError> {
        let sql = format!("SELECT {} FROM invoices WHERE id = $1", INVOICE_COLUMNS);
        sqlx::query_as::<_, InvoiceRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("get invoice", e))
    }

    async fn find_by_number(
        &self,
        invoice_number: &str,
    ) -> Result<Option<InvoiceRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM invoices WHERE invoice_number = $1",
            INVOICE_COLUMNS
        );
        sqlx::query_as::<_, InvoiceRecord>(&sql)
            .bind(invoice_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find invoice by number", e))
    }

    async fn list(&self) -> Result<Vec<InvoiceRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM invoices ORDER BY created_at DESC, id DESC",
            INVOICE_COLUMNS
        );
        sqlx::query_as::<_, InvoiceRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("list invoices", e))
    }

    async fn update(
        &self,
        id: i64,
        changes: InvoiceChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<InvoiceRecord>, StorageError> {
        // NULL parameters keep the stored value; no column is nullable.
        let sql = format!(
            "UPDATE invoices SET \
                invoice_number = COALESCE($2, invoice_number), \
                client_name = COALESCE($3, client_name), \
                client_email = COALESCE($4, client_email), \
                amount_due = COALESCE($5, amount_due), \
                issue_date = COALESCE($6, issue_date), \
                due_date = COALESCE($7, due_date), \
                services_rendered = COALESCE($8, services_rendered), \
                paid = COALESCE($9, paid), \
                updated_at = $10 \
             WHERE id = $1 \
             RETURNING {}",
            INVOICE_COLUMNS
        );

        let number = changes.invoice_number.clone().unwrap_or_default();
        sqlx::query_as::<_, InvoiceRecord>(&sql)
            .bind(id)
            .bind(changes.invoice_number)
            .bind(changes.client_name)
            .bind(changes.client_email)
            .bind(changes.amount_due)
            .bind(changes.issue_date)
            .bind(changes.due_date)
            .bind(changes.services_rendered)
            .bind(changes.paid)
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("update invoice", &number, e))
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("delete invoice", e))?;

        Ok(result.rows_affected() > 0)
    }
}
