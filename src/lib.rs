//! # Invoice Tracker
//!
//! Invoice bookkeeping for a small business: create, list, fetch, patch and
//! delete invoices, exposed as remote procedures and a REST resource.
//!
//! ## Features
//!
//! - **Exact amounts**: stored as two-place decimals, exposed as JSON numbers
//! - **Partial updates**: `Patch<T>` separates "not sent" from "set"
//! - **Unique invoice numbers**: enforced by the store, reported as `409`
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//! - **YAML configuration** with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_tracker::prelude::*;
//!
//! let service = InvoiceService::new(InMemoryInvoiceStore::new());
//! let invoice = service.create(input).await?;
//!
//! ServerBuilder::new()
//!     .with_service(service)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::{
        CreateInvoiceInput, DeleteInvoiceOutput, Invoice, InvoiceIdInput, InvoiceSummary, Patch,
        UpdateInvoiceInput, UpdateInvoiceRequest,
    };

    // === Operations ===
    pub use crate::core::{InvoiceService, InvoiceStore};

    // === Errors ===
    pub use crate::core::{
        ConfigError, InvoiceError, StorageError, TrackerError, TrackerResult, ValidationError,
    };

    // === Validation ===
    pub use crate::core::validation::{Validated, ValidatedQuery};

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;

    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Server ===
    pub use crate::config::AppConfig;
    pub use crate::server::{ServerBuilder, ServerHost};

    // === Common external types ===
    pub use chrono::{DateTime, NaiveDate, Utc};
}
