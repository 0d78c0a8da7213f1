//! Core module containing the invoice model, operations and store contract

pub mod amount;
pub mod error;
pub mod invoice;
pub mod patch;
pub mod service;
pub mod store;
pub mod summary;
pub mod validation;

pub use error::{
    ConfigError, ErrorResponse, FieldValidationError, InvoiceError, StorageError, TrackerError,
    TrackerResult, ValidationError,
};
pub use invoice::{
    CreateInvoiceInput, DeleteInvoiceOutput, Invoice, InvoiceChanges, InvoiceIdInput,
    InvoiceRecord, NewInvoice, UpdateInvoiceInput, UpdateInvoiceRequest,
};
pub use patch::Patch;
pub use service::InvoiceService;
pub use store::InvoiceStore;
pub use summary::InvoiceSummary;
