//! Typed error handling for the invoice tracker
//!
//! Every procedure returns a [`TrackerError`] so callers can match on the
//! condition instead of parsing messages.
//!
//! # Error Categories
//!
//! - [`InvoiceError`]: the two domain conditions (not found, duplicate number)
//! - [`ValidationError`]: rejected input
//! - [`StorageError`]: store failures, propagated unchanged
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! use invoice_tracker::prelude::*;
//!
//! match service.get_one(42).await {
//!     Ok(invoice) => println!("{}", invoice.invoice_number),
//!     Err(TrackerError::Invoice(InvoiceError::NotFound { id })) => {
//!         println!("no invoice {}", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type of the invoice tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Domain conditions raised by the invoice operations
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TrackerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrackerError::Invoice(e) => e.status_code(),
            TrackerError::Validation(_) => StatusCode::BAD_REQUEST,
            TrackerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrackerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TrackerError::Invoice(e) => e.error_code(),
            TrackerError::Validation(_) => "VALIDATION_ERROR",
            TrackerError::Storage(_) => "STORAGE_ERROR",
            TrackerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            TrackerError::Invoice(InvoiceError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            TrackerError::Invoice(InvoiceError::DuplicateNumber { invoice_number }) => {
                Some(serde_json::json!({ "invoice_number": invoice_number }))
            }
            TrackerError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }

    /// True for the not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::Invoice(InvoiceError::NotFound { .. }))
    }

    /// True for the duplicate invoice number condition
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            TrackerError::Invoice(InvoiceError::DuplicateNumber { .. })
        )
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Invoice Errors
// =============================================================================

/// Conditions raised by the invoice operations
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// No row matches the id
    #[error("Invoice with id '{id}' not found")]
    NotFound { id: i64 },

    /// The invoice number is already used by another row
    #[error("Invoice with number '{invoice_number}' already exists")]
    DuplicateNumber { invoice_number: String },
}

impl InvoiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InvoiceError::DuplicateNumber { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            InvoiceError::NotFound { .. } => "INVOICE_NOT_FOUND",
            InvoiceError::DuplicateNumber { .. } => "INVOICE_NUMBER_TAKEN",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Payload could not be decoded
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Query string could not be decoded
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter()
                    .map(move |e| FieldValidationError {
                        field: field.clone(),
                        message: e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store rejected a write on the invoice number constraint
    #[error("{backend} rejected duplicate invoice number '{invoice_number}'")]
    UniqueViolation {
        backend: String,
        invoice_number: String,
    },

    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    /// Schema migration failed
    #[error("Migration error: {message}")]
    Migration { message: String },

    /// In-memory state could not be locked
    #[error("Store lock poisoned: {message}")]
    Lock { message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<validator::ValidationErrors> for TrackerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        TrackerError::Validation(errors.into())
    }
}

impl From<JsonRejection> for TrackerError {
    fn from(rejection: JsonRejection) -> Self {
        TrackerError::Validation(ValidationError::InvalidJson {
            message: rejection.body_text(),
        })
    }
}

impl From<QueryRejection> for TrackerError {
    fn from(rejection: QueryRejection) -> Self {
        TrackerError::Validation(ValidationError::InvalidQuery {
            message: rejection.body_text(),
        })
    }
}

impl From<PathRejection> for TrackerError {
    fn from(rejection: PathRejection) -> Self {
        TrackerError::Validation(ValidationError::FieldError {
            field: "id".to_string(),
            message: rejection.body_text(),
        })
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StorageError::Migration {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for invoice tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
