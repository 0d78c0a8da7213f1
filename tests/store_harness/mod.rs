//! Shared test harness for invoice store and HTTP conformance testing
//!
//! Provides input and row builders plus two macro suites:
//! `invoice_store_tests!` (store contract) and `invoice_api_tests!`
//! (procedure and REST surface over a store).
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

pub mod store_tests;

use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};
use invoice_tracker::core::{CreateInvoiceInput, NewInvoice};
use serde_json::{Value, json};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Now, truncated to what PostgreSQL stores
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A valid create input for `invoice_number`
pub fn create_input(invoice_number: &str, amount_due: f64) -> CreateInvoiceInput {
    CreateInvoiceInput {
        invoice_number: invoice_number.to_string(),
        client_name: "Acme Corp".to_string(),
        client_email: "billing@acme.test".to_string(),
        amount_due,
        issue_date: date("2024-01-01"),
        due_date: date("2024-01-31"),
        services_rendered: "Website redesign".to_string(),
        paid: false,
    }
}

/// JSON body of a valid create call
pub fn create_body(invoice_number: &str, amount_due: f64) -> Value {
    json!({
        "invoice_number": invoice_number,
        "client_name": "Acme Corp",
        "client_email": "billing@acme.test",
        "amount_due": amount_due,
        "issue_date": "2024-01-01",
        "due_date": "2024-01-31",
        "services_rendered": "Website redesign",
        "paid": false
    })
}

/// A row ready for `InvoiceStore::insert`
pub fn new_invoice(invoice_number: &str) -> NewInvoice {
    new_invoice_at(invoice_number, now())
}

/// A row ready for `InvoiceStore::insert` with a fixed creation time
pub fn new_invoice_at(invoice_number: &str, created_at: DateTime<Utc>) -> NewInvoice {
    NewInvoice::from_input(create_input(invoice_number, 150.75), created_at)
        .expect("valid test amount")
}

/// `base` shifted by `seconds`
pub fn offset(base: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    base + Duration::seconds(seconds)
}
