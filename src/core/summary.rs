//! Display aggregates computed from a full invoice list

use crate::core::amount;
use crate::core::invoice::Invoice;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Totals shown above the invoice list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceSummary {
    pub total_count: usize,
    pub paid_count: usize,
    /// Sum of `amount_due` over unpaid invoices
    pub outstanding_total: f64,
    pub overdue_count: usize,
}

impl InvoiceSummary {
    pub fn from_invoices(invoices: &[Invoice], today: NaiveDate) -> Self {
        let mut outstanding = Decimal::ZERO;
        let mut paid_count = 0;
        let mut overdue_count = 0;

        for invoice in invoices {
            if invoice.paid {
                paid_count += 1;
                continue;
            }
            // Summed as decimals so the total does not drift.
            match amount::to_stored("amount_due", invoice.amount_due) {
                Ok(due) => outstanding += due,
                Err(e) => tracing::warn!(
                    invoice_id = invoice.id,
                    error = %e,
                    "amount left out of outstanding total"
                ),
            }
            if invoice.is_overdue(today) {
                overdue_count += 1;
            }
        }

        Self {
            total_count: invoices.len(),
            paid_count,
            outstanding_total: amount::to_wire(outstanding.round_dp(amount::AMOUNT_SCALE)),
            overdue_count,
        }
    }
}
