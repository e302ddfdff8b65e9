//! Guarded invoice status lifecycle.
//!
//! Going overdue is a deliberate caller action, not a scheduled check: the
//! store never compares `due_date` against the clock.

use tracing::debug;

use super::{BillingError, BillingResult};
use crate::models::{Invoice, InvoiceStatus};
use crate::store::{Store, StoreError};

/// Send a draft invoice (`draft -> sent`).
pub fn send_invoice(store: &Store, id: &str) -> BillingResult<Invoice> {
    transition(store, id, InvoiceStatus::Sent)
}

/// Record payment of a sent invoice (`sent -> paid`).
pub fn mark_invoice_paid(store: &Store, id: &str) -> BillingResult<Invoice> {
    transition(store, id, InvoiceStatus::Paid)
}

/// Flag a sent invoice as overdue (`sent -> overdue`).
pub fn mark_invoice_overdue(store: &Store, id: &str) -> BillingResult<Invoice> {
    transition(store, id, InvoiceStatus::Overdue)
}

fn transition(store: &Store, id: &str, next: InvoiceStatus) -> BillingResult<Invoice> {
    let mut invoice = store
        .get_invoice(id)?
        .ok_or_else(|| StoreError::NotFound(format!("invoice {id}")))?;

    if !invoice.status.can_transition_to(next) {
        return Err(BillingError::InvalidTransition {
            from: invoice.status,
            to: next,
        });
    }

    store.set_invoice_status(id, next)?;
    debug!(number = %invoice.invoice_number, from = %invoice.status, to = %next, "invoice status advanced");
    invoice.status = next;
    Ok(invoice)
}
