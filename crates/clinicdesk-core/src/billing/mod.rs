//! Invoice engine: line-item composition and the status lifecycle.
//!
//! [`InvoiceDraft`] is the mutable pre-submit staging area; totals are
//! recomputed with a full pass on every read. Once submitted, an invoice is
//! frozen apart from its status, which advances only through the guarded
//! operations in [`lifecycle`].

mod draft;
mod lifecycle;

pub use draft::*;
pub use lifecycle::*;

use thiserror::Error;

use crate::models::InvoiceStatus;
use crate::store::StoreError;

/// Billing errors.
#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Invoice must contain at least one line item")]
    EmptyInvoice,

    #[error("Cannot remove the last remaining line item")]
    LastItem,

    #[error("No line item at index {0}")]
    NoSuchItem(usize),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Unit price must be a finite, non-negative number: {0}")]
    InvalidUnitPrice(f64),

    #[error("Tax rate must be a percentage between 0 and 100: {0}")]
    InvalidTaxRate(f64),

    #[error("No patient with id {0}")]
    UnknownPatient(String),

    #[error("Invalid invoice status transition: {from} -> {to}")]
    InvalidTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BillingResult<T> = Result<T, BillingError>;
