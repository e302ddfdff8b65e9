//! Invoice models and the status lifecycle table.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Invoice status lifecycle. Transitions are one-way:
///
/// ```text
/// draft ──> sent ──> paid
///             │
///             └────> overdue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    /// Wire/storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    /// Parse the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(InvoiceStatus::Draft),
            "sent" => Some(InvoiceStatus::Sent),
            "paid" => Some(InvoiceStatus::Paid),
            "overdue" => Some(InvoiceStatus::Overdue),
            _ => None,
        }
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    /// Paid and overdue are terminal; nothing re-enters draft.
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Draft, InvoiceStatus::Sent)
                | (InvoiceStatus::Sent, InvoiceStatus::Paid)
                | (InvoiceStatus::Sent, InvoiceStatus::Overdue)
        )
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line item frozen into an invoice at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItem {
    /// Position-derived id ("item-0", "item-1", ...)
    pub id: String,
    /// Service or product description
    pub description: String,
    /// Units billed, at least 1
    pub quantity: u32,
    /// Price per unit, non-negative
    pub unit_price: f64,
    /// quantity x unit_price
    pub total: f64,
}

/// An issued invoice. Items, totals, and the patient-name snapshot are
/// immutable once the invoice exists; only the status advances, via the
/// guarded lifecycle operations in [`crate::billing`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    /// Store-assigned UUID
    pub id: String,
    /// Human-facing number, unique per session
    pub invoice_number: String,
    /// Id of the billed patient (not a live reference)
    pub patient_id: String,
    /// Patient name at invoice-creation time
    pub patient_name: String,
    /// Line items in display order
    pub items: Vec<InvoiceItem>,
    /// Sum of item totals
    pub subtotal: f64,
    /// Tax amount (not the rate)
    pub tax: f64,
    /// subtotal + tax
    pub total: f64,
    /// Lifecycle status
    pub status: InvoiceStatus,
    /// Date the invoice was issued
    pub issue_date: NaiveDate,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
