//! Financial aggregates over sales, expenses, and invoices.

use serde::Serialize;

use crate::models::{Expense, Invoice, InvoiceStatus, Sale};

/// Sum of all sale totals.
pub fn total_revenue(sales: &[Sale]) -> f64 {
    sales.iter().map(|sale| sale.total_amount).sum()
}

/// Sum of all logged expense amounts.
pub fn total_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Invoices currently flagged overdue.
pub fn overdue_invoices(invoices: &[Invoice]) -> Vec<&Invoice> {
    invoices
        .iter()
        .filter(|invoice| invoice.status == InvoiceStatus::Overdue)
        .collect()
}

/// Invoice totals bucketed by lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BillingSummary {
    /// Sum of totals of paid invoices
    pub paid_revenue: f64,
    /// Sum of totals of sent (awaiting payment) invoices
    pub pending_amount: f64,
    /// Sum of totals of overdue invoices
    pub overdue_amount: f64,
}

/// Compute the billing summary. Draft invoices count toward no bucket.
pub fn billing_summary(invoices: &[Invoice]) -> BillingSummary {
    let sum_for = |status: InvoiceStatus| {
        invoices
            .iter()
            .filter(|invoice| invoice.status == status)
            .map(|invoice| invoice.total)
            .sum()
    };
    BillingSummary {
        paid_revenue: sum_for(InvoiceStatus::Paid),
        pending_amount: sum_for(InvoiceStatus::Sent),
        overdue_amount: sum_for(InvoiceStatus::Overdue),
    }
}
