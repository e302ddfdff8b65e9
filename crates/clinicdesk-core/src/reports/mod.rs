//! Derived aggregates.
//!
//! Every function here is pure and recomputes from a full collection scan
//! on each call. There is no caching and no incremental maintenance;
//! correctness comes from always reading the current store snapshot, which
//! is the right tradeoff at front-office data sizes.

mod finance;
mod inventory;

pub use finance::*;
pub use inventory::*;

use serde::Serialize;

use crate::store::{Store, StoreResult};

/// Headline counts and sums for the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_patients: usize,
    pub total_products: usize,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub low_stock_count: usize,
    pub overdue_invoice_count: usize,
}

/// Compute the dashboard snapshot from the current store state.
pub fn dashboard_snapshot(store: &Store) -> StoreResult<DashboardSnapshot> {
    let patients = store.list_patients()?;
    let products = store.list_products()?;
    let sales = store.list_sales()?;
    let expenses = store.list_expenses()?;
    let invoices = store.list_invoices()?;

    Ok(DashboardSnapshot {
        total_patients: patients.len(),
        total_products: products.len(),
        total_revenue: total_revenue(&sales),
        total_expenses: total_expenses(&expenses),
        low_stock_count: low_stock(&products).len(),
        overdue_invoice_count: overdue_invoices(&invoices).len(),
    })
}
