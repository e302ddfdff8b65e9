//! Clinicdesk Core Library
//!
//! Single-tenant clinic front-office core: patient records, product
//! inventory, expense logging, sales history, and invoice billing over a
//! session-local in-memory store.
//!
//! # Architecture
//!
//! ```text
//! Presentation layer (external)
//!       │ commands                 │ queries
//!       ▼                          ▼
//! ┌───────────────┐        ┌─────────────────┐
//! │     Store     │───────▶│     reports     │
//! │ (in-memory    │  scan  │ (pure functions │
//! │  SQLite)      │        │  per read)      │
//! └───────┬───────┘        └─────────────────┘
//!         │ seed::load_sample_data
//!         │
//! ┌───────▼───────┐
//! │    billing    │  InvoiceDraft ──submit──▶ draft ──▶ sent ──▶ paid
//! │               │                                      └─────▶ overdue
//! └───────────────┘
//! ```
//!
//! # Core Principle
//!
//! **All state is session-local.** The store lives in memory, is seeded
//! from static sample data, and is discarded when the session ends; there
//! is no persistence, no authentication, and no concurrency.
//!
//! # Modules
//!
//! - [`store`]: in-memory SQLite entity store with per-entity commands
//! - [`models`]: domain types (Patient, Product, Expense, Sale, Invoice)
//! - [`billing`]: invoice composition and the guarded status lifecycle
//! - [`reports`]: derived aggregates, recomputed on every read
//! - [`seed`]: static sample data bootstrap

pub mod billing;
pub mod models;
pub mod reports;
pub mod seed;
pub mod store;

// Re-export commonly used types
pub use billing::{
    mark_invoice_overdue, mark_invoice_paid, send_invoice, BillingError, BillingResult,
    InvoiceDraft, InvoiceTotals, LineItem,
};
pub use models::{
    Expense, ExpensePatch, Invoice, InvoiceItem, InvoiceStatus, NewExpense, NewPatient,
    NewProduct, Patient, PatientPatch, Product, ProductPatch, Sale, StockLevel,
};
pub use reports::{BillingSummary, DashboardSnapshot};
pub use store::{Store, StoreError, StoreResult};
