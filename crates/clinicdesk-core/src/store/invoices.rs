//! Invoice store operations.
//!
//! Row insertion and status writes are crate-private: invoices enter the
//! store through [`crate::billing::InvoiceDraft::submit`] and change status
//! only through the guarded lifecycle operations in [`crate::billing`].
//! Invoices are never deleted.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::{Store, StoreError, StoreResult};
use crate::models::{Invoice, InvoiceStatus};

/// Raw row with the items column still JSON-encoded and the status still a
/// string.
struct InvoiceRow {
    id: String,
    invoice_number: String,
    patient_id: String,
    patient_name: String,
    items: String,
    subtotal: f64,
    tax: f64,
    total: f64,
    status: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl InvoiceRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            invoice_number: row.get(1)?,
            patient_id: row.get(2)?,
            patient_name: row.get(3)?,
            items: row.get(4)?,
            subtotal: row.get(5)?,
            tax: row.get(6)?,
            total: row.get(7)?,
            status: row.get(8)?,
            issue_date: row.get(9)?,
            due_date: row.get(10)?,
            created_at: row.get(11)?,
        })
    }
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = StoreError;

    fn try_from(row: InvoiceRow) -> StoreResult<Self> {
        let status = InvoiceStatus::parse(&row.status)
            .ok_or_else(|| StoreError::Constraint(format!("unknown invoice status {}", row.status)))?;
        Ok(Invoice {
            id: row.id,
            invoice_number: row.invoice_number,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            items: serde_json::from_str(&row.items)?,
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
            status,
            issue_date: row.issue_date,
            due_date: row.due_date,
            created_at: row.created_at,
        })
    }
}

const INVOICE_COLUMNS: &str = "id, invoice_number, patient_id, patient_name, items, \
     subtotal, tax, total, status, issue_date, due_date, created_at";

impl Store {
    pub(crate) fn insert_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        let items_json = serde_json::to_string(&invoice.items)?;
        self.conn.execute(
            r#"
            INSERT INTO invoices (
                id, invoice_number, patient_id, patient_name, items,
                subtotal, tax, total, status, issue_date, due_date, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                invoice.id,
                invoice.invoice_number,
                invoice.patient_id,
                invoice.patient_name,
                items_json,
                invoice.subtotal,
                invoice.tax,
                invoice.total,
                invoice.status.as_str(),
                invoice.issue_date,
                invoice.due_date,
                invoice.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get an invoice by id.
    pub fn get_invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        self.conn
            .query_row(
                &format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?"),
                [id],
                InvoiceRow::from_row,
            )
            .optional()?
            .map(Invoice::try_from)
            .transpose()
    }

    /// Get an invoice by its human-facing number.
    pub fn get_invoice_by_number(&self, number: &str) -> StoreResult<Option<Invoice>> {
        self.conn
            .query_row(
                &format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE invoice_number = ?"),
                [number],
                InvoiceRow::from_row,
            )
            .optional()?
            .map(Invoice::try_from)
            .transpose()
    }

    /// List all invoices in insertion order.
    pub fn list_invoices(&self) -> StoreResult<Vec<Invoice>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY rowid"
        ))?;
        let rows = stmt.query_map([], InvoiceRow::from_row)?;

        let mut invoices = Vec::new();
        for row in rows {
            invoices.push(row?.try_into()?);
        }
        Ok(invoices)
    }

    pub(crate) fn set_invoice_status(&self, id: &str, status: InvoiceStatus) -> StoreResult<()> {
        let rows_affected = self.conn.execute(
            "UPDATE invoices SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if rows_affected == 0 {
            return Err(StoreError::NotFound(format!("invoice {id}")));
        }
        Ok(())
    }

    /// Next invoice number in the session sequence. Invoices are never
    /// deleted, so the count only grows and numbers cannot repeat.
    pub(crate) fn next_invoice_number(&self, issue_date: NaiveDate) -> StoreResult<String> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM invoices", [], |row| row.get(0))?;
        Ok(format!(
            "INV-{}-{:04}",
            issue_date.format("%Y%m%d"),
            count + 1
        ))
    }
}
