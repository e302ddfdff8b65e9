//! Invoice composition: the mutable draft and its totals arithmetic.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BillingError, BillingResult};
use crate::models::{Invoice, InvoiceItem, InvoiceStatus};
use crate::store::Store;

/// Tax rate percentage applied to new drafts unless overridden.
pub const DEFAULT_TAX_RATE: f64 = 10.0;

/// An editable line item on a draft. Validated on entry, so a draft never
/// holds a zero quantity or a non-finite price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// Computed totals for a draft or invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line totals, in list order
    pub subtotal: f64,
    /// subtotal x rate / 100
    pub tax: f64,
    /// subtotal + tax
    pub total: f64,
}

/// Mutable staging area for composing an invoice. Starts with a single
/// blank line item (quantity 1, price 0); the item list never goes empty.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    patient_id: String,
    items: Vec<LineItem>,
    tax_rate: f64,
    issue_date: NaiveDate,
    due_date: NaiveDate,
}

impl InvoiceDraft {
    /// Start a draft for a patient.
    pub fn new(patient_id: impl Into<String>, issue_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            patient_id: patient_id.into(),
            items: vec![LineItem {
                description: String::new(),
                quantity: 1,
                unit_price: 0.0,
            }],
            tax_rate: DEFAULT_TAX_RATE,
            issue_date,
            due_date,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Append a line item.
    pub fn add_item(
        &mut self,
        description: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> BillingResult<()> {
        validate_item(quantity, unit_price)?;
        self.items.push(LineItem {
            description: description.into(),
            quantity,
            unit_price,
        });
        Ok(())
    }

    /// Replace the line item at `index`.
    pub fn set_item(
        &mut self,
        index: usize,
        description: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> BillingResult<()> {
        validate_item(quantity, unit_price)?;
        let item = self
            .items
            .get_mut(index)
            .ok_or(BillingError::NoSuchItem(index))?;
        *item = LineItem {
            description: description.into(),
            quantity,
            unit_price,
        };
        Ok(())
    }

    /// Remove the line item at `index`. The last remaining item cannot be
    /// removed.
    pub fn remove_item(&mut self, index: usize) -> BillingResult<()> {
        if index >= self.items.len() {
            return Err(BillingError::NoSuchItem(index));
        }
        if self.items.len() == 1 {
            return Err(BillingError::LastItem);
        }
        self.items.remove(index);
        Ok(())
    }

    /// Set the tax rate percentage, within [0, 100].
    pub fn set_tax_rate(&mut self, rate: f64) -> BillingResult<()> {
        if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
            return Err(BillingError::InvalidTaxRate(rate));
        }
        self.tax_rate = rate;
        Ok(())
    }

    /// Recompute totals with a full pass over the item list. Called on
    /// every read; nothing is maintained incrementally.
    pub fn totals(&self) -> InvoiceTotals {
        let subtotal: f64 = self.items.iter().map(LineItem::line_total).sum();
        let tax = subtotal * (self.tax_rate / 100.0);
        InvoiceTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Submit the draft: resolve the patient, freeze the line items, and
    /// insert the invoice in `draft` status. The patient name is copied
    /// into the invoice so later patient edits or deletion leave it
    /// untouched.
    pub fn submit(&self, store: &Store) -> BillingResult<Invoice> {
        if self.items.is_empty() {
            return Err(BillingError::EmptyInvoice);
        }
        let patient = store
            .get_patient(&self.patient_id)?
            .ok_or_else(|| BillingError::UnknownPatient(self.patient_id.clone()))?;

        let totals = self.totals();
        let invoice_number = store.next_invoice_number(self.issue_date)?;
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| InvoiceItem {
                id: format!("item-{index}"),
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.line_total(),
            })
            .collect();

        let invoice = Invoice {
            id: uuid::Uuid::new_v4().to_string(),
            invoice_number,
            patient_id: patient.id,
            patient_name: patient.name,
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: InvoiceStatus::Draft,
            issue_date: self.issue_date,
            due_date: self.due_date,
            created_at: Utc::now(),
        };
        store.insert_invoice(&invoice)?;
        debug!(number = %invoice.invoice_number, total = invoice.total, "created invoice");
        Ok(invoice)
    }
}

fn validate_item(quantity: u32, unit_price: f64) -> BillingResult<()> {
    if quantity == 0 {
        return Err(BillingError::InvalidQuantity);
    }
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(BillingError::InvalidUnitPrice(unit_price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_draft() -> InvoiceDraft {
        InvoiceDraft::new(
            "patient-1",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        )
    }

    #[test]
    fn test_new_draft_has_one_blank_item() {
        let draft = make_draft();
        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.items()[0].quantity, 1);
        assert_eq!(draft.items()[0].unit_price, 0.0);
        assert_eq!(draft.tax_rate(), DEFAULT_TAX_RATE);
    }

    #[test]
    fn test_totals_scenario() {
        // items = [{qty 5, price 10.99}], tax 10%
        let mut draft = make_draft();
        draft.set_item(0, "Aspirin 325mg", 5, 10.99).unwrap();

        let totals = draft.totals();
        assert!((totals.subtotal - 54.95).abs() < 1e-9);
        assert!((totals.tax - 5.495).abs() < 1e-9);
        assert!((totals.total - 60.445).abs() < 1e-9);
    }

    #[test]
    fn test_totals_recomputed_after_edit() {
        let mut draft = make_draft();
        draft.set_item(0, "Consultation", 1, 500.0).unwrap();
        draft.add_item("Dressing", 2, 75.0).unwrap();
        assert_eq!(draft.totals().subtotal, 650.0);

        draft.set_item(1, "Dressing", 4, 75.0).unwrap();
        assert_eq!(draft.totals().subtotal, 800.0);

        draft.remove_item(1).unwrap();
        assert_eq!(draft.totals().subtotal, 500.0);
    }

    #[test]
    fn test_zero_tax_rate() {
        let mut draft = make_draft();
        draft.set_item(0, "Consultation", 1, 500.0).unwrap();
        draft.set_tax_rate(0.0).unwrap();

        let totals = draft.totals();
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_cannot_remove_last_item() {
        let mut draft = make_draft();
        assert!(matches!(draft.remove_item(0), Err(BillingError::LastItem)));
        assert_eq!(draft.items().len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut draft = make_draft();
        draft.add_item("Dressing", 2, 75.0).unwrap();
        assert!(matches!(
            draft.remove_item(5),
            Err(BillingError::NoSuchItem(5))
        ));
    }

    #[test]
    fn test_rejects_invalid_numbers() {
        let mut draft = make_draft();
        assert!(matches!(
            draft.add_item("x", 0, 10.0),
            Err(BillingError::InvalidQuantity)
        ));
        assert!(matches!(
            draft.add_item("x", 1, -5.0),
            Err(BillingError::InvalidUnitPrice(_))
        ));
        assert!(matches!(
            draft.add_item("x", 1, f64::NAN),
            Err(BillingError::InvalidUnitPrice(_))
        ));
        assert!(matches!(
            draft.set_tax_rate(101.0),
            Err(BillingError::InvalidTaxRate(_))
        ));
        assert!(matches!(
            draft.set_tax_rate(f64::NAN),
            Err(BillingError::InvalidTaxRate(_))
        ));
        // Rejected edits must not land in the list
        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.tax_rate(), DEFAULT_TAX_RATE);
    }

    proptest! {
        #[test]
        fn prop_subtotal_is_sum_of_line_totals(
            items in prop::collection::vec((1u32..100, 0.0f64..10_000.0), 1..20)
        ) {
            let mut draft = make_draft();
            let (q0, p0) = items[0];
            draft.set_item(0, "item", q0, p0).unwrap();
            for &(quantity, unit_price) in &items[1..] {
                draft.add_item("item", quantity, unit_price).unwrap();
            }

            let expected: f64 = items
                .iter()
                .map(|&(quantity, unit_price)| f64::from(quantity) * unit_price)
                .sum();
            prop_assert_eq!(draft.totals().subtotal, expected);
        }

        #[test]
        fn prop_total_is_subtotal_plus_tax(
            quantity in 1u32..1000,
            unit_price in 0.0f64..10_000.0,
            rate in 0.0f64..=100.0,
        ) {
            let mut draft = make_draft();
            draft.set_item(0, "item", quantity, unit_price).unwrap();
            draft.set_tax_rate(rate).unwrap();

            let totals = draft.totals();
            let expected = totals.subtotal + totals.subtotal * rate / 100.0;
            prop_assert!((totals.total - expected).abs() < 1e-6);
        }
    }
}
