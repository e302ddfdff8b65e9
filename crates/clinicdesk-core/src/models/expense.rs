//! Expense models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A logged clinic expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    /// Store-assigned UUID
    pub id: String,
    /// Short title
    pub title: String,
    /// Category (e.g., "Medical Supplies", "Equipment")
    pub category: String,
    /// Amount spent, non-negative
    pub amount: f64,
    /// Free-form description
    pub description: String,
    /// Date the expense was incurred
    pub date: NaiveDate,
    /// Supplier name, if any
    pub supplier: Option<String>,
    /// Receipt reference, if any
    pub receipt_number: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for logging an expense; the store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub supplier: Option<String>,
    pub receipt_number: Option<String>,
}

/// Partial update for an expense. Expenses carry no update timestamp, so a
/// merge leaves `created_at` as the only time marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub supplier: Option<String>,
    pub receipt_number: Option<String>,
}

impl Expense {
    /// Build a fresh expense record from command input.
    pub fn new(data: NewExpense) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: data.title,
            category: data.category,
            amount: data.amount,
            description: data.description,
            date: data.date,
            supplier: data.supplier,
            receipt_number: data.receipt_number,
            created_at: Utc::now(),
        }
    }

    /// Merge a partial update.
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(supplier) = patch.supplier {
            self.supplier = Some(supplier);
        }
        if let Some(receipt_number) = patch.receipt_number {
            self.receipt_number = Some(receipt_number);
        }
    }
}
