//! Sale models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Patient, Product};

/// A completed product sale. Sales are immutable historical records: the
/// product name and unit price are snapshots taken at sale time, so later
/// edits or deletion of the product leave the sale untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    /// Store-assigned UUID
    pub id: String,
    /// Id of the product sold (not a live reference)
    pub product_id: String,
    /// Product name at sale time
    pub product_name: String,
    /// Units sold, at least 1
    pub quantity: u32,
    /// Unit price at sale time
    pub unit_price: f64,
    /// quantity x unit_price, fixed at creation
    pub total_amount: f64,
    /// Id of the buying patient, if recorded
    pub customer_id: Option<String>,
    /// Patient name at sale time
    pub customer_name: Option<String>,
    /// Date of sale
    pub sale_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Record a sale of `quantity` units, snapshotting the product's name
    /// and current price and fixing the total.
    pub fn new(product: &Product, quantity: u32, sale_date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price: product.price,
            total_amount: f64::from(quantity) * product.price,
            customer_id: None,
            customer_name: None,
            sale_date,
            created_at: Utc::now(),
        }
    }

    /// Attach the buying patient, snapshotting their name.
    pub fn with_customer(mut self, patient: &Patient) -> Self {
        self.customer_id = Some(patient.id.clone());
        self.customer_name = Some(patient.name.clone());
        self
    }
}
