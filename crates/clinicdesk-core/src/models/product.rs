//! Inventory product models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Window, in days, within which a product counts as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// A product tracked in the clinic inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Store-assigned UUID
    pub id: String,
    /// Product name
    pub name: String,
    /// Category (e.g., "Pain Relief", "Medical Equipment")
    pub category: String,
    /// Unit price, non-negative
    pub price: f64,
    /// Units currently on hand
    pub stock: u32,
    /// Reorder threshold
    pub min_stock: u32,
    /// Free-form description
    pub description: String,
    /// Manufacturer name
    pub manufacturer: String,
    /// Expiry date, if the product expires
    pub expiry_date: Option<NaiveDate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Stock classification for a product. Out-of-stock takes precedence over
/// low-stock when both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

/// Input for creating a product; the store assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub min_stock: u32,
    pub description: String,
    pub manufacturer: String,
    pub expiry_date: Option<NaiveDate>,
}

/// Partial update for a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub min_stock: Option<u32>,
    pub description: Option<String>,
    pub manufacturer: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl Product {
    /// Build a fresh product record from command input.
    pub fn new(data: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            category: data.category,
            price: data.price,
            stock: data.stock,
            min_stock: data.min_stock,
            description: data.description,
            manufacturer: data.manufacturer,
            expiry_date: data.expiry_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update and refresh the update timestamp.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(min_stock) = patch.min_stock {
            self.min_stock = min_stock;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(manufacturer) = patch.manufacturer {
            self.manufacturer = manufacturer;
        }
        if let Some(expiry_date) = patch.expiry_date {
            self.expiry_date = Some(expiry_date);
        }
        self.touch();
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Classify the current stock position.
    pub fn stock_level(&self) -> StockLevel {
        if self.stock == 0 {
            StockLevel::OutOfStock
        } else if self.stock <= self.min_stock {
            StockLevel::LowStock
        } else {
            StockLevel::InStock
        }
    }

    /// Stock is exhausted.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Stock is at or below the reorder threshold. Includes the boundary
    /// case `stock == min_stock` and out-of-stock products.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Days until expiry relative to `today`. Negative once expired; `None`
    /// for products without an expiry date.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|d| (d - today).num_days())
    }

    /// The expiry date has passed.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        matches!(self.expiry_date, Some(d) if d < today)
    }

    /// Expires within the warning window but has not expired yet.
    pub fn is_expiring_soon(&self, today: NaiveDate) -> bool {
        match self.days_until_expiry(today) {
            Some(days) => days > 0 && days <= EXPIRY_WARNING_DAYS,
            None => false,
        }
    }
}
