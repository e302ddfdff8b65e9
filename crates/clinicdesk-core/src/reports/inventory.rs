//! Inventory aggregates: stock and expiry classification over the product
//! collection. Per-product predicates live on [`Product`].

use chrono::NaiveDate;

use crate::models::Product;

/// Products at or below their reorder threshold, including out-of-stock.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// Products with no stock on hand.
pub fn out_of_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_out_of_stock()).collect()
}

/// Products whose expiry date has passed.
pub fn expired(products: &[Product], today: NaiveDate) -> Vec<&Product> {
    products.iter().filter(|p| p.is_expired(today)).collect()
}

/// Products expiring within the warning window (but not yet expired).
pub fn expiring_soon(products: &[Product], today: NaiveDate) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.is_expiring_soon(today))
        .collect()
}
