//! Sale store operations.
//!
//! Sales are immutable history: insert and list only, no update or delete.

use rusqlite::{params, Row};
use tracing::debug;

use super::{Store, StoreResult};
use crate::models::Sale;

const SALE_COLUMNS: &str = "id, product_id, product_name, quantity, unit_price, \
     total_amount, customer_id, customer_name, sale_date, created_at";

fn sale_from_row(row: &Row<'_>) -> rusqlite::Result<Sale> {
    Ok(Sale {
        id: row.get(0)?,
        product_id: row.get(1)?,
        product_name: row.get(2)?,
        quantity: row.get(3)?,
        unit_price: row.get(4)?,
        total_amount: row.get(5)?,
        customer_id: row.get(6)?,
        customer_name: row.get(7)?,
        sale_date: row.get(8)?,
        created_at: row.get(9)?,
    })
}

impl Store {
    /// Record a sale.
    pub fn insert_sale(&self, sale: &Sale) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO sales (
                id, product_id, product_name, quantity, unit_price,
                total_amount, customer_id, customer_name, sale_date, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                sale.id,
                sale.product_id,
                sale.product_name,
                sale.quantity,
                sale.unit_price,
                sale.total_amount,
                sale.customer_id,
                sale.customer_name,
                sale.sale_date,
                sale.created_at,
            ],
        )?;
        debug!(id = %sale.id, product = %sale.product_name, "recorded sale");
        Ok(())
    }

    /// List all sales in insertion order.
    pub fn list_sales(&self) -> StoreResult<Vec<Sale>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SALE_COLUMNS} FROM sales ORDER BY rowid"))?;
        let rows = stmt.query_map([], sale_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewProduct, Product};
    use chrono::NaiveDate;

    #[test]
    fn test_insert_and_list() {
        let store = Store::in_memory().unwrap();
        let product = Product::new(NewProduct {
            name: "Aspirin 325mg".into(),
            price: 1099.0,
            stock: 150,
            ..Default::default()
        });

        let sale = Sale::new(&product, 5, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        store.insert_sale(&sale).unwrap();

        let listed = store.list_sales().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], sale);
        assert_eq!(listed[0].total_amount, 5495.0);
    }

    #[test]
    fn test_sale_survives_product_deletion() {
        let store = Store::in_memory().unwrap();
        let product = store
            .add_product(NewProduct {
                name: "Blood Pressure Monitor".into(),
                price: 7599.0,
                stock: 8,
                ..Default::default()
            })
            .unwrap();

        let sale = Sale::new(&product, 1, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        store.insert_sale(&sale).unwrap();

        assert!(store.delete_product(&product.id).unwrap());

        let listed = store.list_sales().unwrap();
        assert_eq!(listed[0].product_name, "Blood Pressure Monitor");
        assert_eq!(listed[0].unit_price, 7599.0);
    }
}
