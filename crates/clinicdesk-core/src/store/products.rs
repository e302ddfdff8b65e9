//! Product store operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{Store, StoreError, StoreResult};
use crate::models::{NewProduct, Product, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, category, price, stock, min_stock, \
     description, manufacturer, expiry_date, created_at, updated_at";

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
        stock: row.get(4)?,
        min_stock: row.get(5)?,
        description: row.get(6)?,
        manufacturer: row.get(7)?,
        expiry_date: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

impl Store {
    /// Add a product, assigning a fresh id and timestamps.
    pub fn add_product(&self, data: NewProduct) -> StoreResult<Product> {
        let product = Product::new(data);
        self.conn.execute(
            r#"
            INSERT INTO products (
                id, name, category, price, stock, min_stock,
                description, manufacturer, expiry_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                product.id,
                product.name,
                product.category,
                product.price,
                product.stock,
                product.min_stock,
                product.description,
                product.manufacturer,
                product.expiry_date,
                product.created_at,
                product.updated_at,
            ],
        )?;
        debug!(id = %product.id, "added product");
        Ok(product)
    }

    /// Get a product by id.
    pub fn get_product(&self, id: &str) -> StoreResult<Option<Product>> {
        self.conn
            .query_row(
                &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"),
                [id],
                product_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Merge a partial update into an existing product, refreshing
    /// `updated_at`. Unknown ids are an explicit error.
    pub fn update_product(&self, id: &str, patch: ProductPatch) -> StoreResult<Product> {
        let mut product = self
            .get_product(id)?
            .ok_or_else(|| StoreError::NotFound(format!("product {id}")))?;
        product.apply(patch);

        self.conn.execute(
            r#"
            UPDATE products SET
                name = ?2,
                category = ?3,
                price = ?4,
                stock = ?5,
                min_stock = ?6,
                description = ?7,
                manufacturer = ?8,
                expiry_date = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
            params![
                product.id,
                product.name,
                product.category,
                product.price,
                product.stock,
                product.min_stock,
                product.description,
                product.manufacturer,
                product.expiry_date,
                product.updated_at,
            ],
        )?;
        debug!(id = %product.id, "updated product");
        Ok(product)
    }

    /// Delete a product. Idempotent: returns `false` when the id is absent.
    /// Historical sales keep their product-name snapshots.
    pub fn delete_product(&self, id: &str) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM products WHERE id = ?", [id])?;
        if rows_affected > 0 {
            debug!(id, "deleted product");
        }
        Ok(rows_affected > 0)
    }

    /// List all products in insertion order.
    pub fn list_products(&self) -> StoreResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid"
        ))?;
        let rows = stmt.query_map([], product_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
